//! Static zone table for the game map.
//!
//! The map is divided into named zones (XD, South, East, West).  Each zone is
//! a union of axis-aligned rectangles with *inclusive* bounds, so a zone can
//! have an irregular, non-convex outline.  Rectangles are allowed to overlap,
//! both within one zone and across zones: ambiguity is resolved by the fixed
//! priority order South → East → West, with one exception, the XD bounding
//! box, which beats every other zone.
//!
//! North is a valid dockmaster direction (`3A-N`) but has no configured
//! regions, so [`zone_for`] never returns it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Map units within which a point is considered to be "near" a region bound.
pub const TRANSITION_THRESHOLD: i32 = 200;

/// Bounding box of the XD zone.  Points inside it always classify as XD.
pub const XD_BOUNDS: Region = Region::new(3000, 5000, 2000, 4000);

/// A coordinate pair in map space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line (Euclidean) distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// A rectangle with inclusive bounds on both axes.
///
/// A region whose `min` exceeds its `max` on an axis is empty: it contains no
/// point, but its bounding lines still count for [`Region::is_near_bound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Region {
    pub const fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Returns `true` if `point` lies inside the region or on its border.
    pub fn contains(&self, point: Point) -> bool {
        self.min_x <= point.x
            && point.x <= self.max_x
            && self.min_y <= point.y
            && point.y <= self.max_y
    }

    /// Returns `true` if `point.x` is within `threshold` of either vertical
    /// bound, or `point.y` is within `threshold` of either horizontal bound.
    ///
    /// Each bound is checked independently as an infinite line, so a point far
    /// outside the rectangle but aligned with one of its edges still matches.
    pub fn is_near_bound(&self, point: Point, threshold: i32) -> bool {
        let near = |value: i32, bound: i32| {
            (i64::from(value) - i64::from(bound)).abs() <= i64::from(threshold)
        };
        near(point.x, self.min_x)
            || near(point.x, self.max_x)
            || near(point.y, self.min_y)
            || near(point.y, self.max_y)
    }
}

/// Direction tag carried by a zone and encoded as the suffix of a zone ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Xd,
}

impl Direction {
    /// The tag as it appears in zone IDs (`"N"`, `"S"`, `"E"`, `"W"`, `"XD"`).
    pub fn tag(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
            Direction::Xd => "XD",
        }
    }
}

/// Identity of a configured zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZoneName {
    Xd,
    South,
    East,
    West,
}

impl ZoneName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneName::Xd => "XD",
            ZoneName::South => "SOUTH",
            ZoneName::East => "EAST",
            ZoneName::West => "WEST",
        }
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named zone: a direction tag plus the union of its regions.
#[derive(Debug)]
pub struct Zone {
    pub name: ZoneName,
    pub direction: Direction,
    pub regions: &'static [Region],
}

impl Zone {
    /// Returns `true` if any of the zone's regions contains `point`.
    pub fn contains(&self, point: Point) -> bool {
        self.regions.iter().any(|region| region.contains(point))
    }
}

const XD_REGIONS: [Region; 1] = [XD_BOUNDS];

const SOUTH_REGIONS: [Region; 3] = [
    // Main southern area
    Region::new(0, 3000, 2500, 3000),
    // Extended area
    Region::new(0, 3500, 3500, 4000),
    // South Islands (min_y > max_y: boundary lines only)
    Region::new(0, 3500, 4000, 3400),
];

const EAST_REGIONS: [Region; 1] = [Region::new(3200, 5000, 0, 2000)];

const WEST_REGIONS: [Region; 4] = [
    Region::new(0, 800, 0, 600),
    Region::new(0, 1300, 700, 800),
    Region::new(0, 1500, 800, 1000),
    Region::new(0, 3600, 1000, 2500),
];

/// Every configured zone.
pub static ZONES: [Zone; 4] = [
    Zone {
        name: ZoneName::Xd,
        direction: Direction::Xd,
        regions: &XD_REGIONS,
    },
    Zone {
        name: ZoneName::South,
        direction: Direction::South,
        regions: &SOUTH_REGIONS,
    },
    Zone {
        name: ZoneName::East,
        direction: Direction::East,
        regions: &EAST_REGIONS,
    },
    Zone {
        name: ZoneName::West,
        direction: Direction::West,
        regions: &WEST_REGIONS,
    },
];

/// Order in which non-XD zones are tested by [`zone_for`].
const PRIORITY_ORDER: [ZoneName; 3] = [ZoneName::South, ZoneName::East, ZoneName::West];

/// Looks up the static definition of `name`.
pub fn zone(name: ZoneName) -> &'static Zone {
    match name {
        ZoneName::Xd => &ZONES[0],
        ZoneName::South => &ZONES[1],
        ZoneName::East => &ZONES[2],
        ZoneName::West => &ZONES[3],
    }
}

/// Returns `true` if `point` is inside the XD bounding box.
pub fn in_xd_box(point: Point) -> bool {
    XD_BOUNDS.contains(point)
}

/// Classifies `point` into a zone.
///
/// The XD box is checked first and wins outright.  Otherwise South, East and
/// West are tried in that order and the first one containing the point is
/// returned.  Returns `None` when no zone contains the point.
pub fn zone_for(point: Point) -> Option<ZoneName> {
    if in_xd_box(point) {
        return Some(ZoneName::Xd);
    }

    PRIORITY_ORDER
        .into_iter()
        .find(|name| zone(*name).contains(point))
}

/// Returns `true` if `point` sits in an ambiguous area between zones.
///
/// A point is a transition point when it lies inside more than one zone, or
/// when it is within `threshold` map units of any bound of any region (see
/// [`Region::is_near_bound`] for the exact, deliberately loose, test).
pub fn is_transition_point(point: Point, threshold: i32) -> bool {
    let containing = ZONES.iter().filter(|z| z.contains(point)).count();
    if containing > 1 {
        return true;
    }

    ZONES
        .iter()
        .flat_map(|z| z.regions.iter())
        .any(|region| region.is_near_bound(point, threshold))
}

/// Extracts the direction suffix of a zone ID.
///
/// This is the text after the last `-`, or the final character when the ID
/// contains no hyphen.  Returns `None` for an empty ID.
pub fn direction_suffix(zone_id: &str) -> Option<&str> {
    if let Some(idx) = zone_id.rfind('-') {
        return Some(&zone_id[idx + 1..]);
    }
    zone_id
        .char_indices()
        .last()
        .map(|(idx, _)| &zone_id[idx..])
}

/// Checks whether a dockmaster with `zone_id` is a plausible match for `point`.
///
/// Inside the XD box only `XD…` IDs are valid.  Elsewhere the ID's direction
/// suffix must equal the direction tag of the zone containing the point.
pub fn validate_match(point: Point, zone_id: &str) -> bool {
    let in_xd = in_xd_box(point);
    if in_xd {
        return zone_id.starts_with("XD");
    }

    let Some(name) = zone_for(point) else {
        return false;
    };
    if name == ZoneName::Xd {
        return zone_id.starts_with("XD");
    }

    let Some(suffix) = direction_suffix(zone_id) else {
        return false;
    };

    // North IDs never belong inside XD.
    if suffix == Direction::North.tag() && in_xd {
        return false;
    }

    suffix == zone(name).direction.tag()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
