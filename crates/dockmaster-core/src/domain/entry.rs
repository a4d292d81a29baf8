//! Known dockmaster locations.

use serde::{Deserialize, Serialize};

use crate::domain::zone::Point;

/// Coordinate value that marks a calibration marker rather than a real location.
pub const REFERENCE_SENTINEL: i32 = 6142;

/// Map ID used when the registry or a suggestion does not specify one.
pub const DEFAULT_MAP: i32 = 7;

/// A dockmaster loaded from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockmasterEntry {
    /// Zone ID such as `"1A-E"` or `"XD7"`.
    pub zone_id: String,
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_map")]
    pub map: i32,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Set on a match result when the query point was a transition point,
    /// e.g. `"transition_SOUTH"`.  Never read from the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_zone: Option<String>,
}

fn default_map() -> i32 {
    DEFAULT_MAP
}

fn default_true() -> bool {
    true
}

impl DockmasterEntry {
    /// Creates an enabled entry on the default map.
    pub fn new(zone_id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            zone_id: zone_id.into(),
            x,
            y,
            map: DEFAULT_MAP,
            enabled: true,
            transition_zone: None,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns `true` for calibration markers, which are never matchable.
    pub fn is_reference_point(&self) -> bool {
        self.x == REFERENCE_SENTINEL || self.y == REFERENCE_SENTINEL
    }
}
