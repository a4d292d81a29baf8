//! Registry ordering.
//!
//! Rows are grouped into buckets and ordered within each bucket:
//!
//! 1. `XD<n>` by `n`
//! 2. `XP<n>` by `n`
//! 3. regular IDs (`<number><letters>-<dir>`) by number, then letters, then
//!    direction in the order E, N, S, W, none
//! 4. IDs that do not start with a digit, alphabetically
//! 5. `M<n>` markers by `n`
//!
//! A numeric suffix that fails to parse sorts as [`MALFORMED_SUFFIX`].

use std::sync::OnceLock;

use regex::Regex;

/// Stand-in for an unparsable numeric suffix.
pub const MALFORMED_SUFFIX: i64 = 9999;

/// Total order over zone IDs.  Variant order is bucket order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ZoneSortKey {
    Xd(i64),
    Xp(i64),
    Regular {
        number: i64,
        letters: String,
        direction_rank: u8,
    },
    Special(String),
    Marker(i64),
}

fn regular_zone() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)([A-Z]*)(?:-([NSEW]))?").expect("constant pattern"))
}

fn numeric_suffix(suffix: &str) -> i64 {
    suffix.parse().unwrap_or(MALFORMED_SUFFIX)
}

fn direction_rank(direction: Option<&str>) -> u8 {
    match direction {
        Some("E") => 1,
        Some("N") => 2,
        Some("S") => 3,
        Some("W") => 4,
        _ => 5,
    }
}

/// Computes the ordering key for a zone ID.
pub fn sort_zone_id(zone_id: &str) -> ZoneSortKey {
    if let Some(suffix) = zone_id.strip_prefix("XD") {
        return ZoneSortKey::Xd(numeric_suffix(suffix));
    }
    if let Some(suffix) = zone_id.strip_prefix("XP") {
        return ZoneSortKey::Xp(numeric_suffix(suffix));
    }
    if let Some(suffix) = zone_id.strip_prefix('M') {
        return ZoneSortKey::Marker(numeric_suffix(suffix));
    }
    if !zone_id.starts_with(|c: char| c.is_ascii_digit()) {
        return ZoneSortKey::Special(zone_id.to_string());
    }

    match regular_zone().captures(zone_id) {
        Some(caps) => ZoneSortKey::Regular {
            number: numeric_suffix(&caps[1]),
            letters: caps[2].to_string(),
            direction_rank: direction_rank(caps.get(3).map(|m| m.as_str())),
        },
        // A leading digit always matches; keep the ID orderable regardless.
        None => ZoneSortKey::Special(zone_id.to_string()),
    }
}
