//! Nearest-dockmaster search with a confidence score.
//!
//! Candidates are restricted before any distance is measured: reference
//! points are never considered, XD coordinates only match XD dockmasters, and
//! elsewhere a dockmaster's direction suffix must agree with the zone the
//! query point falls in.  The confidence score then degrades when the runner-up
//! is almost as close as the winner, when the point sits near a zone boundary,
//! and when the zone is XD.

use serde::Serialize;
use tracing::debug;

use crate::domain::entry::DockmasterEntry;
use crate::domain::zone::{
    in_xd_box, is_transition_point, validate_match, zone_for, Point, ZoneName,
    TRANSITION_THRESHOLD,
};

/// Confidence below which a match should be confirmed by a human.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Fixed confidence for any match inside the XD box.
pub const XD_MATCH_CONFIDENCE: f64 = 0.9;

/// Multiplier applied when the query point is a transition point.
const TRANSITION_FACTOR: f64 = 0.8;

/// Multiplier applied when the resolved zone is XD.
const XD_ZONE_FACTOR: f64 = 0.9;

/// Default Euclidean distance within which transition entries are clustered.
pub const DEFAULT_CLUSTER_DISTANCE: f64 = 100.0;

/// Tunables for matching and clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// Matches below this confidence need verification.
    pub confidence_threshold: f64,
    /// Boundary proximity, in map units, that marks a transition point.
    pub transition_threshold: i32,
    /// Maximum seed distance for transition clustering.
    pub cluster_distance: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            transition_threshold: TRANSITION_THRESHOLD,
            cluster_distance: DEFAULT_CLUSTER_DISTANCE,
        }
    }
}

/// Result of [`match_point`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    /// The matched dockmaster, or `None` when manual placement is required.
    pub matched: Option<DockmasterEntry>,
    pub confidence: f64,
    pub needs_verification: bool,
}

/// Finds the dockmaster that best corresponds to `(x, y)`.
///
/// Returns the matched entry (a clone, possibly tagged with
/// `transition_zone`) and a confidence in `[0, 1]`.  No match yields
/// `(None, 0.0)`.  `confidence_threshold` is part of the lookup contract but
/// does not influence the score; see [`should_prompt_for_verification`].
pub fn find_nearest(
    x: i32,
    y: i32,
    entries: &[DockmasterEntry],
    _confidence_threshold: f64,
) -> (Option<DockmasterEntry>, f64) {
    nearest_with_threshold(Point::new(x, y), entries, TRANSITION_THRESHOLD)
}

/// Returns `true` when `confidence` is too low to accept without review.
pub fn should_prompt_for_verification(confidence: f64, threshold: f64) -> bool {
    confidence < threshold
}

/// Looks up `(x, y)` and decides whether the result needs verification.
pub fn match_point(
    x: i32,
    y: i32,
    entries: &[DockmasterEntry],
    policy: &MatchPolicy,
) -> MatchOutcome {
    let (matched, confidence) =
        nearest_with_threshold(Point::new(x, y), entries, policy.transition_threshold);
    let needs_verification =
        matched.is_none() || should_prompt_for_verification(confidence, policy.confidence_threshold);
    MatchOutcome {
        matched,
        confidence,
        needs_verification,
    }
}

fn nearest_with_threshold(
    point: Point,
    entries: &[DockmasterEntry],
    transition_threshold: i32,
) -> (Option<DockmasterEntry>, f64) {
    let matchable: Vec<&DockmasterEntry> =
        entries.iter().filter(|e| !e.is_reference_point()).collect();
    if matchable.is_empty() {
        return (None, 0.0);
    }

    if in_xd_box(point) {
        let xd_only = matchable
            .iter()
            .copied()
            .filter(|e| e.zone_id.starts_with("XD"));
        return match rank_by_distance(point, xd_only).first() {
            Some(&(nearest, distance)) => {
                debug!(zone_id = %nearest.zone_id, distance, "XD match");
                (Some(nearest.clone()), XD_MATCH_CONFIDENCE)
            }
            None => (None, 0.0),
        };
    }

    let Some(zone) = zone_for(point) else {
        debug!(x = point.x, y = point.y, "point outside all zones");
        return (None, 0.0);
    };

    let valid = matchable.into_iter().filter(|e| {
        let north_in_xd = e.zone_id.ends_with("-N") && in_xd_box(point);
        !north_in_xd && validate_match(point, &e.zone_id)
    });
    let ranked = rank_by_distance(point, valid);

    let Some(&(nearest, nearest_distance)) = ranked.first() else {
        return (None, 0.0);
    };

    let mut confidence = 1.0;
    if let Some(&(_, second_distance)) = ranked.get(1) {
        // Both candidates exactly on the point: fully ambiguous.
        let ratio = if second_distance > 0.0 {
            nearest_distance / second_distance
        } else {
            1.0
        };
        confidence *= 1.0 - ratio;
    }

    let mut result = nearest.clone();
    if is_transition_point(point, transition_threshold) {
        confidence *= TRANSITION_FACTOR;
        result.transition_zone = Some(format!("transition_{zone}"));
    }
    if zone == ZoneName::Xd {
        confidence *= XD_ZONE_FACTOR;
    }

    debug!(
        zone_id = %result.zone_id,
        zone = %zone,
        distance = nearest_distance,
        confidence,
        "nearest dockmaster"
    );
    (Some(result), confidence)
}

/// Pairs each entry with its distance to `point`, nearest first.
///
/// The sort is stable, so equidistant entries keep their input order.
fn rank_by_distance<'a>(
    point: Point,
    entries: impl IntoIterator<Item = &'a DockmasterEntry>,
) -> Vec<(&'a DockmasterEntry, f64)> {
    let mut ranked: Vec<_> = entries
        .into_iter()
        .map(|e| (e, point.distance_to(e.point())))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// One or more dockmasters from every zone, plus two reference points.
    fn fixture() -> Vec<DockmasterEntry> {
        vec![
            DockmasterEntry::new("1A-W", 400, 300),
            DockmasterEntry::new("2A-W", 1000, 750),
            DockmasterEntry::new("3A-W", 1200, 900),
            DockmasterEntry::new("4A-W", 2000, 1500),
            DockmasterEntry::new("1B-S", 1500, 2700),
            DockmasterEntry::new("2B-S", 2000, 3700),
            DockmasterEntry::new("3B-S", 1500, 3800),
            DockmasterEntry::new("3A-E", 3800, 1000),
            DockmasterEntry::new("4A-E", 4500, 1500),
            DockmasterEntry::new("XD1", 3500, 2500),
            DockmasterEntry::new("XD2", 4000, 3000),
            DockmasterEntry::new("XD3", 4500, 3500),
            DockmasterEntry::new("REF-1", 6142, 3000),
            DockmasterEntry::new("REF-2", 3000, 6142),
        ]
    }

    fn nearest(x: i32, y: i32, entries: &[DockmasterEntry]) -> (Option<DockmasterEntry>, f64) {
        find_nearest(x, y, entries, DEFAULT_CONFIDENCE_THRESHOLD)
    }

    // ── XD branch ─────────────────────────────────────────────────────────────

    #[test]
    fn test_find_nearest_in_xd_returns_nearest_xd_with_fixed_confidence() {
        let (found, confidence) = nearest(3393, 3356, &fixture());
        assert_eq!(found.unwrap().zone_id, "XD2");
        assert_eq!(confidence, XD_MATCH_CONFIDENCE);
    }

    #[test]
    fn test_find_nearest_in_xd_ignores_closer_non_xd_entries() {
        let entries = vec![
            DockmasterEntry::new("7B-S", 3285, 3554),
            DockmasterEntry::new("XD9", 4900, 2100),
        ];
        let (found, _) = nearest(3300, 3550, &entries);
        assert_eq!(found.unwrap().zone_id, "XD9");
    }

    #[test]
    fn test_find_nearest_in_xd_without_xd_entries_returns_none() {
        let entries = vec![DockmasterEntry::new("7B-S", 3285, 3554)];
        assert_eq!(nearest(3300, 3550, &entries), (None, 0.0));
    }

    #[test]
    fn test_find_nearest_in_xd_does_not_tag_transition_zone() {
        // (3500, 3500) is inside XD and South at once.
        let (found, _) = nearest(3500, 3500, &fixture());
        assert!(found.unwrap().transition_zone.is_none());
    }

    // ── Directional zones ─────────────────────────────────────────────────────

    #[test]
    fn test_find_nearest_exact_hit_in_south_is_penalised_as_transition() {
        // x=1500 is a West region bound, so the point is a transition point.
        let (found, confidence) = nearest(1500, 2700, &fixture());
        let found = found.unwrap();
        assert_eq!(found.zone_id, "1B-S");
        assert_eq!(found.transition_zone.as_deref(), Some("transition_SOUTH"));
        assert!((confidence - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_find_nearest_east_only_considers_east_ids() {
        let (found, _) = nearest(4400, 1400, &fixture());
        assert_eq!(found.unwrap().zone_id, "4A-E");
    }

    #[test]
    fn test_find_nearest_dominant_candidate_has_full_confidence() {
        let (found, confidence) = nearest(2000, 1500, &fixture());
        let found = found.unwrap();
        assert_eq!(found.zone_id, "4A-W");
        assert!(found.transition_zone.is_none());
        assert_eq!(confidence, 1.0);
    }

    #[test]
    fn test_find_nearest_confidence_uses_distance_ratio() {
        let (found, confidence) = nearest(2100, 1500, &fixture());
        assert_eq!(found.unwrap().zone_id, "4A-W");
        // 4A-W is 100 away; runner-up 3A-W is sqrt(900² + 600²) away.
        let expected = 1.0 - 100.0 / 1_170_000f64.sqrt();
        assert!((confidence - expected).abs() < 1e-12);
    }

    #[test]
    fn test_find_nearest_confidence_drops_as_candidates_become_equidistant() {
        let dominant = vec![
            DockmasterEntry::new("1A-W", 2000, 1500),
            DockmasterEntry::new("2A-W", 2400, 1500),
        ];
        let contested = vec![
            DockmasterEntry::new("1A-W", 2000, 1500),
            DockmasterEntry::new("2A-W", 2220, 1500),
        ];
        let (_, high) = nearest(2010, 1500, &dominant);
        let (_, low) = nearest(2100, 1500, &contested);
        assert!(low < high, "contested {low} should be below dominant {high}");
    }

    #[test]
    fn test_find_nearest_tie_is_broken_by_input_order() {
        let entries = vec![
            DockmasterEntry::new("5C-W", 2100, 1500),
            DockmasterEntry::new("5D-W", 1900, 1500),
        ];
        let (found, confidence) = nearest(2000, 1500, &entries);
        assert_eq!(found.unwrap().zone_id, "5C-W");
        assert_eq!(confidence, 0.0);

        let reversed: Vec<_> = entries.into_iter().rev().collect();
        let (found, _) = nearest(2000, 1500, &reversed);
        assert_eq!(found.unwrap().zone_id, "5D-W");
    }

    #[test]
    fn test_find_nearest_two_candidates_on_the_point_yield_zero_confidence() {
        let entries = vec![
            DockmasterEntry::new("5C-W", 2000, 1500),
            DockmasterEntry::new("5C-W", 2000, 1500),
        ];
        let (found, confidence) = nearest(2000, 1500, &entries);
        assert!(found.is_some());
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn test_find_nearest_is_independent_of_entry_order() {
        let forward = fixture();
        let reversed: Vec<_> = fixture().into_iter().rev().collect();
        for (x, y) in [(2100, 1500), (3393, 3356), (4400, 1400), (1600, 2750)] {
            let a = nearest(x, y, &forward);
            let b = nearest(x, y, &reversed);
            assert_eq!(a, b, "({x}, {y})");
        }
    }

    #[test]
    fn test_find_nearest_confidence_always_within_unit_interval() {
        let entries = fixture();
        for x in (-500..=6500).step_by(250) {
            for y in (-500..=6500).step_by(250) {
                let (_, confidence) = nearest(x, y, &entries);
                assert!((0.0..=1.0).contains(&confidence), "({x}, {y}) -> {confidence}");
            }
        }
    }

    // ── No match ──────────────────────────────────────────────────────────────

    #[test]
    fn test_find_nearest_ignores_reference_points() {
        let entries = vec![
            DockmasterEntry::new("REF-1", 6142, 3000),
            DockmasterEntry::new("REF-2", 2000, 6142),
        ];
        assert_eq!(nearest(2000, 1500, &entries), (None, 0.0));
    }

    #[test]
    fn test_find_nearest_returns_none_for_empty_entries() {
        assert_eq!(nearest(2000, 1500, &[]), (None, 0.0));
    }

    #[test]
    fn test_find_nearest_returns_none_outside_all_zones() {
        assert_eq!(nearest(6000, 6000, &fixture()), (None, 0.0));
    }

    #[test]
    fn test_find_nearest_returns_none_when_no_direction_matches() {
        let entries = vec![DockmasterEntry::new("3A-E", 3800, 1000)];
        assert_eq!(nearest(400, 300, &entries), (None, 0.0));
    }

    // ── Verification ──────────────────────────────────────────────────────────

    #[test]
    fn test_should_prompt_for_verification_below_threshold_only() {
        assert!(should_prompt_for_verification(0.79, 0.8));
        assert!(!should_prompt_for_verification(0.8, 0.8));
        assert!(!should_prompt_for_verification(0.95, 0.8));
    }

    #[test]
    fn test_match_point_flags_low_confidence_for_verification() {
        let outcome = match_point(2100, 1500, &fixture(), &MatchPolicy::default());
        assert_eq!(outcome.matched.unwrap().zone_id, "4A-W");
        assert!(!outcome.needs_verification);

        let strict = MatchPolicy {
            confidence_threshold: 0.95,
            ..MatchPolicy::default()
        };
        assert!(match_point(2100, 1500, &fixture(), &strict).needs_verification);
    }

    #[test]
    fn test_match_point_without_match_needs_verification() {
        let outcome = match_point(6000, 6000, &fixture(), &MatchPolicy::default());
        assert!(outcome.matched.is_none());
        assert_eq!(outcome.confidence, 0.0);
        assert!(outcome.needs_verification);
    }

    #[test]
    fn test_match_point_uses_policy_transition_threshold() {
        // 4A-W is exactly on the point and dominates; no bound within 200.
        let loose = MatchPolicy {
            transition_threshold: 500,
            ..MatchPolicy::default()
        };
        let outcome = match_point(2000, 1500, &fixture(), &loose);
        assert!((outcome.confidence - 0.8).abs() < 1e-12);
        assert_eq!(
            outcome.matched.unwrap().transition_zone.as_deref(),
            Some("transition_WEST")
        );
    }
}
