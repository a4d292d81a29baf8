//! Grouping of dockmasters that sit in ambiguous transition areas.

use std::collections::HashSet;

use crate::domain::entry::DockmasterEntry;
use crate::domain::zone::{is_transition_point, TRANSITION_THRESHOLD};

/// Groups transition-point entries that lie within `distance_threshold` of a
/// seed entry.
///
/// Entries are visited in input order; each unclaimed transition entry seeds a
/// cluster made of itself plus every other unclaimed transition entry within
/// range of the seed.  Clusters of one are dropped.  Once an entry's zone ID
/// has joined a cluster it is never considered again.  Reference points are
/// ignored throughout.
pub fn find_transition_zones(
    entries: &[DockmasterEntry],
    distance_threshold: f64,
) -> Vec<Vec<DockmasterEntry>> {
    find_transition_zones_within(entries, distance_threshold, TRANSITION_THRESHOLD)
}

/// [`find_transition_zones`] with an explicit boundary-proximity threshold.
pub fn find_transition_zones_within(
    entries: &[DockmasterEntry],
    distance_threshold: f64,
    transition_threshold: i32,
) -> Vec<Vec<DockmasterEntry>> {
    let in_transition =
        |e: &DockmasterEntry| !e.is_reference_point() && is_transition_point(e.point(), transition_threshold);

    let mut claimed: HashSet<&str> = HashSet::new();
    let mut clusters = Vec::new();

    for seed in entries {
        if claimed.contains(seed.zone_id.as_str()) || !in_transition(seed) {
            continue;
        }

        let mut cluster = vec![seed];
        for other in entries {
            if other.zone_id == seed.zone_id || claimed.contains(other.zone_id.as_str()) {
                continue;
            }
            if in_transition(other) && seed.point().distance_to(other.point()) <= distance_threshold {
                cluster.push(other);
            }
        }

        if cluster.len() > 1 {
            claimed.extend(cluster.iter().map(|e| e.zone_id.as_str()));
            clusters.push(cluster.into_iter().cloned().collect());
        }
    }

    clusters
}
