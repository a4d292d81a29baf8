//! Read-only registry queries.

use dockmaster_core::domain::zone::{is_transition_point, zone_for};
use dockmaster_core::matcher::find_transition_zones_within;
use dockmaster_core::{
    load_entries, match_point, DockmasterEntry, LoadReport, MatchOutcome, MatchPolicy, Point,
    ZoneName,
};
use serde::Serialize;
use tracing::debug;

use crate::infrastructure::registry::{RegistryError, RegistrySource};

/// Zone classification of a single point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneReport {
    pub x: i32,
    pub y: i32,
    /// `None` when the point lies outside every zone.
    pub zone: Option<ZoneName>,
    pub transition: bool,
}

/// Classifies `(x, y)` without consulting the registry.
pub fn describe_zone(x: i32, y: i32, policy: &MatchPolicy) -> ZoneReport {
    let point = Point::new(x, y);
    ZoneReport {
        x,
        y,
        zone: zone_for(point),
        transition: is_transition_point(point, policy.transition_threshold),
    }
}

/// Fetches the registry and parses it into entries.
///
/// # Errors
///
/// Propagates the [`RegistryError`] from `fetch`.
pub fn load_registry<R: RegistrySource + ?Sized>(registry: &R) -> Result<LoadReport, RegistryError> {
    let text = registry.fetch()?;
    Ok(load_entries(&text))
}

/// Matches `(x, y)` against the current registry.
///
/// # Errors
///
/// Propagates the [`RegistryError`] from `fetch`.
pub fn match_coordinates<R: RegistrySource + ?Sized>(
    registry: &R,
    x: i32,
    y: i32,
    policy: &MatchPolicy,
) -> Result<MatchOutcome, RegistryError> {
    let report = load_registry(registry)?;
    debug!(entries = report.entries.len(), x, y, "matching coordinates");
    Ok(match_point(x, y, &report.entries, policy))
}

/// Groups registry entries that share a boundary area.
///
/// # Errors
///
/// Propagates the [`RegistryError`] from `fetch`.
pub fn transition_clusters<R: RegistrySource + ?Sized>(
    registry: &R,
    policy: &MatchPolicy,
) -> Result<Vec<Vec<DockmasterEntry>>, RegistryError> {
    let report = load_registry(registry)?;
    Ok(find_transition_zones_within(
        &report.entries,
        policy.cluster_distance,
        policy.transition_threshold,
    ))
}
