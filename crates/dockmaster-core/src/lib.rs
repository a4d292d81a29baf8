//! # dockmaster-core
//!
//! Shared library for the dockmaster registry containing the zone model, the
//! coordinate matcher, and the registry text reconciler.
//!
//! This crate is used by the `dockmaster` command-line application.
//! It has zero dependencies on the file system, network, or any async runtime:
//! every operation is a pure function of its inputs.
//!
//! # Architecture overview
//!
//! Dockmasters are points of interest on a game map.  Players suggest new
//! locations (or removals), admins approve them, and the approved change is
//! written back to a flat, tab-delimited registry file that is maintained by
//! hand and therefore carries years of inconsistent formatting.
//!
//! This crate defines:
//!
//! - **`domain`** – The static zone table (XD, South, East, West) made of
//!   overlapping rectangles, the entry and suggestion types, and transition
//!   detection near zone boundaries.
//!
//! - **`matcher`** – "Which dockmaster is at these coordinates?"  Nearest-match
//!   search restricted to the zone's direction, a confidence score, transition
//!   clustering, and zone-ID syntax validation.
//!
//! - **`registry`** – Parsing of the legacy registry text (3, 4 or 5+ columns,
//!   tabs or spaces, comments, pasted `+` diff markers), applying one add or
//!   remove, and re-emitting the whole file in canonical sorted form.

pub mod domain;
pub mod matcher;
pub mod registry;

// Re-export the most-used types at the crate root so callers can write
// `dockmaster_core::Point` instead of `dockmaster_core::domain::zone::Point`.
pub use domain::entry::DockmasterEntry;
pub use domain::suggestion::{
    ChangeDescription, RegistryChange, Suggestion, SuggestionAction, SuggestionError,
};
pub use domain::zone::{Direction, Point, Region, Zone, ZoneName, XD_BOUNDS};
pub use matcher::{
    find_nearest, find_transition_zones, format_dockmaster_id, match_point,
    should_prompt_for_verification, validate_dockmaster_id, MatchOutcome, MatchPolicy,
    ZoneIdError, XD_MATCH_CONFIDENCE,
};
pub use registry::{
    full_format_fix, load_entries, reconcile, sort_zone_id, FormatFixOptions, LineDiagnostic,
    LoadReport, ReconcileError, RegistryLine, ZoneSortKey,
};
