//! Coordinate-to-dockmaster matching.
//!
//! - **`nearest`**  – Nearest valid dockmaster for a point, with a confidence
//!   score and the verification decision built on top of it.
//! - **`clusters`** – Groups of dockmasters sharing an ambiguous boundary area.
//! - **`zone_id`**  – Formatting and syntax validation of user-entered zone IDs.

pub mod clusters;
pub mod nearest;
pub mod zone_id;

pub use clusters::{find_transition_zones, find_transition_zones_within};
pub use nearest::{
    find_nearest, match_point, should_prompt_for_verification, MatchOutcome, MatchPolicy,
    DEFAULT_CLUSTER_DISTANCE, DEFAULT_CONFIDENCE_THRESHOLD, XD_MATCH_CONFIDENCE,
};
pub use zone_id::{format_dockmaster_id, validate_dockmaster_id, ZoneIdError};
