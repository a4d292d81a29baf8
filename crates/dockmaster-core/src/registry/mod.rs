//! The dockmaster registry text format.
//!
//! - **`line`**      – Line classification, row shapes and normalisation.
//! - **`sort`**      – Zone ID ordering.
//! - **`reconcile`** – Applying a change and rewriting the text.
//! - **`load`**      – Reading the text into typed entries for matching.

pub mod line;
pub mod load;
pub mod reconcile;
pub mod sort;

pub use line::{canonical_enabled, parse_line, ParsedLine, RawRow, RegistryLine};
pub use load::{load_entries, LineDiagnostic, LoadReport};
pub use reconcile::{
    full_format_fix, reconcile, FormatFixOptions, ReconcileError, RegistryDocument,
    DEFAULT_MIN_LINES,
};
pub use sort::{sort_zone_id, ZoneSortKey};
