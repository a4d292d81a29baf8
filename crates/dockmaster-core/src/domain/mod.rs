//! Domain entities for the dockmaster registry.
//!
//! Pure types with no I/O: the static zone table, registry entries, and the
//! suggestions that request changes to the registry.

pub mod entry;
pub mod suggestion;
pub mod zone;

pub use entry::{DockmasterEntry, DEFAULT_MAP, REFERENCE_SENTINEL};
pub use suggestion::{ChangeDescription, RegistryChange, Suggestion, SuggestionAction};
pub use zone::{Point, Region, Zone, ZoneName};
