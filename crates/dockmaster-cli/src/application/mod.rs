//! Application layer use cases for the `dockmaster` command.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer sits between the pure rules in `dockmaster_core`
//! and the infrastructure that reads files.  Use cases here orchestrate core
//! functions to fulfil one user goal and reach the registry only through the
//! [`RegistrySource`](crate::infrastructure::registry::RegistrySource) trait,
//! so tests can substitute an in-memory registry.
//!
//! # Sub-modules
//!
//! - **`lookup`**           – Read-only queries: which zone a point is in,
//!   which dockmaster it matches, and which dockmasters cluster at boundaries.
//! - **`apply_suggestion`** – Validate an approved suggestion, reconcile the
//!   registry with it, and publish the result.
//! - **`format_registry`**  – Rewrite the whole registry in canonical form.

pub mod apply_suggestion;
pub mod format_registry;
pub mod lookup;
