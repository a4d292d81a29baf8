//! Infrastructure layer for the command-line application.
//!
//! Contains the adapters that touch the outside world: the TOML config file
//! and the persisted registry.
//!
//! **Dependency rule**: this layer may depend on `dockmaster_core`, but the
//! `application` layer only sees it through the [`registry::RegistrySource`]
//! trait.

pub mod registry;
pub mod storage;
