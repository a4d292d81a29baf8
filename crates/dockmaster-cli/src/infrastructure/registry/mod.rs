//! Persisted registry adapters.
//!
//! The application reads and replaces the registry through the
//! [`RegistrySource`] trait, so the same use cases run against the file on
//! disk ([`file::FileRegistry`]) and against an in-memory copy in tests
//! ([`mock::InMemoryRegistry`]).

use std::path::PathBuf;

use dockmaster_core::ChangeDescription;
use thiserror::Error;

pub mod file;
pub mod mock;

/// Errors raised while reading or replacing the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry not found at {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error accessing registry at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing store refused the replacement, e.g. a read-only file.
    #[error("registry rejected the change: {0}")]
    Rejected(String),
}

/// Where the registry text comes from and where its replacement goes.
#[cfg_attr(test, mockall::automock)]
pub trait RegistrySource {
    /// Returns the current registry text.
    fn fetch(&self) -> Result<String, RegistryError>;

    /// Replaces the registry with `text`, described by `change`.
    fn publish(&self, text: &str, change: &ChangeDescription) -> Result<(), RegistryError>;
}
