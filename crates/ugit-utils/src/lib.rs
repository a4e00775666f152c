//! Foundation utilities for the ugit version-control engine.
//!
//! Provides the atomic lock-file protocol used for every ref and index update,
//! and path normalization helpers for repository-relative paths.

mod error;
pub mod lockfile;
pub mod path;

pub use error::{LockError, UtilError};
pub use lockfile::LockFile;

/// Result alias for ugit-utils operations.
pub type Result<T> = std::result::Result<T, UtilError>;
