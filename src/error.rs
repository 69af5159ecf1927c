//! Failure modes of map operations.
//!
//! A missing key is not an error: lookups and removals report it as
//! `None`.

use thiserror::Error;

/// Result alias for fallible map operations.
pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A required input was unusable, e.g. a zero bucket count.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Backing storage could not be obtained. The map is unchanged.
    #[error("failed to allocate {bytes} bytes for {what}")]
    Allocation { what: &'static str, bytes: usize },
}
