//! Error types for load-time operations.
//!
//! The per-frame path never returns errors: unknown names are ignored and
//! capacity overflow only drops instances from the draw.

use thiserror::Error;

/// Errors raised while configuring the simulation or allocating buffers.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The buffer allocator could not provide the requested region.
    #[error("Failed to allocate {requested} byte buffer: {reason}")]
    Allocation {
        /// Requested size in bytes.
        requested: usize,
        /// Allocator-specific reason.
        reason: String,
    },
}

/// Result alias using the crate error type.
pub type Result<T> = std::result::Result<T, Error>;
