//! Error types for cache growth and configuration.
//!
//! Only conditions reachable with legitimate (if very large) inputs are
//! surfaced here. Contract violations such as a zero index or a corrupted
//! cache panic instead.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, SieveError>;

/// An allocator strategy (or the system allocator) refused to grow storage.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("allocation refused: cannot grow from {old_size} to {new_size} bytes")]
pub struct AllocError {
    /// Bytes held before the request.
    pub old_size: usize,
    /// Bytes requested.
    pub new_size: usize,
}

/// Recoverable failures of the prime cache.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SieveError {
    /// Backing storage could not grow.
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] AllocError),

    /// Sieving the next block would push the frontier to the search ceiling.
    #[error("search bound exceeded: frontier {frontier} cannot advance past ceiling {ceiling}")]
    SearchBoundExceeded { frontier: u64, ceiling: u64 },

    /// A configured ceiling is outside `(BLOCK_SIZE, SEARCH_CEILING]`.
    #[error("invalid search ceiling: {ceiling}")]
    InvalidCeiling { ceiling: u64 },
}
