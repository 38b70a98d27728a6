//! Incremental prime discovery with a persistent, block-grown cache.
//!
//! [`PrimeCache`] answers "the n-th prime" and "all primes below a bound",
//! sieving only the blocks it has not seen yet. [`one_shot_sieve`] is a plain
//! dense sieve for small limits.

extern crate alloc;

pub mod error;
pub mod sieve;
pub mod storage;
pub mod utils;

pub use error::{AllocError, Result, SieveError};
pub use sieve::{
    one_shot_sieve, CacheBuilder, CacheStats, PrimeCache, PrimeView, BLOCK_SIZE, SEARCH_CEILING,
};
pub use storage::{Allocator, Global, MemoryBudget, PrimeBuffer};
pub use utils::{is_prime, isqrt};
