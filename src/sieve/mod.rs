//! Prime generation: the dense bootstrap sieve, the odd-only segmented block
//! sieve, and the cache that drives them.

pub mod bootstrap;
pub mod cache;
mod segment;
pub mod view;

pub use bootstrap::one_shot_sieve;
pub use cache::{CacheBuilder, CacheStats, PrimeCache, SEARCH_CEILING};
pub use segment::BLOCK_SIZE;
pub use view::PrimeView;
