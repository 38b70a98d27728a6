//! The incremental prime cache and its query layer.
//!
//! The cache owns every prime found so far and a frontier up to which the
//! number line is fully sieved. Queries grow the cache one block at a time
//! until they can be answered, so repeated or smaller queries are free.

use alloc::rc::Rc;
use alloc::vec::Vec;

use super::bootstrap;
use super::segment::{SegmentSieve, BLOCK_SIZE, HALF_BLOCK};
use super::view::PrimeView;
use crate::error::{AllocError, Result, SieveError};
use crate::storage::{Allocator, Global, PrimeBuffer};

/// Hard upper limit for the frontier: 2^60.
pub const SEARCH_CEILING: u64 = 1 << 60;

/// Point-in-time summary of a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    /// Every integer below this has been sieved.
    pub frontier: u64,
    /// Number of primes cached.
    pub primes: u64,
    /// Blocks sieved since construction or the last reset.
    pub blocks: u64,
    /// Bytes granted to the prime storage.
    pub storage_bytes: u64,
}

/// Incrementally grown cache of every prime up to a frontier.
///
/// # Example
///
/// ```
/// use primecache::PrimeCache;
///
/// let mut cache = PrimeCache::new();
/// assert_eq!(cache.nth_prime(1000).unwrap(), 7919);
///
/// let below = cache.primes_below(30).unwrap();
/// assert_eq!(below, [2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
/// ```
#[derive(Debug)]
pub struct PrimeCache {
    primes: PrimeBuffer,
    frontier: u64,
    ceiling: u64,
    segment: SegmentSieve,
}

impl PrimeCache {
    /// Empty cache with the [`Global`] allocator and the 2^60 ceiling.
    pub fn new() -> Self {
        Self::from_parts(Rc::new(Global), SEARCH_CEILING)
    }

    /// Configure allocator and ceiling before building a cache.
    pub fn builder() -> CacheBuilder {
        CacheBuilder::default()
    }

    fn from_parts(allocator: Rc<dyn Allocator>, ceiling: u64) -> Self {
        Self {
            primes: PrimeBuffer::with_allocator(allocator),
            frontier: 0,
            ceiling,
            segment: SegmentSieve::new(),
        }
    }

    /// Every integer below the frontier has been sieved.
    #[inline]
    pub fn frontier(&self) -> u64 {
        self.frontier
    }

    /// The configured search ceiling.
    #[inline]
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Number of primes cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// The bound allocator strategy.
    pub fn allocator(&self) -> &Rc<dyn Allocator> {
        self.primes.allocator()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            frontier: self.frontier,
            primes: self.primes.len() as u64,
            blocks: self.frontier / BLOCK_SIZE,
            storage_bytes: self.primes.allocated_bytes() as u64,
        }
    }

    /// Every prime discovered so far, without generating more.
    pub fn known_primes(&self) -> PrimeView<'_> {
        PrimeView::new(self.primes.as_slice())
    }

    /// Drop all primes and release storage, keeping the allocator and
    /// ceiling. The cache behaves exactly like a new one afterwards.
    pub fn reset(&mut self) {
        tracing::debug!(frontier = self.frontier, primes = self.len(), "resetting prime cache");
        self.primes.release();
        self.segment.release();
        self.frontier = 0;
    }

    /// Sieve the next block and return how many primes it added.
    ///
    /// On error the cache is unchanged.
    pub fn generate_block(&mut self) -> Result<u64> {
        debug_assert_eq!(self.frontier % BLOCK_SIZE, 0);

        let next = self.frontier + BLOCK_SIZE;
        if next >= self.ceiling {
            tracing::warn!(
                frontier = self.frontier,
                ceiling = self.ceiling,
                "refusing to sieve past the search ceiling"
            );
            return Err(SieveError::SearchBoundExceeded {
                frontier: self.frontier,
                ceiling: self.ceiling,
            });
        }

        let added = if self.frontier == 0 {
            self.bootstrap()?
        } else {
            let found = self.segment.sieve(self.frontier, self.primes.as_slice());
            self.primes.extend_from_slice(found)?;
            found.len()
        };

        self.frontier = next;
        Ok(added as u64)
    }

    /// The first block is sieved densely; it has no cached divisors yet and
    /// it is where 2 comes from.
    fn bootstrap(&mut self) -> core::result::Result<usize, AllocError> {
        assert!(self.primes.is_empty(), "bootstrap on a non-empty cache");

        let mut seed = Vec::new();
        bootstrap::sieve_into(BLOCK_SIZE - 1, &mut seed);
        self.primes.extend_from_slice(&seed)?;

        tracing::debug!(primes = seed.len(), "bootstrapped prime cache");
        Ok(seed.len())
    }

    /// Sieve until every integer below `bound` is covered.
    ///
    /// May sieve past `bound` up to the next block boundary.
    pub fn generate_below(&mut self, bound: u64) -> Result<()> {
        while self.frontier < bound {
            self.generate_block()?;
        }
        Ok(())
    }

    /// Sieve until at least `n` primes are cached.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`; queries are 1-indexed.
    pub fn generate_until_nth(&mut self, n: u64) -> Result<()> {
        let wanted = self.count(n)?;
        if self.primes.len() >= wanted {
            return Ok(());
        }

        // The last block overshoots `wanted` by at most one block's worth of
        // odd candidates, so this single reservation covers the whole loop.
        self.primes.reserve_total(wanted.saturating_add(HALF_BLOCK))?;
        while self.primes.len() < wanted {
            self.generate_block()?;
        }
        Ok(())
    }

    /// The `n`-th prime, 1-indexed.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn nth_prime(&mut self, n: u64) -> Result<u64> {
        self.generate_until_nth(n)?;
        let index = self.count(n)? - 1;
        Ok(self.primes.as_slice()[index])
    }

    /// The first `n` primes.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn primes_up_to_nth(&mut self, n: u64) -> Result<PrimeView<'_>> {
        self.generate_until_nth(n)?;
        let n = self.count(n)?;
        Ok(PrimeView::new(&self.primes.as_slice()[..n]))
    }

    /// Every prime strictly less than `bound`.
    pub fn primes_below(&mut self, bound: u64) -> Result<PrimeView<'_>> {
        self.generate_below(bound)?;
        let primes = self.primes.as_slice();
        // First index whose prime is >= bound; a prime bound is excluded.
        let low = primes.partition_point(|&p| p < bound);
        Ok(PrimeView::new(&primes[..low]))
    }

    /// Whether `n` is prime, answered from the cache.
    pub fn is_prime(&mut self, n: u64) -> Result<bool> {
        self.generate_below(n.saturating_add(1))?;
        Ok(self.primes.as_slice().binary_search(&n).is_ok())
    }

    /// Validate a 1-indexed count and convert it for slicing.
    ///
    /// A count that does not fit in `usize` is more primes than the storage
    /// could ever hold, so it is reported as the allocation it would need.
    fn count(&self, n: u64) -> Result<usize> {
        assert!(n != 0, "prime queries are 1-indexed; n must be at least 1");
        usize::try_from(n).map_err(|_| SieveError::OutOfMemory(self.storage_request(n)))
    }

    /// The refusal for growing the prime storage to hold `n` entries.
    fn storage_request(&self, n: u64) -> AllocError {
        let bytes = n.saturating_mul(core::mem::size_of::<u64>() as u64);
        AllocError {
            old_size: self.primes.allocated_bytes(),
            new_size: usize::try_from(bytes).unwrap_or(usize::MAX),
        }
    }
}

impl Default for PrimeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a [`PrimeCache`] with a custom allocator or ceiling.
///
/// ```
/// use std::rc::Rc;
/// use primecache::{MemoryBudget, PrimeCache, BLOCK_SIZE};
///
/// let cache = PrimeCache::builder()
///     .allocator(Rc::new(MemoryBudget::new(1 << 20)))
///     .ceiling(64 * BLOCK_SIZE)
///     .build()
///     .unwrap();
/// assert_eq!(cache.ceiling(), 64 * BLOCK_SIZE);
/// ```
#[derive(Debug, Clone)]
pub struct CacheBuilder {
    allocator: Rc<dyn Allocator>,
    ceiling: u64,
}

impl CacheBuilder {
    /// Bind an allocator strategy. It survives [`PrimeCache::reset`].
    pub fn allocator(mut self, allocator: Rc<dyn Allocator>) -> Self {
        self.allocator = allocator;
        self
    }

    /// Lower the search ceiling. Must lie in `(BLOCK_SIZE, SEARCH_CEILING]`.
    pub fn ceiling(mut self, ceiling: u64) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub fn build(self) -> Result<PrimeCache> {
        if self.ceiling <= BLOCK_SIZE || self.ceiling > SEARCH_CEILING {
            return Err(SieveError::InvalidCeiling {
                ceiling: self.ceiling,
            });
        }
        Ok(PrimeCache::from_parts(self.allocator, self.ceiling))
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self {
            allocator: Rc::new(Global),
            ceiling: SEARCH_CEILING,
        }
    }
}
