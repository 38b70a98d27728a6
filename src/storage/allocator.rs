//! Allocation strategies for prime storage.
//!
//! A strategy decides whether backing storage may grow. The actual bytes
//! always come from the system allocator through `Vec`; the strategy sees
//! every grow and release so it can refuse, account or log.

use core::cell::Cell;
use core::fmt;

use crate::error::AllocError;

/// Allocator strategy bound to a [`crate::PrimeCache`] at construction.
///
/// Sizes are in bytes. Every successful `grow` is eventually matched by a
/// `release` of the final size when the storage is reset or dropped.
pub trait Allocator: fmt::Debug {
    /// Approve resizing a buffer from `old_size` to `new_size` bytes.
    ///
    /// `new_size` is smaller than `old_size` only when a grant is rolled
    /// back after the system allocator failed; that call must succeed.
    fn grow(&self, old_size: usize, new_size: usize) -> Result<(), AllocError>;

    /// Storage of `size` bytes has been freed.
    fn release(&self, size: usize);
}

/// Default strategy: approve everything and leave failures to the system
/// allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl Allocator for Global {
    #[inline]
    fn grow(&self, _old_size: usize, _new_size: usize) -> Result<(), AllocError> {
        Ok(())
    }

    #[inline]
    fn release(&self, _size: usize) {}
}

/// Strategy that caps the total bytes held by every buffer bound to it.
///
/// Only the prime storage is counted. Per-block sieve scratch (32 KiB of
/// flags plus the block's survivors, kept between blocks until reset) and
/// the one-off 64 KiB flag array of the first block come from the system
/// allocator and are not charged to the budget.
///
/// Share one budget between several caches with `Rc`:
///
/// ```
/// use std::rc::Rc;
/// use primecache::{MemoryBudget, PrimeCache, SieveError};
///
/// let budget = Rc::new(MemoryBudget::new(4096));
/// let mut cache = PrimeCache::builder().allocator(budget.clone()).build().unwrap();
///
/// // 6542 primes below 65536 need far more than 4 KiB.
/// assert!(matches!(cache.nth_prime(1), Err(SieveError::OutOfMemory(_))));
/// assert!(cache.is_empty());
/// assert!(budget.in_use() <= budget.limit());
/// ```
#[derive(Debug)]
pub struct MemoryBudget {
    limit: usize,
    in_use: Cell<usize>,
    peak: Cell<usize>,
}

impl MemoryBudget {
    /// Create a budget of `limit` bytes.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            in_use: Cell::new(0),
            peak: Cell::new(0),
        }
    }

    /// The configured limit in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes currently held.
    pub fn in_use(&self) -> usize {
        self.in_use.get()
    }

    /// Highest value `in_use` has reached.
    pub fn peak(&self) -> usize {
        self.peak.get()
    }
}

impl Allocator for MemoryBudget {
    fn grow(&self, old_size: usize, new_size: usize) -> Result<(), AllocError> {
        let refused = AllocError { old_size, new_size };
        let held = self.in_use.get();

        let next = held
            .saturating_sub(old_size)
            .checked_add(new_size)
            .ok_or(refused)?;
        if next > self.limit {
            tracing::warn!(
                limit = self.limit,
                in_use = held,
                requested = new_size,
                "memory budget refused growth"
            );
            return Err(refused);
        }

        self.in_use.set(next);
        self.peak.set(self.peak.get().max(next));
        Ok(())
    }

    fn release(&self, size: usize) {
        let held = self.in_use.get();
        if size > held {
            tracing::warn!(size, in_use = held, "release exceeds tracked usage");
        }
        self.in_use.set(held.saturating_sub(size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_always_grants() {
        assert!(Global.grow(0, usize::MAX).is_ok());
        Global.release(usize::MAX);
    }

    #[test]
    fn budget_tracks_usage() {
        let budget = MemoryBudget::new(1024);
        budget.grow(0, 256).unwrap();
        budget.grow(256, 512).unwrap();
        assert_eq!(budget.in_use(), 512);

        budget.release(512);
        assert_eq!(budget.in_use(), 0);
        assert_eq!(budget.peak(), 512);
    }

    #[test]
    fn budget_refuses_over_limit() {
        let budget = MemoryBudget::new(1024);
        budget.grow(0, 768).unwrap();

        let err = budget.grow(768, 1536).unwrap_err();
        assert_eq!(
            err,
            AllocError {
                old_size: 768,
                new_size: 1536
            }
        );
        // A refused request leaves the accounting untouched.
        assert_eq!(budget.in_use(), 768);
    }

    #[test]
    fn budget_shared_between_buffers() {
        let budget = MemoryBudget::new(1000);
        budget.grow(0, 600).unwrap();
        assert!(budget.grow(0, 600).is_err());
        budget.grow(0, 400).unwrap();
        assert_eq!(budget.in_use(), 1000);
    }
}
