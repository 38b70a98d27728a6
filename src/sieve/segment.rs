//! Odd-only segmented sieve over one fixed-size block.
//!
//! A block covers `[start, start + BLOCK_SIZE)` for a block-aligned, non-zero
//! `start`. Even numbers there are all composite, so only odd candidates are
//! stored: compressed index `i` stands for `start + 2i + 1`. Marking every
//! odd multiple of `p` is then a stride of `p` in index space.

use alloc::vec::Vec;
use core::fmt;

use crate::utils::isqrt;

/// Number of consecutive integers covered by one block.
pub const BLOCK_SIZE: u64 = 1 << 16;

/// Odd candidates per block.
pub(crate) const HALF_BLOCK: usize = (BLOCK_SIZE / 2) as usize;

/// Compressed index of the smallest odd multiple of `p` that is `>= start`.
///
/// `start` is even and `p` is odd, so adding `p` to an even offset makes it
/// odd. The result may lie past the block for large `p`.
#[inline]
fn first_odd_multiple(start: u64, p: u64) -> usize {
    let mut offset = (start + p - 1) / p * p - start;
    if offset % 2 == 0 {
        offset += p;
    }
    (offset / 2) as usize
}

/// Reusable scratch space for sieving one block at a time.
pub(crate) struct SegmentSieve {
    composite: Vec<bool>,
    found: Vec<u64>,
}

impl SegmentSieve {
    pub fn new() -> Self {
        Self {
            composite: Vec::new(),
            found: Vec::new(),
        }
    }

    /// Sieve the block starting at `start` with `base`, the cached primes
    /// in ascending order beginning with 2.
    ///
    /// `base` must hold every prime up to `start`. Returns the primes of the
    /// block in ascending order; the slice is overwritten by the next call.
    pub fn sieve(&mut self, start: u64, base: &[u64]) -> &[u64] {
        assert!(
            start > 0 && start % BLOCK_SIZE == 0,
            "block start {} is not a positive multiple of {}",
            start,
            BLOCK_SIZE
        );
        assert_eq!(base.first(), Some(&2), "cached primes must start at 2");

        // Every composite below `end` has a prime factor <= bound. The bound
        // must already be sieved, so all those factors are in `base`.
        let end = start + BLOCK_SIZE;
        let bound = isqrt(end);
        assert!(
            bound < start,
            "sqrt bound {} reaches past frontier {}",
            bound,
            start
        );

        self.composite.clear();
        self.composite.resize(HALF_BLOCK, false);

        for &p in base[1..].iter().take_while(|&&p| p <= bound) {
            let step = p as usize;
            let mut i = first_odd_multiple(start, p);
            while i < HALF_BLOCK {
                self.composite[i] = true;
                i += step;
            }
        }

        self.found.clear();
        self.found.extend(
            self.composite
                .iter()
                .enumerate()
                .filter_map(|(i, &composite)| (!composite).then(|| start + 2 * i as u64 + 1)),
        );

        tracing::trace!(start, found = self.found.len(), "sieved block");
        &self.found
    }

    /// Free the scratch buffers. They are re-created on the next block.
    pub fn release(&mut self) {
        self.composite = Vec::new();
        self.found = Vec::new();
    }
}

impl fmt::Debug for SegmentSieve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentSieve")
            .field("scratch", &self.composite.capacity())
            .finish()
    }
}
