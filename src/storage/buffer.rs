//! Owned, append-only storage for discovered primes.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;
use core::mem::size_of;

use super::allocator::{Allocator, Global};
use crate::error::AllocError;

/// Smallest capacity the buffer grows to on its first append.
pub const MIN_CAPACITY: usize = 32;

const ENTRY: usize = size_of::<u64>();

/// Growable `u64` buffer whose growth is approved by an [`Allocator`].
///
/// Capacity doubles on demand (starting at [`MIN_CAPACITY`]). Growth is
/// checked against the strategy before the `Vec` is touched, and all
/// appends that could fail happen through [`PrimeBuffer::reserve`], so a
/// failed append never leaves a partially written block behind.
pub struct PrimeBuffer {
    items: Vec<u64>,
    /// Capacity as granted by the allocator. `items.capacity()` may exceed it.
    capacity: usize,
    allocator: Rc<dyn Allocator>,
}

impl PrimeBuffer {
    /// Empty buffer using the [`Global`] strategy.
    pub fn new() -> Self {
        Self::with_allocator(Rc::new(Global))
    }

    /// Empty buffer bound to `allocator`. Nothing is allocated yet.
    pub fn with_allocator(allocator: Rc<dyn Allocator>) -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
            allocator,
        }
    }

    /// The bound allocator strategy.
    pub fn allocator(&self) -> &Rc<dyn Allocator> {
        &self.allocator
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries that fit without asking the allocator again.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes currently granted by the allocator.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.capacity * ENTRY
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.items
    }

    /// Ensure room for `additional` more entries.
    ///
    /// Grows to at least double the current capacity so repeated small
    /// reservations stay amortized O(1).
    pub fn reserve(&mut self, additional: usize) -> Result<(), AllocError> {
        let needed = self
            .items
            .len()
            .checked_add(additional)
            .ok_or_else(|| self.refusal(usize::MAX))?;
        if needed <= self.capacity {
            return Ok(());
        }

        let doubled = self.capacity.saturating_mul(2).max(MIN_CAPACITY);
        self.grow_to(needed.max(doubled))
    }

    /// Ensure the total capacity is at least `total` entries, without the
    /// doubling slack of [`PrimeBuffer::reserve`].
    pub fn reserve_total(&mut self, total: usize) -> Result<(), AllocError> {
        if total <= self.capacity {
            return Ok(());
        }
        self.grow_to(total)
    }

    /// Append one entry, growing if needed.
    pub fn push(&mut self, value: u64) -> Result<(), AllocError> {
        self.reserve(1)?;
        self.items.push(value);
        Ok(())
    }

    /// Append a run of entries after reserving room for all of them.
    pub fn extend_from_slice(&mut self, values: &[u64]) -> Result<(), AllocError> {
        self.reserve(values.len())?;
        self.items.extend_from_slice(values);
        Ok(())
    }

    /// Drop every entry and hand the storage back to the allocator.
    ///
    /// The allocator binding is kept.
    pub fn release(&mut self) {
        if self.capacity > 0 {
            tracing::debug!(bytes = self.allocated_bytes(), "releasing prime storage");
            self.allocator.release(self.allocated_bytes());
        }
        self.items = Vec::new();
        self.capacity = 0;
    }

    fn grow_to(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        let old_size = self.allocated_bytes();
        let new_size = new_capacity
            .checked_mul(ENTRY)
            .ok_or_else(|| self.refusal(usize::MAX))?;

        self.allocator.grow(old_size, new_size)?;
        if self
            .items
            .try_reserve_exact(new_capacity - self.items.len())
            .is_err()
        {
            let rolled_back = self.allocator.grow(new_size, old_size);
            debug_assert!(rolled_back.is_ok(), "allocator refused a rollback");
            tracing::warn!(old_size, new_size, "system allocator refused growth");
            return Err(AllocError { old_size, new_size });
        }

        tracing::debug!(from = self.capacity, to = new_capacity, "grew prime storage");
        self.capacity = new_capacity;
        Ok(())
    }

    fn refusal(&self, new_size: usize) -> AllocError {
        AllocError {
            old_size: self.allocated_bytes(),
            new_size,
        }
    }
}

impl Default for PrimeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PrimeBuffer {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for PrimeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimeBuffer")
            .field("len", &self.items.len())
            .field("capacity", &self.capacity)
            .field("allocator", &self.allocator)
            .finish()
    }
}
