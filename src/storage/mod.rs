//! Backing storage for the prime cache and its pluggable allocation seam.

pub mod allocator;
pub mod buffer;

pub use allocator::{Allocator, Global, MemoryBudget};
pub use buffer::PrimeBuffer;
