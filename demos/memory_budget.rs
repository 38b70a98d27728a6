//! Memory Budget
//!
//! Binds a cache to a `MemoryBudget` and shows queries that fit succeeding,
//! a query that does not fit failing with `OutOfMemory`, and the cache
//! staying usable afterwards.
//!
//! Run with: cargo run --example memory_budget

use std::rc::Rc;

use primecache::{MemoryBudget, PrimeCache, SieveError};

fn main() {
    let budget = Rc::new(MemoryBudget::new(1 << 22));
    let mut cache = PrimeCache::builder()
        .allocator(budget.clone())
        .build()
        .expect("default ceiling is valid");

    println!("=== Memory budget of {} bytes ===\n", budget.limit());

    for n in [1_000u64, 100_000, 1_000_000] {
        match cache.nth_prime(n) {
            Ok(p) => println!("nth_prime({}) = {}  (in use: {} bytes)", n, p, budget.in_use()),
            Err(SieveError::OutOfMemory(e)) => println!("nth_prime({}) refused: {}", n, e),
            Err(e) => println!("nth_prime({}) failed: {}", n, e),
        }
    }

    println!();
    println!("cache still holds {} primes up to {}", cache.len(), cache.frontier());
    println!("peak usage: {} bytes", budget.peak());

    cache.reset();
    println!("after reset: {} bytes in use", budget.in_use());
}
