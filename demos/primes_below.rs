//! Primes Below a Bound
//!
//! Shows `primes_below` for a composite and a prime bound, and how a view
//! relates to `nth_prime`.
//!
//! Run with: cargo run --example primes_below

use primecache::PrimeCache;

fn show(cache: &mut PrimeCache, bound: u64) {
    println!("--- primes below {} ---\n", bound);

    let count = {
        let view = cache.primes_below(bound).expect("bound is far below the ceiling");
        println!("{}", view);
        view.len() as u64
    };

    let next = cache.nth_prime(count + 1).expect("next prime is in reach");
    println!("count = {}", count);
    println!("nth_prime(count + 1) = {}", next);
    if next == bound {
        println!("the bound itself is prime and excluded from the view");
    }
    println!();
}

fn main() {
    let mut cache = PrimeCache::new();

    show(&mut cache, 100);
    show(&mut cache, 11);

    // Both queries were answered from the first block.
    println!("frontier = {}, cached primes = {}", cache.frontier(), cache.len());

    let first_ten = cache.primes_up_to_nth(10).expect("first block holds these");
    println!("first ten primes: {}", first_ten);
}
