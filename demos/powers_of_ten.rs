//! Powers of Ten
//!
//! Times `nth_prime(10^k)` on a freshly reset cache for k = 0..=8, the same
//! ladder the test suite checks against known values.
//!
//! Run with: cargo run --release --example powers_of_ten

use std::time::{Duration, Instant};

use primecache::PrimeCache;

const LADDER: [(u64, u64); 9] = [
    (1, 2),
    (10, 29),
    (100, 541),
    (1_000, 7_919),
    (10_000, 104_729),
    (100_000, 1_299_709),
    (1_000_000, 15_485_863),
    (10_000_000, 179_424_673),
    (100_000_000, 2_038_074_743),
];

/// "  1s,  234ms,   56us,  789ns"
fn format_duration(d: Duration) -> String {
    let ns = d.as_nanos();
    format!(
        "{:3}s, {:4}ms, {:4}us, {:4}ns",
        ns / 1_000_000_000,
        (ns / 1_000_000) % 1000,
        (ns / 1000) % 1000,
        ns % 1000
    )
}

fn main() {
    println!("=== n-th prime, powers of ten ===\n");

    let mut cache = PrimeCache::new();
    let mut all_correct = true;

    for (n, expected) in LADDER {
        cache.reset();

        let start = Instant::now();
        let prime = match cache.nth_prime(n) {
            Ok(p) => p,
            Err(e) => {
                println!("{:>12}: failed: {}", n, e);
                all_correct = false;
                continue;
            }
        };
        let elapsed = start.elapsed();

        let correct = prime == expected;
        all_correct &= correct;
        println!(
            "{:>12}: {:>12} ({}) - time: {}",
            n,
            prime,
            if correct { "Correct" } else { "Not Correct" },
            format_duration(elapsed)
        );
    }

    let stats = cache.stats();
    println!(
        "\nlast run: {} blocks, {} primes, {} bytes of storage",
        stats.blocks, stats.primes, stats.storage_bytes
    );
    println!("all correct: {}", all_correct);
}
