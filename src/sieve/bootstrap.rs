//! One-shot dense Sieve of Eratosthenes.
//!
//! Memory is one flag per integer up to the limit, so this is only meant for
//! small limits. The cache uses it exactly once, for its first block.

use alloc::vec;
use alloc::vec::Vec;

/// All primes `<= limit`, ascending.
///
/// # Panics
///
/// Panics if `limit + 1` flags cannot be addressed on this platform.
///
/// # Example
///
/// ```
/// use primecache::one_shot_sieve;
///
/// assert_eq!(one_shot_sieve(20), vec![2, 3, 5, 7, 11, 13, 17, 19]);
/// assert_eq!(one_shot_sieve(1000).len(), 168);
/// ```
pub fn one_shot_sieve(limit: u64) -> Vec<u64> {
    let mut primes = Vec::new();
    sieve_into(limit, &mut primes);
    primes
}

/// Append every prime `<= limit` to `out`, ascending.
///
/// `out` is left untouched when `limit < 2`.
pub(crate) fn sieve_into(limit: u64, out: &mut Vec<u64>) {
    if limit < 2 {
        return;
    }
    let n = match usize::try_from(limit).ok().filter(|&n| n < usize::MAX) {
        Some(n) => n,
        None => panic!("one-shot sieve limit {} is not addressable", limit),
    };

    let mut composite = vec![false; n + 1];
    composite[0] = true;
    composite[1] = true;
    for flag in composite.iter_mut().skip(4).step_by(2) {
        *flag = true;
    }

    let first = out.len();
    out.push(2);

    // Evens are already gone, so only odd multiples c*3, c*5, ... need marking.
    let mut candidate = 3;
    while candidate <= n {
        if !composite[candidate] {
            out.push(candidate as u64);

            let step = candidate * 2;
            let mut multiple = candidate.saturating_mul(3);
            while multiple <= n {
                composite[multiple] = true;
                multiple = match multiple.checked_add(step) {
                    Some(m) => m,
                    None => break,
                };
            }
        }
        candidate += 2;
    }

    assert_eq!(out[first], 2, "dense sieve must emit 2 first");
}
