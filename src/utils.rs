/// Integer square root: the largest `r` with `r * r <= n`.
///
/// Newton iteration on integers only, so it is exact over the whole `u64`
/// range. The sieve relies on this never undercounting; a bound one too
/// small would let composites through as primes.
pub const fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }

    // 2^ceil(bits/2) is always >= sqrt(n), so the iteration descends
    // monotonically and x + n / x stays below 2^33.
    let bits = 64 - n.leading_zeros();
    let mut x = 1u64 << ((bits + 1) / 2);
    loop {
        let next = (x + n / x) / 2;
        if next >= x {
            return x;
        }
        x = next;
    }
}

/// Check if `n` is a prime number.
///
/// Trial division by odd numbers up to `isqrt(n)`. Meant for validating
/// results in tests and assertions; use [`crate::PrimeCache`] for bulk work.
pub const fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let limit = isqrt(n);
    let mut d = 3;
    while d <= limit {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isqrt_small() {
        let expected = [0, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 4];
        for (n, &r) in expected.iter().enumerate() {
            assert_eq!(isqrt(n as u64), r, "isqrt({})", n);
        }
    }

    #[test]
    fn isqrt_perfect_squares_and_neighbours() {
        for r in (1u64..5000).chain([65535, 65536, 1 << 30, (1 << 32) - 1]) {
            let sq = r * r;
            assert_eq!(isqrt(sq), r);
            assert_eq!(isqrt(sq - 1), r - 1);
            if let Some(next) = sq.checked_add(1) {
                assert_eq!(isqrt(next), r);
            }
        }
    }

    #[test]
    fn isqrt_near_ceiling() {
        // Around 2^60, where an f64-based root would lose precision.
        let r = 1u64 << 30;
        assert_eq!(isqrt(1 << 60), r);
        assert_eq!(isqrt((1 << 60) - 1), r - 1);
        assert_eq!(isqrt(u64::MAX), u32::MAX as u64);

        let n = (1u64 << 60) + 12345;
        let root = isqrt(n);
        assert!(root * root <= n);
        assert!((root + 1) * (root + 1) > n);
    }

    #[test]
    fn below_two_and_evens() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(!is_prime(4));
        assert!(!is_prime(65536));
        assert!(!is_prime(1 << 60));
    }

    #[test]
    fn primes_around_block_edges() {
        // Last prime below and first prime above each of the first block edges.
        for (below, above) in [(65521, 65537), (131071, 131101), (196597, 196613)] {
            assert!(is_prime(below));
            assert!(is_prime(above));
            assert!(((below + 1)..above).all(|n| !is_prime(n)));
        }
        // Largest prime below 2^32, where the segment sqrt bound crosses 65536.
        assert!(is_prime(4_294_967_291));
    }

    #[test]
    fn prime_squares_past_block_edges_are_composite() {
        // 257 is the first prime above isqrt(65536). Its square, in the second
        // block, is the smallest integer whose least factor is 257.
        assert_eq!(isqrt(65536), 256);
        assert!(!is_prime(257 * 257));
        assert!(!is_prime(251 * 257));
        assert!(!is_prime(65521 * 65521));
        assert!(!is_prime(65521 * 65537));
        assert!(!is_prime(65537 * 65537));
    }

    #[test]
    fn known_nth_primes() {
        assert!(is_prime(7919)); // 1000th
        assert!(is_prime(1_299_709)); // 100000th
        assert!(is_prime(15_485_863)); // 1000000th
    }
}
