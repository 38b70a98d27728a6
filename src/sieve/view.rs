//! Borrowed, read-only windows over a cache's primes.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

/// A bounded, read-only view over a prefix of a [`crate::PrimeCache`].
///
/// The view borrows the cache, so the cache cannot generate more primes
/// (and possibly move its storage) while the view is alive. Use
/// [`PrimeView::to_vec`] to keep the primes past that point.
///
/// ```compile_fail
/// use primecache::PrimeCache;
///
/// let mut cache = PrimeCache::new();
/// let small = cache.primes_below(100).unwrap();
/// cache.generate_below(10_000_000).unwrap(); // storage may move here
/// println!("{}", small.len());
/// ```
///
/// ```
/// use primecache::PrimeCache;
///
/// let mut cache = PrimeCache::new();
/// let small = cache.primes_below(100).unwrap().to_vec();
/// cache.generate_below(10_000_000).unwrap();
/// assert_eq!(small.len(), 25);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimeView<'a> {
    primes: &'a [u64],
}

impl<'a> PrimeView<'a> {
    pub(crate) fn new(primes: &'a [u64]) -> Self {
        Self { primes }
    }

    /// The primes in this view, ascending.
    #[inline]
    pub fn as_slice(&self) -> &'a [u64] {
        self.primes
    }

    /// Largest prime in the view.
    #[inline]
    pub fn last(&self) -> Option<u64> {
        self.primes.last().copied()
    }

    /// Whether `n` is one of the primes in this view.
    pub fn contains(&self, n: u64) -> bool {
        self.primes.binary_search(&n).is_ok()
    }

    /// Owned copy, independent of the cache.
    pub fn to_vec(&self) -> Vec<u64> {
        self.primes.to_vec()
    }
}

impl Deref for PrimeView<'_> {
    type Target = [u64];

    #[inline]
    fn deref(&self) -> &[u64] {
        self.primes
    }
}

impl AsRef<[u64]> for PrimeView<'_> {
    fn as_ref(&self) -> &[u64] {
        self.primes
    }
}

impl<'a> IntoIterator for PrimeView<'a> {
    type Item = &'a u64;
    type IntoIter = core::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.primes.iter()
    }
}

impl<'a> IntoIterator for &PrimeView<'a> {
    type Item = &'a u64;
    type IntoIter = core::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.primes.iter()
    }
}

impl PartialEq<[u64]> for PrimeView<'_> {
    fn eq(&self, other: &[u64]) -> bool {
        self.primes == other
    }
}

impl<const N: usize> PartialEq<[u64; N]> for PrimeView<'_> {
    fn eq(&self, other: &[u64; N]) -> bool {
        self.primes == other
    }
}

impl fmt::Debug for PrimeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.primes).finish()
    }
}

impl fmt::Display for PrimeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, p) in self.primes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PrimeView<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(self.primes, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: [u64; 5] = [2, 3, 5, 7, 11];

    #[test]
    fn derefs_to_slice() {
        let view = PrimeView::new(&SMALL);
        assert_eq!(view.len(), 5);
        assert_eq!(view[2], 5);
        assert_eq!(view.last(), Some(11));
        assert_eq!(view, SMALL);
    }

    #[test]
    fn contains_uses_membership() {
        let view = PrimeView::new(&SMALL);
        assert!(view.contains(7));
        assert!(!view.contains(9));
        assert!(!view.contains(13));
    }

    #[test]
    fn empty_view() {
        let view = PrimeView::new(&[]);
        assert!(view.is_empty());
        assert_eq!(view.last(), None);
        assert_eq!(view.to_string(), "[]");
    }

    #[test]
    fn iterates_in_order() {
        let view = PrimeView::new(&SMALL);
        let sum: u64 = view.into_iter().sum();
        assert_eq!(sum, 28);
        assert_eq!(view.to_vec(), SMALL.to_vec());
    }

    #[test]
    fn display_lists_primes() {
        let view = PrimeView::new(&SMALL[..3]);
        assert_eq!(view.to_string(), "[2, 3, 5]");
        assert_eq!(format!("{:?}", view), "[2, 3, 5]");
    }
}
