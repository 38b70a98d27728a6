//! Serde serialization tests
//!
//! Run with: cargo test --features serde --test serde_tests

#![cfg(feature = "serde")]

use primecache::{CacheStats, PrimeCache, BLOCK_SIZE};

#[test]
fn view_serializes_as_array() {
    let mut cache = PrimeCache::new();
    let view = cache.primes_below(20).unwrap();
    let json = serde_json::to_string(&view).unwrap();
    assert_eq!(json, "[2,3,5,7,11,13,17,19]");
}

#[test]
fn empty_view_serializes() {
    let mut cache = PrimeCache::new();
    let view = cache.primes_below(2).unwrap();
    assert_eq!(serde_json::to_string(&view).unwrap(), "[]");
}

#[test]
fn view_deserializes_to_vec() {
    let mut cache = PrimeCache::new();
    let view = cache.primes_up_to_nth(6).unwrap();
    let json = serde_json::to_string(&view).unwrap();
    let back: Vec<u64> = serde_json::from_str(&json).unwrap();
    assert_eq!(view, back[..]);
}

#[test]
fn stats_roundtrip() {
    let mut cache = PrimeCache::new();
    cache.generate_below(2 * BLOCK_SIZE).unwrap();

    let stats = cache.stats();
    let json = serde_json::to_string(&stats).unwrap();
    assert!(json.contains("\"frontier\":131072"));
    assert!(json.contains("\"primes\":12251"));

    let back: CacheStats = serde_json::from_str(&json).unwrap();
    assert_eq!(stats, back);
}

#[test]
fn stats_missing_field_fails() {
    let json = r#"{"frontier":0,"primes":0,"blocks":0}"#;
    let result: Result<CacheStats, _> = serde_json::from_str(json);
    assert!(result.is_err());
}
