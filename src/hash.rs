//! Bucket addressing: a polynomial rolling hash over the key's bytes.
//!
//! The accumulator is reduced modulo the bucket count after every byte,
//! so it never exceeds `bucket_count` and the final value is already a
//! valid bucket index. Bytes are read as unsigned.

/// Multiplier of the rolling polynomial.
pub const MULTIPLIER: u64 = 31;

/// Maps `key` to a bucket in `[0, bucket_count)`.
///
/// Pure and deterministic: equal keys and equal bucket counts always
/// produce the same index. `bucket_count` must be non-zero; the map
/// rejects a zero count at construction so it never reaches here.
#[inline]
pub fn bucket_index(key: &str, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0, "bucket count must be non-zero");
    let n = bucket_count as u128;
    let mut h: u128 = 0;
    for &b in key.as_bytes() {
        // h < n <= usize::MAX, so h * 31 + 255 fits in u128.
        h = (h * MULTIPLIER as u128 + b as u128) % n;
    }
    h as usize
}
