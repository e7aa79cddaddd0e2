//! Hash utilities for merkledrop
//!
//! Everything here is Keccak-256 (the pre-standard SHA-3 variant used by the
//! EVM), not NIST SHA3-256.

use crate::core::types::Hash;
use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 hash of data
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Hash::from_bytes(hasher.finalize().into())
}

/// Compute the Keccak-256 hash of several byte slices as if concatenated
pub(crate) fn keccak256_chunks(chunks: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    Hash::from_bytes(hasher.finalize().into())
}

/// Hash two nodes in ascending byte order.
///
/// `hash_sorted_pair(a, b) == hash_sorted_pair(b, a)`, which is what lets a
/// verifier ignore whether a sibling sat on the left or the right.
pub fn hash_sorted_pair(a: &Hash, b: &Hash) -> Hash {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    keccak256_chunks(&[&low.as_bytes()[..], &high.as_bytes()[..]])
}
