//! Merkle proof system for merkledrop
//!
//! Leaf encoding, tree construction, proof generation and verification for
//! reward distributions.

pub mod distribution;
pub mod leaf;
pub mod merkle;
pub mod proof;
pub mod verify;

// Re-export commonly used items
pub use distribution::{Distribution, DistributionBundle};
pub use leaf::{parse_leaf_records, LeafRecord, MerkleLeaf, NumericField};
pub use merkle::{MerkleTree, SortedKeccak256};
pub use proof::{ClaimProof, MerkleProof};
pub use verify::{compute_root, ensure_root, verify_leaf_hash, verify_proof, verify_proof_hex};
