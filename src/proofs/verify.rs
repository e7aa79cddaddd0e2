//! Proof verification
//!
//! Independent of the tree builder: only the leaf encoding and the sorted-pair
//! rule are needed, which is exactly what an on-chain `MerkleProof.verify`
//! has to work with.

use crate::core::{
    error::{MerkleDropError, Result},
    hash::hash_sorted_pair,
    types::{Hash, HashNode, LeafHash, MerkleRoot},
};
use crate::proofs::leaf::MerkleLeaf;
use crate::proofs::proof::MerkleProof;
use tracing::warn;

/// Fold a proof onto a leaf hash, returning the implied root
pub fn compute_root(leaf_hash: &LeafHash, proof: &MerkleProof) -> MerkleRoot {
    proof
        .iter()
        .fold(*leaf_hash, |current, sibling| hash_sorted_pair(&current, sibling))
}

/// Verify a leaf hash against a root
pub fn verify_leaf_hash(root: &MerkleRoot, leaf_hash: &LeafHash, proof: &MerkleProof) -> bool {
    compute_root(leaf_hash, proof) == *root
}

/// Verify that `leaf` is included under `root`
pub fn verify_proof(root: &MerkleRoot, leaf: &MerkleLeaf, proof: &MerkleProof) -> bool {
    verify_leaf_hash(root, &leaf.hash(), proof)
}

/// Verify with hex-encoded root and proof, as stored and sent to the contract.
///
/// Malformed hex (or an element that is not 32 bytes) is an
/// `InvalidProofFormat` error; a well-formed proof that does not match is
/// `Ok(false)`.
pub fn verify_proof_hex<S: AsRef<str>>(root: &str, leaf: &MerkleLeaf, proof: &[S]) -> Result<bool> {
    let root: HashNode = Hash::from_hex(root).map_err(|e| {
        MerkleDropError::invalid_proof_format(format!("root {}: {}", root, e))
    })?;
    let proof = MerkleProof::from_hex_strings(proof)?;
    Ok(verify_proof(&root, leaf, &proof))
}

/// Fail with `RootMismatch` unless the two roots agree
pub fn ensure_root(expected: &MerkleRoot, actual: &MerkleRoot) -> Result<()> {
    if expected != actual {
        warn!(expected = %expected, actual = %actual, "merkle root mismatch");
        return Err(MerkleDropError::root_mismatch(*expected, *actual));
    }
    Ok(())
}
