//! Merkle tree implementation
//!
//! Backed by `rs_merkle` with a Keccak-256 hasher that sorts each pair before
//! hashing and carries an unpaired node up unchanged. Leaf hashes are sorted
//! before the bottom layer is laid out, so the root depends only on the set of
//! leaves, not on the order they were supplied in.

use crate::core::{
    error::{MerkleDropError, Result},
    hash::{hash_sorted_pair, keccak256},
    types::{Hash, HashNode, LeafHash, MerkleRoot, HASH_LENGTH},
};
use crate::proofs::leaf::MerkleLeaf;
use crate::proofs::proof::MerkleProof;
use crate::proofs::verify::verify_leaf_hash;
use std::collections::HashMap;
use tracing::debug;

/// Keccak-256 with the sorted-pair combination rule
#[derive(Clone)]
pub struct SortedKeccak256;

impl rs_merkle::Hasher for SortedKeccak256 {
    type Hash = [u8; HASH_LENGTH];

    fn hash(data: &[u8]) -> Self::Hash {
        keccak256(data).into()
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right) => {
                hash_sorted_pair(&Hash::from_bytes(*left), &Hash::from_bytes(*right)).into()
            },
            // odd node out: promoted as-is, never paired with itself
            None => *left,
        }
    }
}

/// Merkle tree over a distribution's leaf hashes
pub struct MerkleTree {
    inner: rs_merkle::MerkleTree<SortedKeccak256>,
    /// Leaf hashes in tree order (ascending)
    leaves: Vec<LeafHash>,
    /// First position of each leaf hash in `leaves`
    positions: HashMap<LeafHash, usize>,
    root: MerkleRoot,
}

impl MerkleTree {
    /// Build a tree from claim leaves
    pub fn from_leaves(leaves: &[MerkleLeaf]) -> Result<Self> {
        let hashes: Vec<LeafHash> = leaves.iter().map(MerkleLeaf::hash).collect();
        Self::from_hashes(&hashes)
    }

    /// Build a tree from precomputed leaf hashes
    pub fn from_hashes(hashes: &[LeafHash]) -> Result<Self> {
        if hashes.is_empty() {
            return Err(MerkleDropError::EmptyTree);
        }

        let mut leaves = hashes.to_vec();
        leaves.sort_unstable();

        let mut positions = HashMap::with_capacity(leaves.len());
        for (position, hash) in leaves.iter().enumerate() {
            positions.entry(*hash).or_insert(position);
        }

        let raw: Vec<[u8; HASH_LENGTH]> = leaves.iter().map(|h| *h.as_bytes()).collect();
        let inner = rs_merkle::MerkleTree::<SortedKeccak256>::from_leaves(&raw);
        let root = inner
            .root()
            .map(Hash::from_bytes)
            .ok_or_else(|| MerkleDropError::internal("merkle tree has no root"))?;

        debug!(leaves = leaves.len(), depth = inner.depth(), root = %root, "built merkle tree");

        Ok(Self {
            inner,
            leaves,
            positions,
            root,
        })
    }

    /// Root hash
    pub fn root(&self) -> MerkleRoot {
        self.root
    }

    /// Root as `0x`-prefixed hex, the form passed to `createCampaign`
    pub fn root_hex(&self) -> String {
        self.root.to_hex()
    }

    /// Number of leaves
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of layers above the leaves, `ceil(log2(n))`
    pub fn depth(&self) -> usize {
        self.inner.depth()
    }

    /// Leaf hashes in tree order
    pub fn leaf_hashes(&self) -> &[LeafHash] {
        &self.leaves
    }

    /// Whether a leaf hash is part of the bottom layer
    pub fn contains(&self, leaf_hash: &LeafHash) -> bool {
        self.positions.contains_key(leaf_hash)
    }

    /// Proof for a claim leaf
    pub fn proof(&self, leaf: &MerkleLeaf) -> Result<MerkleProof> {
        self.proof_for_hash(&leaf.hash())
    }

    /// Proof for a leaf hash: one sibling per layer, bottom-up, skipping
    /// layers where the node was carried up without a partner
    pub fn proof_for_hash(&self, leaf_hash: &LeafHash) -> Result<MerkleProof> {
        let position = self
            .positions
            .get(leaf_hash)
            .copied()
            .ok_or_else(|| MerkleDropError::leaf_not_found(*leaf_hash))?;

        let siblings: Vec<HashNode> = self
            .inner
            .proof(&[position])
            .proof_hashes()
            .iter()
            .map(|bytes| Hash::from_bytes(*bytes))
            .collect();

        Ok(MerkleProof::new(siblings))
    }

    /// Verify a proof against this tree's root
    pub fn verify(&self, leaf: &MerkleLeaf, proof: &MerkleProof) -> bool {
        verify_leaf_hash(&self.root, &leaf.hash(), proof)
    }
}

impl std::fmt::Debug for MerkleTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerkleTree")
            .field("root", &self.root)
            .field("leaves", &self.leaves.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{amount::Amount, types::Address};
    use crate::proofs::verify::verify_proof;

    fn leaf(index: u64, byte: u8, amount: u64) -> MerkleLeaf {
        MerkleLeaf::new(index, Address::from_bytes([byte; 20]), Amount::from(amount))
    }

    fn leaves(count: u64) -> Vec<MerkleLeaf> {
        (0..count)
            .map(|i| leaf(i, (i % 251) as u8, 1_000 + i))
            .collect()
    }

    #[test]
    fn test_empty_tree_is_rejected() {
        assert!(matches!(
            MerkleTree::from_leaves(&[]),
            Err(MerkleDropError::EmptyTree)
        ));
    }

    #[test]
    fn test_single_leaf() {
        let only = leaf(0, 0xaa, 100);
        let tree = MerkleTree::from_leaves(std::slice::from_ref(&only)).unwrap();

        assert_eq!(tree.root(), only.hash());
        assert_eq!(tree.depth(), 0);
        assert!(tree.proof(&only).unwrap().is_empty());
    }

    #[test]
    fn test_two_leaf_golden_root() {
        let a = leaf(0, 0xaa, 100);
        let b = leaf(1, 0xbb, 200);
        let tree = MerkleTree::from_leaves(&[a.clone(), b.clone()]).unwrap();

        assert_eq!(
            tree.root_hex(),
            "0xa20a274a6cb0afb70e5b6f7ffbb42710a8d88099e9bc4b620a4550365c9e3361"
        );
        assert_eq!(tree.proof(&a).unwrap().siblings(), &[b.hash()]);
        assert_eq!(tree.proof(&b).unwrap().siblings(), &[a.hash()]);
    }

    #[test]
    fn test_odd_node_is_carried_up() {
        // Sorted leaf order for these three is [l1, l2, l0]; l0 is the odd one out.
        let l0 = leaf(0, 0xaa, 100);
        let l1 = leaf(1, 0xbb, 200);
        let l2 = leaf(2, 0xcc, 300);
        let tree = MerkleTree::from_leaves(&[l0.clone(), l1.clone(), l2.clone()]).unwrap();

        let expected = hash_sorted_pair(&hash_sorted_pair(&l1.hash(), &l2.hash()), &l0.hash());
        assert_eq!(tree.root(), expected);
        assert_eq!(
            tree.root_hex(),
            "0x9772766eba2e0014b4487954523bfad05b7a796eea8d7d28ba9f15f684bd4722"
        );

        // The carried-up leaf has no sibling on the bottom layer
        let proof = tree.proof(&l0).unwrap();
        assert_eq!(proof.siblings(), &[hash_sorted_pair(&l1.hash(), &l2.hash())]);
        assert_eq!(tree.proof(&l1).unwrap().len(), 2);
    }

    #[test]
    fn test_every_leaf_verifies() {
        for count in [1u64, 2, 3, 4, 5, 7, 8, 9, 16, 33] {
            let all = leaves(count);
            let tree = MerkleTree::from_leaves(&all).unwrap();
            let max_len = (count as f64).log2().ceil() as usize;

            for l in &all {
                let proof = tree.proof(l).unwrap();
                assert!(proof.len() <= max_len);
                assert!(tree.verify(l, &proof));
                assert!(verify_proof(&tree.root(), l, &proof));
            }
        }
    }

    #[test]
    fn test_power_of_two_proof_length() {
        let all = leaves(8);
        let tree = MerkleTree::from_leaves(&all).unwrap();
        assert_eq!(tree.depth(), 3);
        for l in &all {
            assert_eq!(tree.proof(l).unwrap().len(), 3);
        }
    }

    #[test]
    fn test_input_order_does_not_change_root() {
        let mut all = leaves(6);
        let forward = MerkleTree::from_leaves(&all).unwrap().root();
        all.reverse();
        let reversed = MerkleTree::from_leaves(&all).unwrap().root();
        all.rotate_left(2);
        let rotated = MerkleTree::from_leaves(&all).unwrap().root();

        assert_eq!(forward, reversed);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn test_unknown_leaf() {
        let tree = MerkleTree::from_leaves(&leaves(4)).unwrap();
        let stranger = leaf(99, 0xee, 1);
        assert!(!tree.contains(&stranger.hash()));
        assert!(matches!(
            tree.proof(&stranger),
            Err(MerkleDropError::LeafNotFound { .. })
        ));
    }
}
