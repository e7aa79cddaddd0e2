//! Merkle proofs and per-leaf claim records

use crate::core::{
    amount::Amount,
    error::{MerkleDropError, Result},
    types::{Address, Hash, HashNode, LeafHash, MerkleRoot},
};
use crate::proofs::leaf::MerkleLeaf;
use crate::proofs::verify::verify_proof;
use serde::{Deserialize, Serialize};

/// Sibling hashes from a leaf up to, but excluding, the root.
///
/// Serialized as a JSON array of `0x`-prefixed hex strings, which is the
/// `bytes32[]` argument of the contract's `claim` call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    siblings: Vec<HashNode>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<HashNode>) -> Self {
        Self { siblings }
    }

    /// Parse hex strings, each of which must decode to exactly 32 bytes
    pub fn from_hex_strings<S: AsRef<str>>(items: &[S]) -> Result<Self> {
        let siblings = items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                Hash::from_hex(item.as_ref()).map_err(|e| {
                    MerkleDropError::invalid_proof_format(format!(
                        "proof element {} ({}): {}",
                        position,
                        item.as_ref(),
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { siblings })
    }

    /// Build from raw byte strings, each of which must be exactly 32 bytes
    pub fn from_byte_slices<B: AsRef<[u8]>>(items: &[B]) -> Result<Self> {
        let siblings = items
            .iter()
            .map(|item| Hash::from_slice(item.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { siblings })
    }

    pub fn siblings(&self) -> &[HashNode] {
        &self.siblings
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HashNode> {
        self.siblings.iter()
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.siblings.iter().map(Hash::to_hex).collect()
    }
}

impl From<Vec<HashNode>> for MerkleProof {
    fn from(siblings: Vec<HashNode>) -> Self {
        Self::new(siblings)
    }
}

/// Everything a recipient needs to claim: the leaf fields, its hash and proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimProof {
    pub index: u64,
    pub account: Address,
    pub amount: Amount,
    pub leaf_hash: LeafHash,
    pub merkle_proof: MerkleProof,
    pub claimed: bool,
}

impl ClaimProof {
    pub fn new(leaf: &MerkleLeaf, merkle_proof: MerkleProof) -> Self {
        Self {
            index: leaf.index,
            account: leaf.account,
            amount: leaf.amount.clone(),
            leaf_hash: leaf.hash(),
            merkle_proof,
            claimed: false,
        }
    }

    /// The leaf this claim is for
    pub fn leaf(&self) -> MerkleLeaf {
        MerkleLeaf::new(self.index, self.account, self.amount.clone())
    }

    /// Check the stored proof against a root, recomputing the leaf hash from
    /// the fields rather than trusting `leaf_hash`
    pub fn verify(&self, root: &MerkleRoot) -> bool {
        verify_proof(root, &self.leaf(), &self.merkle_proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_strings() {
        let items = vec![format!("0x{}", "11".repeat(32)), "22".repeat(32)];
        let proof = MerkleProof::from_hex_strings(&items).unwrap();
        assert_eq!(proof.len(), 2);
        assert_eq!(proof.siblings()[1], Hash::from_bytes([0x22; 32]));
        assert_eq!(proof.to_hex_strings()[1], format!("0x{}", "22".repeat(32)));
    }

    #[test]
    fn test_malformed_elements_are_rejected() {
        let short = vec![format!("0x{}", "11".repeat(31))];
        assert!(matches!(
            MerkleProof::from_hex_strings(&short),
            Err(MerkleDropError::InvalidProofFormat { .. })
        ));

        let not_hex = vec!["0xnothex".to_string()];
        assert!(matches!(
            MerkleProof::from_hex_strings(&not_hex),
            Err(MerkleDropError::InvalidProofFormat { .. })
        ));

        let bytes: Vec<Vec<u8>> = vec![vec![0u8; 32], vec![0u8; 33]];
        assert!(matches!(
            MerkleProof::from_byte_slices(&bytes),
            Err(MerkleDropError::InvalidProofFormat { .. })
        ));
    }

    #[test]
    fn test_serializes_as_hex_array() {
        let proof = MerkleProof::new(vec![Hash::from_bytes([0xab; 32])]);
        let json = serde_json::to_string(&proof).unwrap();
        assert_eq!(json, format!("[\"0x{}\"]", "ab".repeat(32)));

        let parsed: MerkleProof = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, proof);
    }

    #[test]
    fn test_claim_proof_fields() {
        let leaf = MerkleLeaf::new(7, Address::from_bytes([0x01; 20]), Amount::from(9u64));
        let claim = ClaimProof::new(&leaf, MerkleProof::default());

        assert_eq!(claim.leaf(), leaf);
        assert_eq!(claim.leaf_hash, leaf.hash());
        assert!(!claim.claimed);
        // A single-leaf tree's root is the leaf hash itself
        assert!(claim.verify(&leaf.hash()));
    }
}
