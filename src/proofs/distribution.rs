//! A validated reward list together with its tree and per-leaf proofs

use crate::core::{
    amount::Amount,
    error::{MerkleDropError, Result},
    types::{Address, MerkleRoot},
};
use crate::proofs::leaf::{parse_leaf_records, LeafRecord, MerkleLeaf};
use crate::proofs::merkle::MerkleTree;
use crate::proofs::proof::ClaimProof;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Leaves of one campaign, their tree and the total allocation
#[derive(Debug)]
pub struct Distribution {
    leaves: Vec<MerkleLeaf>,
    tree: MerkleTree,
    total_amount: Amount,
}

impl Distribution {
    /// Validate a leaf list and build its tree.
    ///
    /// Leaf indices must be unique. Repeated accounts are allowed but logged,
    /// since lookups by address only ever return the first entry.
    pub fn build(leaves: Vec<MerkleLeaf>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(MerkleDropError::EmptyTree);
        }

        let mut indices = HashSet::with_capacity(leaves.len());
        let mut accounts = HashSet::with_capacity(leaves.len());
        for leaf in &leaves {
            if !indices.insert(leaf.index) {
                return Err(MerkleDropError::invalid_input(format!(
                    "duplicate leaf index {}",
                    leaf.index
                )));
            }
            if !accounts.insert(leaf.account) {
                warn!(account = %leaf.account, index = leaf.index, "account appears more than once");
            }
        }

        let total_amount = Amount::checked_sum(leaves.iter().map(|leaf| &leaf.amount))?;
        let tree = MerkleTree::from_leaves(&leaves)?;

        debug!(
            leaves = leaves.len(),
            total = %total_amount,
            root = %tree.root(),
            "built distribution"
        );

        Ok(Self {
            leaves,
            tree,
            total_amount,
        })
    }

    /// Validate raw input records and build
    pub fn from_records(records: &[LeafRecord], decimals: Option<u32>) -> Result<Self> {
        Self::build(parse_leaf_records(records, decimals)?)
    }

    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    pub fn root(&self) -> MerkleRoot {
        self.tree.root()
    }

    /// Leaves in input order
    pub fn leaves(&self) -> &[MerkleLeaf] {
        &self.leaves
    }

    /// Sum of all leaf amounts, the campaign's total allocation
    pub fn total_amount(&self) -> &Amount {
        &self.total_amount
    }

    /// First leaf for an account
    pub fn leaf_by_account(&self, account: &Address) -> Option<&MerkleLeaf> {
        self.leaves.iter().find(|leaf| leaf.account == *account)
    }

    pub fn leaf_by_index(&self, index: u64) -> Option<&MerkleLeaf> {
        self.leaves.iter().find(|leaf| leaf.index == index)
    }

    /// Claim record for one leaf
    pub fn claim_for(&self, leaf: &MerkleLeaf) -> Result<ClaimProof> {
        Ok(ClaimProof::new(leaf, self.tree.proof(leaf)?))
    }

    /// Claim records for every leaf, in input order
    pub fn claims(&self) -> Result<Vec<ClaimProof>> {
        self.leaves
            .par_iter()
            .map(|leaf| self.claim_for(leaf))
            .collect()
    }

    /// Root plus all claim records, ready to persist or publish
    pub fn bundle(&self) -> Result<DistributionBundle> {
        Ok(DistributionBundle {
            merkle_root: self.root(),
            total_amount: self.total_amount.clone(),
            leaf_count: self.leaves.len(),
            claims: self.claims()?,
        })
    }
}

/// Serialized output of a distribution build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBundle {
    pub merkle_root: MerkleRoot,
    pub total_amount: Amount,
    pub leaf_count: usize,
    pub claims: Vec<ClaimProof>,
}

impl DistributionBundle {
    /// Claim record for an account
    pub fn claim_for_account(&self, account: &Address) -> Option<&ClaimProof> {
        self.claims.iter().find(|claim| claim.account == *account)
    }

    /// Indices of claims whose proof does not reproduce `merkle_root`
    pub fn invalid_claims(&self) -> Vec<u64> {
        self.claims
            .par_iter()
            .filter(|claim| !claim.verify(&self.merkle_root))
            .map(|claim| claim.index)
            .collect()
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(MerkleDropError::JsonSerialization)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(MerkleDropError::JsonSerialization)
    }
}
