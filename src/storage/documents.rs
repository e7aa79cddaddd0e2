//! Persisted campaign and reward-entry documents

use crate::core::{
    amount::Amount,
    types::{Address, CampaignId, LeafHash, MerkleRoot, TxHash},
};
use crate::proofs::{ClaimProof, MerkleLeaf, MerkleProof};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One reward distribution round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDocument {
    /// Campaign ID from the contract
    pub id: CampaignId,
    pub merkle_root: MerkleRoot,
    pub reward_token: Address,
    pub total_funded: Amount,
    pub total_claimed: Amount,
    pub is_funded: bool,
    pub is_finalized: bool,
    pub finalized_at: Option<DateTime<Utc>>,
    pub claim_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl CampaignDocument {
    /// Whether claims are still accepted at `now`
    pub fn is_claim_open(&self, now: DateTime<Utc>) -> bool {
        match self.claim_deadline {
            Some(deadline) => now <= deadline,
            None => true,
        }
    }
}

/// One recipient's allocation within a campaign, with its stored proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEntryDocument {
    pub campaign_id: CampaignId,
    pub index_in_merkle: u64,
    /// Always the canonical lowercase form
    pub kol_address: Address,
    pub reward_amount: Amount,
    pub leaf_hash: LeafHash,
    pub merkle_proof: MerkleProof,
    pub claimed: bool,
    pub claimed_tx_hash: Option<TxHash>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RewardEntryDocument {
    pub fn from_claim(campaign_id: CampaignId, claim: ClaimProof, created_at: DateTime<Utc>) -> Self {
        Self {
            campaign_id,
            index_in_merkle: claim.index,
            kol_address: claim.account,
            reward_amount: claim.amount,
            leaf_hash: claim.leaf_hash,
            merkle_proof: claim.merkle_proof,
            claimed: claim.claimed,
            claimed_tx_hash: None,
            claimed_at: None,
            created_at,
        }
    }

    /// The leaf this entry was derived from
    pub fn leaf(&self) -> MerkleLeaf {
        MerkleLeaf::new(self.index_in_merkle, self.kol_address, self.reward_amount.clone())
    }
}
