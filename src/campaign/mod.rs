//! Campaign lifecycle over an injected [`CampaignStore`](crate::storage::CampaignStore)
//!
//! A campaign is created once with its full reward list. The service rebuilds
//! the tree, refuses roots that do not match, then stores one entry per leaf
//! together with its proof so recipients can fetch claims later.

pub mod service;

use crate::core::{
    amount::Amount,
    types::{Address, CampaignId, MerkleRoot, TxHash},
};
use crate::proofs::{LeafRecord, MerkleProof};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use service::CampaignService;

/// Input for [`CampaignService::create_campaign`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub campaign_id: CampaignId,
    /// Root the caller committed on-chain
    pub merkle_root: MerkleRoot,
    pub reward_token: Address,
    pub leaves: Vec<LeafRecord>,
    /// Claim deadline as unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<i64>,
}

/// Summary returned after a campaign is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignResponse {
    pub campaign_id: CampaignId,
    pub merkle_root: MerkleRoot,
    pub entries_count: usize,
    pub total_amount: Amount,
}

/// A recipient's claim data as served to wallets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofResponse {
    pub index: u64,
    pub address: Address,
    pub amount: Amount,
    pub proof: MerkleProof,
    pub claimed: bool,
    pub claimed_tx_hash: Option<TxHash>,
    pub claimed_at: Option<DateTime<Utc>>,
}

/// Partial update of a campaign's funding state; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingUpdate {
    #[serde(default)]
    pub total_funded: Option<Amount>,
    #[serde(default)]
    pub is_funded: Option<bool>,
}

impl FundingUpdate {
    pub fn is_empty(&self) -> bool {
        self.total_funded.is_none() && self.is_funded.is_none()
    }
}
