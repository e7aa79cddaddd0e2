//! Campaign operations

use crate::campaign::{CreateCampaignRequest, CreateCampaignResponse, FundingUpdate, ProofResponse};
use crate::core::{
    amount::Amount,
    error::{MerkleDropError, Result},
    types::{Address, CampaignId, TxHash},
};
use crate::proofs::{ensure_root, verify_proof, Distribution};
use crate::storage::{CampaignDocument, CampaignStore, RewardEntryDocument};
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

/// Campaign operations over a store
///
/// Writes are serialized through an internal lock so that read-modify-write
/// sequences such as [`mark_claimed`](Self::mark_claimed) never interleave.
pub struct CampaignService<S: CampaignStore> {
    store: S,
    decimals: Option<u32>,
    write_lock: Mutex<()>,
}

impl<S: CampaignStore> CampaignService<S> {
    /// Service reading leaf amounts as base units
    pub fn new(store: S) -> Self {
        Self {
            store,
            decimals: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Read leaf amounts as token quantities with this many decimals
    pub fn with_decimals(mut self, decimals: Option<u32>) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a reward list, check it against the committed root and store
    /// the campaign with one proof-carrying entry per leaf.
    ///
    /// Nothing is written unless every check passes.
    pub fn create_campaign(&self, request: CreateCampaignRequest) -> Result<CreateCampaignResponse> {
        let campaign_id = request.campaign_id;
        if campaign_id == 0 {
            return Err(MerkleDropError::invalid_input("campaign id must be non-zero"));
        }
        if request.leaves.is_empty() {
            return Err(MerkleDropError::EmptyTree);
        }
        let claim_deadline = request.expiry.map(expiry_to_deadline).transpose()?;

        let _guard = self.write_lock.lock();
        if self.store.get_campaign(campaign_id)?.is_some() {
            return Err(MerkleDropError::CampaignAlreadyExists { campaign_id });
        }

        let distribution = Distribution::from_records(&request.leaves, self.decimals)?;
        ensure_root(&request.merkle_root, &distribution.root())?;

        let now = Utc::now();
        let entries: Vec<RewardEntryDocument> = distribution
            .claims()?
            .into_iter()
            .map(|claim| RewardEntryDocument::from_claim(campaign_id, claim, now))
            .collect();

        let campaign = CampaignDocument {
            id: campaign_id,
            merkle_root: distribution.root(),
            reward_token: request.reward_token,
            total_funded: Default::default(),
            total_claimed: Default::default(),
            is_funded: false,
            is_finalized: true,
            finalized_at: Some(now),
            claim_deadline,
            created_at: now,
        };

        // Entries first: a campaign document is only visible once its entries are
        self.store.put_entries(campaign_id, &entries)?;
        self.store.put_campaign(&campaign)?;

        info!(
            campaign_id,
            root = %campaign.merkle_root,
            entries = entries.len(),
            total = %distribution.total_amount(),
            "created campaign"
        );

        Ok(CreateCampaignResponse {
            campaign_id,
            merkle_root: campaign.merkle_root,
            entries_count: entries.len(),
            total_amount: distribution.total_amount().clone(),
        })
    }

    /// Fetch a campaign document
    pub fn campaign(&self, campaign_id: CampaignId) -> Result<CampaignDocument> {
        self.store
            .get_campaign(campaign_id)?
            .ok_or_else(|| MerkleDropError::campaign_not_found(campaign_id))
    }

    /// All reward entries of an existing campaign
    pub fn entries(&self, campaign_id: CampaignId) -> Result<Vec<RewardEntryDocument>> {
        self.campaign(campaign_id)?;
        self.store.get_entries(campaign_id)
    }

    /// Claim data for an account
    pub fn proof_for_account(&self, campaign_id: CampaignId, account: &Address) -> Result<ProofResponse> {
        let entry = self
            .store
            .find_entry_by_account(campaign_id, account)?
            .ok_or_else(|| MerkleDropError::reward_entry_not_found(campaign_id, account.to_hex()))?;
        debug!(campaign_id, account = %account, index = entry.index_in_merkle, "served proof");
        Ok(proof_response(entry))
    }

    /// Claim data for the entry at a leaf index
    pub fn proof_for_index(&self, campaign_id: CampaignId, index: u64) -> Result<ProofResponse> {
        let entry = self
            .store
            .find_entry_by_index(campaign_id, index)?
            .ok_or_else(|| MerkleDropError::reward_entry_not_found(campaign_id, index.to_string()))?;
        debug!(campaign_id, index, account = %entry.kol_address, "served proof");
        Ok(proof_response(entry))
    }

    /// Apply a partial funding update and return the stored result
    pub fn update_funding(&self, campaign_id: CampaignId, update: FundingUpdate) -> Result<CampaignDocument> {
        let _guard = self.write_lock.lock();
        let mut campaign = self.campaign(campaign_id)?;

        if let Some(total_funded) = update.total_funded {
            campaign.total_funded = total_funded;
        }
        if let Some(is_funded) = update.is_funded {
            campaign.is_funded = is_funded;
        }
        self.store.put_campaign(&campaign)?;

        info!(
            campaign_id,
            total_funded = %campaign.total_funded,
            is_funded = campaign.is_funded,
            "updated campaign funding"
        );
        Ok(campaign)
    }

    /// Record a confirmed claim transaction for the entry at `index`
    ///
    /// `total_claimed` is recomputed from the claimed entries on every call,
    /// including the `AlreadyClaimed` path, so a campaign write that failed
    /// after the entries were stored is repaired by the next attempt.
    pub fn mark_claimed(
        &self,
        campaign_id: CampaignId,
        index: u64,
        tx_hash: TxHash,
    ) -> Result<RewardEntryDocument> {
        let _guard = self.write_lock.lock();
        let mut campaign = self.campaign(campaign_id)?;
        let mut entries = self.store.get_entries(campaign_id)?;

        let position = entries
            .iter()
            .position(|entry| entry.index_in_merkle == index)
            .ok_or_else(|| MerkleDropError::reward_entry_not_found(campaign_id, index.to_string()))?;

        if entries[position].claimed {
            let total_claimed = claimed_total(&entries)?;
            if campaign.total_claimed != total_claimed {
                warn!(
                    campaign_id,
                    stored = %campaign.total_claimed,
                    actual = %total_claimed,
                    "repairing total claimed"
                );
                campaign.total_claimed = total_claimed;
                self.store.put_campaign(&campaign)?;
            }
            return Err(MerkleDropError::AlreadyClaimed { campaign_id, index });
        }

        let entry = &mut entries[position];
        entry.claimed = true;
        entry.claimed_tx_hash = Some(tx_hash);
        entry.claimed_at = Some(Utc::now());
        let updated = entry.clone();
        campaign.total_claimed = claimed_total(&entries)?;

        self.store.put_entries(campaign_id, &entries)?;
        self.store.put_campaign(&campaign)?;

        info!(campaign_id, index, tx = %tx_hash, "marked reward claimed");
        Ok(updated)
    }

    /// Re-check an account's stored proof against the campaign's stored root
    pub fn verify_entry(&self, campaign_id: CampaignId, account: &Address) -> Result<bool> {
        let campaign = self.campaign(campaign_id)?;
        let entry = self
            .store
            .find_entry_by_account(campaign_id, account)?
            .ok_or_else(|| MerkleDropError::reward_entry_not_found(campaign_id, account.to_hex()))?;

        Ok(entry.leaf().hash() == entry.leaf_hash
            && verify_proof(&campaign.merkle_root, &entry.leaf(), &entry.merkle_proof))
    }

    /// Whether the campaign still accepts claims at `now`
    pub fn is_claim_open(&self, campaign_id: CampaignId, now: DateTime<Utc>) -> Result<bool> {
        Ok(self.campaign(campaign_id)?.is_claim_open(now))
    }
}

fn proof_response(entry: RewardEntryDocument) -> ProofResponse {
    ProofResponse {
        index: entry.index_in_merkle,
        address: entry.kol_address,
        amount: entry.reward_amount,
        proof: entry.merkle_proof,
        claimed: entry.claimed,
        claimed_tx_hash: entry.claimed_tx_hash,
        claimed_at: entry.claimed_at,
    }
}

/// Sum of the rewards already claimed
fn claimed_total(entries: &[RewardEntryDocument]) -> Result<Amount> {
    Amount::checked_sum(
        entries
            .iter()
            .filter(|entry| entry.claimed)
            .map(|entry| &entry.reward_amount),
    )
}

fn expiry_to_deadline(seconds: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| MerkleDropError::invalid_input(format!("expiry out of range: {}", seconds)))
}
