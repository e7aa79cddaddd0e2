//! Storage layer for merkledrop
//!
//! Campaigns and their reward entries live behind the [`CampaignStore`]
//! trait, which services receive explicitly instead of reaching for a global
//! connection. Two implementations ship: an in-memory store and a directory of
//! JSON documents.

pub mod documents;
pub mod file;
pub mod memory;

use crate::core::{
    error::Result,
    types::{Address, CampaignId},
};

// Re-export commonly used items
pub use documents::{CampaignDocument, RewardEntryDocument};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Get/put access to campaign documents and their reward entries
pub trait CampaignStore: Send + Sync {
    /// Fetch a campaign, `None` if unknown
    fn get_campaign(&self, campaign_id: CampaignId) -> Result<Option<CampaignDocument>>;

    /// Insert or replace a campaign
    fn put_campaign(&self, campaign: &CampaignDocument) -> Result<()>;

    /// All reward entries of a campaign (empty if unknown)
    fn get_entries(&self, campaign_id: CampaignId) -> Result<Vec<RewardEntryDocument>>;

    /// Replace the reward entries of a campaign
    fn put_entries(&self, campaign_id: CampaignId, entries: &[RewardEntryDocument]) -> Result<()>;

    /// Entry for an account; the first one if the account repeats
    fn find_entry_by_account(
        &self,
        campaign_id: CampaignId,
        account: &Address,
    ) -> Result<Option<RewardEntryDocument>> {
        Ok(self
            .get_entries(campaign_id)?
            .into_iter()
            .find(|entry| entry.kol_address == *account))
    }

    /// Entry by leaf index
    fn find_entry_by_index(
        &self,
        campaign_id: CampaignId,
        index: u64,
    ) -> Result<Option<RewardEntryDocument>> {
        Ok(self
            .get_entries(campaign_id)?
            .into_iter()
            .find(|entry| entry.index_in_merkle == index))
    }
}

impl<S: CampaignStore + ?Sized> CampaignStore for std::sync::Arc<S> {
    fn get_campaign(&self, campaign_id: CampaignId) -> Result<Option<CampaignDocument>> {
        (**self).get_campaign(campaign_id)
    }

    fn put_campaign(&self, campaign: &CampaignDocument) -> Result<()> {
        (**self).put_campaign(campaign)
    }

    fn get_entries(&self, campaign_id: CampaignId) -> Result<Vec<RewardEntryDocument>> {
        (**self).get_entries(campaign_id)
    }

    fn put_entries(&self, campaign_id: CampaignId, entries: &[RewardEntryDocument]) -> Result<()> {
        (**self).put_entries(campaign_id, entries)
    }
}
