//! In-memory campaign store

use crate::core::{error::Result, types::CampaignId};
use crate::storage::{CampaignDocument, CampaignStore, RewardEntryDocument};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Campaign store held entirely in memory; contents are lost on drop
#[derive(Debug, Default)]
pub struct MemoryStore {
    campaigns: RwLock<HashMap<CampaignId, CampaignDocument>>,
    entries: RwLock<HashMap<CampaignId, Vec<RewardEntryDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored campaigns
    pub fn campaign_count(&self) -> usize {
        self.campaigns.read().len()
    }
}

impl CampaignStore for MemoryStore {
    fn get_campaign(&self, campaign_id: CampaignId) -> Result<Option<CampaignDocument>> {
        Ok(self.campaigns.read().get(&campaign_id).cloned())
    }

    fn put_campaign(&self, campaign: &CampaignDocument) -> Result<()> {
        self.campaigns.write().insert(campaign.id, campaign.clone());
        Ok(())
    }

    fn get_entries(&self, campaign_id: CampaignId) -> Result<Vec<RewardEntryDocument>> {
        Ok(self
            .entries
            .read()
            .get(&campaign_id)
            .cloned()
            .unwrap_or_default())
    }

    fn put_entries(&self, campaign_id: CampaignId, entries: &[RewardEntryDocument]) -> Result<()> {
        self.entries.write().insert(campaign_id, entries.to_vec());
        Ok(())
    }
}
