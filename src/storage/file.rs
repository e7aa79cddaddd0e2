//! Campaign store backed by a directory of JSON documents
//!
//! Layout:
//!
//! ```text
//! <root>/
//!   <campaign_id>/
//!     campaign.json
//!     entries.json
//! ```

use crate::core::{
    error::{MerkleDropError, Result},
    types::CampaignId,
};
use crate::storage::{CampaignDocument, CampaignStore, RewardEntryDocument};
use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const CAMPAIGN_FILE: &str = "campaign.json";
const ENTRIES_FILE: &str = "entries.json";

/// Directory-backed campaign store
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one campaign's documents
    pub fn campaign_dir(&self, campaign_id: CampaignId) -> PathBuf {
        self.root.join(campaign_id.to_string())
    }

    /// IDs of all stored campaigns, ascending
    pub fn list_campaigns(&self) -> Result<Vec<CampaignId>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.path().join(CAMPAIGN_FILE).exists() {
                continue;
            }
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<CampaignId>().ok())
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    fn read_document<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let document = serde_json::from_str(&content).map_err(|e| {
            MerkleDropError::storage(format!("corrupt document {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "read document");
        Ok(Some(document))
    }

    /// Write through a temporary file in the same directory, then rename, so
    /// readers never observe a half-written document
    fn write_document<T: Serialize + ?Sized>(dir: &Path, name: &str, document: &T) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let json = serde_json::to_vec_pretty(document)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&json)?;
        temp.flush()?;

        let path = dir.join(name);
        temp.persist(&path).map_err(|e| MerkleDropError::Io(e.error))?;
        debug!(path = %path.display(), bytes = json.len(), "wrote document");
        Ok(())
    }
}

impl CampaignStore for FileStore {
    fn get_campaign(&self, campaign_id: CampaignId) -> Result<Option<CampaignDocument>> {
        Self::read_document(&self.campaign_dir(campaign_id).join(CAMPAIGN_FILE))
    }

    fn put_campaign(&self, campaign: &CampaignDocument) -> Result<()> {
        Self::write_document(&self.campaign_dir(campaign.id), CAMPAIGN_FILE, campaign)
    }

    fn get_entries(&self, campaign_id: CampaignId) -> Result<Vec<RewardEntryDocument>> {
        Ok(Self::read_document(&self.campaign_dir(campaign_id).join(ENTRIES_FILE))?
            .unwrap_or_default())
    }

    fn put_entries(&self, campaign_id: CampaignId, entries: &[RewardEntryDocument]) -> Result<()> {
        Self::write_document(&self.campaign_dir(campaign_id), ENTRIES_FILE, entries)
    }
}
