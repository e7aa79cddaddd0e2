//! Error types for merkledrop

use crate::core::types::{CampaignId, Hash};
use thiserror::Error;

/// Main error type for merkledrop operations
#[derive(Error, Debug)]
pub enum MerkleDropError {
    /// Leaf and request validation errors
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Merkle tree errors
    #[error("Cannot build a merkle tree from zero leaves")]
    EmptyTree,

    #[error("Leaf not found in tree: {leaf_hash}")]
    LeafNotFound { leaf_hash: Hash },

    /// Proof-related errors
    #[error("Invalid proof format: {reason}")]
    InvalidProofFormat { reason: String },

    #[error("Merkle root mismatch: expected {expected}, computed {actual}")]
    RootMismatch { expected: Hash, actual: Hash },

    /// Campaign-related errors
    #[error("Campaign not found: {campaign_id}")]
    CampaignNotFound { campaign_id: CampaignId },

    #[error("Campaign already exists: {campaign_id}")]
    CampaignAlreadyExists { campaign_id: CampaignId },

    #[error("Reward entry not found in campaign {campaign_id}: {key}")]
    RewardEntryNotFound { campaign_id: CampaignId, key: String },

    #[error("Reward {index} in campaign {campaign_id} is already claimed")]
    AlreadyClaimed { campaign_id: CampaignId, index: u64 },

    /// Storage errors
    #[error("Storage error: {reason}")]
    StorageError { reason: String },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Hex encoding/decoding errors
    #[error("Hex encoding error: {0}")]
    HexError(#[from] hex::FromHexError),

    /// Generic error for unexpected conditions
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MerkleDropError {
    /// Create a new invalid input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a new leaf not found error
    pub fn leaf_not_found(leaf_hash: Hash) -> Self {
        Self::LeafNotFound { leaf_hash }
    }

    /// Create a new invalid proof format error
    pub fn invalid_proof_format(reason: impl Into<String>) -> Self {
        Self::InvalidProofFormat {
            reason: reason.into(),
        }
    }

    /// Create a new root mismatch error
    pub fn root_mismatch(expected: Hash, actual: Hash) -> Self {
        Self::RootMismatch { expected, actual }
    }

    /// Create a new campaign not found error
    pub fn campaign_not_found(campaign_id: CampaignId) -> Self {
        Self::CampaignNotFound { campaign_id }
    }

    /// Create a new reward entry not found error
    pub fn reward_entry_not_found(campaign_id: CampaignId, key: impl Into<String>) -> Self {
        Self::RewardEntryNotFound {
            campaign_id,
            key: key.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::StorageError {
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type alias for merkledrop operations
pub type Result<T> = std::result::Result<T, MerkleDropError>;
