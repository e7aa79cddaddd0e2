//! Core types and utilities for merkledrop
//!
//! This module contains the fundamental data types, error handling,
//! and hashing primitives used throughout the system.

pub mod amount;
pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use amount::Amount;
pub use error::{MerkleDropError, Result};
pub use hash::{hash_sorted_pair, keccak256};
pub use types::{Address, CampaignId, Hash, HashNode, LeafHash, MerkleRoot, TxHash};
