//! merkledrop - Merkle-proof token reward distribution
//!
//! merkledrop turns a list of `(index, account, amount)` rewards into a
//! keccak256 merkle tree whose root can be committed to an on-chain
//! distributor, and produces the per-recipient proofs that contract accepts.
//!
//! # Core Features
//!
//! - **Solidity-compatible leaves**: `keccak256(abi.encodePacked(uint256 index, address account, uint256 amount))`
//! - **Sorted-pair tree**: children are ordered before hashing, so proofs carry no direction bits
//! - **Order-independent roots**: leaves are sorted before the tree is built
//! - **Campaign store**: finalized distributions with stored proofs and claim tracking
//!
//! # Example Usage
//!
//! ```rust
//! use merkledrop::{verify_proof, Address, Amount, Distribution, MerkleLeaf};
//!
//! let leaves = vec![
//!     MerkleLeaf::new(0, Address::from_bytes([0xaa; 20]), Amount::from(100u64)),
//!     MerkleLeaf::new(1, Address::from_bytes([0xbb; 20]), Amount::from(200u64)),
//! ];
//! let distribution = Distribution::build(leaves)?;
//!
//! let leaf = &distribution.leaves()[0];
//! let proof = distribution.tree().proof(leaf)?;
//! assert!(verify_proof(&distribution.root(), leaf, &proof));
//! # Ok::<(), merkledrop::MerkleDropError>(())
//! ```

pub mod campaign;
pub mod cli;
pub mod config;
pub mod core;
pub mod proofs;
pub mod storage;

// Re-export commonly used types
pub use core::{
    amount::Amount,
    error::{MerkleDropError, Result},
    hash::{hash_sorted_pair, keccak256},
    types::{Address, CampaignId, Hash, LeafHash, MerkleRoot},
};

pub use proofs::{
    compute_root, verify_proof, ClaimProof, Distribution, DistributionBundle, LeafRecord,
    MerkleLeaf, MerkleProof, MerkleTree,
};

pub use campaign::{CampaignService, CreateCampaignRequest, FundingUpdate};

pub use storage::{CampaignStore, FileStore, MemoryStore};

/// Current version of merkledrop
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
