//! Claim leaves and their canonical encoding
//!
//! A leaf is `keccak256(abi.encodePacked(uint256 index, address account, uint256 amount))`,
//! the same bytes a Solidity distributor hashes before calling
//! `MerkleProof.verify`.

use crate::core::{
    amount::Amount,
    error::{MerkleDropError, Result},
    hash::keccak256,
    types::{Address, LeafHash, ADDRESS_LENGTH},
};
use serde::{Deserialize, Serialize};

/// Size of a packed leaf: 32-byte index, 20-byte address, 32-byte amount
pub const PACKED_LEAF_LENGTH: usize = 32 + ADDRESS_LENGTH + 32;

/// One claimable entry of a distribution
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerkleLeaf {
    /// Position in the distribution list, unique per campaign
    pub index: u64,
    /// Recipient
    pub account: Address,
    /// Reward in token base units
    pub amount: Amount,
}

impl MerkleLeaf {
    pub fn new(index: u64, account: Address, amount: Amount) -> Self {
        Self {
            index,
            account,
            amount,
        }
    }

    /// Build a leaf from textual fields, as they arrive from uploads or forms
    pub fn from_parts(index: &str, account: &str, amount: &str) -> Result<Self> {
        Ok(Self {
            index: parse_index(index)?,
            account: Address::from_hex(account)?,
            amount: Amount::parse(amount)?,
        })
    }

    /// Tightly packed `uint256 ‖ address ‖ uint256`
    pub fn encode_packed(&self) -> [u8; PACKED_LEAF_LENGTH] {
        let mut packed = [0u8; PACKED_LEAF_LENGTH];
        packed[24..32].copy_from_slice(&self.index.to_be_bytes());
        packed[32..32 + ADDRESS_LENGTH].copy_from_slice(self.account.as_bytes());
        packed[32 + ADDRESS_LENGTH..].copy_from_slice(&self.amount.to_be_bytes32());
        packed
    }

    /// Canonical leaf hash
    pub fn hash(&self) -> LeafHash {
        keccak256(&self.encode_packed())
    }
}

/// Parse a leaf index: a non-negative integer that fits the index slot
fn parse_index(text: &str) -> Result<u64> {
    let value = Amount::parse(text)
        .map_err(|e| MerkleDropError::invalid_input(format!("invalid index {}: {}", text, e)))?;
    u64::try_from(value.as_biguint()).map_err(|_| {
        MerkleDropError::invalid_input(format!("index {} does not fit in 64 bits", text))
    })
}

/// A number that may arrive either as a JSON number or as a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(serde_json::Number),
    Text(String),
}

impl NumericField {
    fn as_text(&self) -> String {
        match self {
            NumericField::Number(n) => n.to_string(),
            NumericField::Text(s) => s.clone(),
        }
    }
}

impl From<u64> for NumericField {
    fn from(value: u64) -> Self {
        NumericField::Number(value.into())
    }
}

impl From<&str> for NumericField {
    fn from(value: &str) -> Self {
        NumericField::Text(value.to_string())
    }
}

/// Unvalidated `{ index, account, amount }` record from an input list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafRecord {
    pub index: NumericField,
    pub account: String,
    pub amount: NumericField,
}

impl LeafRecord {
    /// Validate into a leaf, reading `amount` as base units
    pub fn to_leaf(&self) -> Result<MerkleLeaf> {
        self.to_leaf_with_units(None)
    }

    /// Validate into a leaf. With `decimals`, `amount` is a token quantity
    /// such as `"1.5"` and is scaled to base units.
    pub fn to_leaf_with_units(&self, decimals: Option<u32>) -> Result<MerkleLeaf> {
        let index = parse_index(&self.index.as_text())?;
        let account = Address::from_hex(&self.account)?;
        let amount_text = self.amount.as_text();
        let amount = match decimals {
            Some(decimals) => Amount::parse_units(&amount_text, decimals)?,
            None => Amount::parse(&amount_text)?,
        };
        Ok(MerkleLeaf::new(index, account, amount))
    }
}

impl From<&MerkleLeaf> for LeafRecord {
    fn from(leaf: &MerkleLeaf) -> Self {
        Self {
            index: NumericField::from(leaf.index),
            account: leaf.account.to_hex(),
            amount: NumericField::Text(leaf.amount.to_string()),
        }
    }
}

/// Validate a whole input list
pub fn parse_leaf_records(records: &[LeafRecord], decimals: Option<u32>) -> Result<Vec<MerkleLeaf>> {
    records
        .iter()
        .map(|record| record.to_leaf_with_units(decimals))
        .collect()
}
