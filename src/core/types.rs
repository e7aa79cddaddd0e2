//! Core data types for merkledrop

use crate::core::error::{MerkleDropError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length in bytes of an account address
pub const ADDRESS_LENGTH: usize = 20;

/// Length in bytes of a hash node
pub const HASH_LENGTH: usize = 32;

/// Strip an optional `0x`/`0X` prefix from a hex string
pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// 32-byte Keccak-256 hash, shared by leaves and internal nodes
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash([u8; HASH_LENGTH]);

impl Hash {
    /// Create a Hash from a 32-byte array
    pub fn from_bytes(bytes: [u8; HASH_LENGTH]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a slice, which must be exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; HASH_LENGTH] = bytes.try_into().map_err(|_| {
            MerkleDropError::invalid_proof_format(format!(
                "expected {} bytes, got {}",
                HASH_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Hash(array))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }

    /// Parse a hex string, with or without `0x` prefix
    pub fn from_hex(hex: &str) -> std::result::Result<Self, hex::FromHexError> {
        let bytes = hex::decode(strip_hex_prefix(hex.trim()))?;
        if bytes.len() != HASH_LENGTH {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut array = [0u8; HASH_LENGTH];
        array.copy_from_slice(&bytes);
        Ok(Hash(array))
    }

    /// Convert to a `0x`-prefixed lowercase hex string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Create a zero hash (for testing and special cases)
    pub fn zero() -> Self {
        Hash([0u8; HASH_LENGTH])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &hex::encode(self.0)[..8])
    }
}

impl From<[u8; HASH_LENGTH]> for Hash {
    fn from(bytes: [u8; HASH_LENGTH]) -> Self {
        Hash(bytes)
    }
}

impl From<Hash> for [u8; HASH_LENGTH] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

// Hex strings on the wire, matching the bytes32 values the contract consumes
impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        Hash::from_hex(&hex_string).map_err(serde::de::Error::custom)
    }
}

/// A node of the merkle tree (leaf or internal)
pub type HashNode = Hash;

/// Root hash of a distribution tree
pub type MerkleRoot = Hash;

/// Hash of an encoded leaf
pub type LeafHash = Hash;

/// Transaction hash of an on-chain claim
pub type TxHash = Hash;

/// Campaign identifier assigned by the distribution contract
pub type CampaignId = u64;

/// 20-byte account address
///
/// Parsing is case-insensitive; the canonical rendering is lowercase with a
/// `0x` prefix. Hashing always works on the raw bytes, so two spellings of the
/// same address encode identically.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Create an address from raw bytes
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }

    /// Create an address from a slice, which must be exactly 20 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|_| {
            MerkleDropError::invalid_input(format!(
                "address must be {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Address(array))
    }

    /// Parse a hex address in any letter case, with or without `0x`
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = strip_hex_prefix(s.trim());
        if digits.len() != ADDRESS_LENGTH * 2 {
            return Err(MerkleDropError::invalid_input(format!(
                "address must be {} hex characters: {}",
                ADDRESS_LENGTH * 2,
                s
            )));
        }
        let bytes = hex::decode(digits)
            .map_err(|e| MerkleDropError::invalid_input(format!("invalid address {}: {}", s, e)))?;
        Self::from_slice(&bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Canonical lowercase `0x`-prefixed form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// The zero address
    pub fn zero() -> Self {
        Address([0u8; ADDRESS_LENGTH])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = MerkleDropError;

    fn from_str(s: &str) -> Result<Self> {
        Address::from_hex(s)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
