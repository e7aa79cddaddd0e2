//! Token amounts in base units, bounded to `uint256`

use crate::core::error::{MerkleDropError, Result};
use crate::core::types::strip_hex_prefix;
use num_bigint::BigUint;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Widest value a `uint256` slot can hold
pub const MAX_AMOUNT_BITS: u64 = 256;

/// Largest decimals value whose scale factor still fits in 256 bits
pub const MAX_DECIMALS: u32 = 77;

/// Non-negative integer that fits in 256 bits
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(BigUint);

impl Amount {
    /// Zero tokens
    pub fn zero() -> Self {
        Amount(BigUint::default())
    }

    /// Wrap a big integer, rejecting anything wider than 256 bits
    pub fn from_biguint(value: BigUint) -> Result<Self> {
        if value.bits() > MAX_AMOUNT_BITS {
            return Err(MerkleDropError::invalid_input(format!(
                "value exceeds {} bits: {}",
                MAX_AMOUNT_BITS, value
            )));
        }
        Ok(Amount(value))
    }

    /// Parse a decimal string, or a `0x`-prefixed hex string
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MerkleDropError::invalid_input("amount is empty"));
        }
        if text.starts_with('-') {
            return Err(MerkleDropError::invalid_input(format!(
                "amount must be non-negative: {}",
                text
            )));
        }

        let is_hex = text.starts_with("0x") || text.starts_with("0X");
        let (digits, radix) = if is_hex {
            (strip_hex_prefix(text), 16)
        } else {
            (text, 10)
        };

        let valid = !digits.is_empty()
            && digits.chars().all(|c| c.is_digit(radix));
        if !valid {
            return Err(MerkleDropError::invalid_input(format!(
                "not an unsigned integer: {}",
                text
            )));
        }

        let value = BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| {
            MerkleDropError::invalid_input(format!("not an unsigned integer: {}", text))
        })?;
        Self::from_biguint(value)
    }

    /// Parse a human-readable token quantity such as `"1.5"` into base units.
    ///
    /// `parse_units("1.5", 18)` is `1_500_000_000_000_000_000`.
    pub fn parse_units(text: &str, decimals: u32) -> Result<Self> {
        if decimals > MAX_DECIMALS {
            return Err(MerkleDropError::invalid_input(format!(
                "decimals must be at most {}, got {}",
                MAX_DECIMALS, decimals
            )));
        }
        let text = text.trim();
        if text.starts_with('-') {
            return Err(MerkleDropError::invalid_input(format!(
                "amount must be non-negative: {}",
                text
            )));
        }

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (text, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(MerkleDropError::invalid_input("amount is empty"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(MerkleDropError::invalid_input(format!(
                "not a decimal number: {}",
                text
            )));
        }
        if fraction.len() > decimals as usize {
            return Err(MerkleDropError::invalid_input(format!(
                "{} has more than {} fractional digits",
                text, decimals
            )));
        }

        let mut digits = String::with_capacity(whole.len() + decimals as usize);
        digits.push_str(whole);
        digits.push_str(fraction);
        digits.extend(std::iter::repeat('0').take(decimals as usize - fraction.len()));

        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::zero());
        }
        Self::parse(digits)
    }

    /// Render in whole-token units with `decimals` fractional digits, trailing
    /// zeros trimmed
    pub fn format_units(&self, decimals: u32) -> String {
        let raw = self.0.to_str_radix(10);
        let decimals = decimals as usize;
        if decimals == 0 {
            return raw;
        }

        let padded = if raw.len() <= decimals {
            format!("{}{}", "0".repeat(decimals + 1 - raw.len()), raw)
        } else {
            raw
        };
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, fraction)
        }
    }

    /// Whether this is zero
    pub fn is_zero(&self) -> bool {
        self.0.bits() == 0
    }

    /// Big-endian `uint256` encoding
    pub fn to_be_bytes32(&self) -> [u8; 32] {
        let bytes = self.0.to_bytes_be();
        let mut out = [0u8; 32];
        // from_biguint guarantees at most 32 significant bytes
        out[32 - bytes.len()..].copy_from_slice(&bytes);
        out
    }

    /// Add, failing if the sum no longer fits in 256 bits
    pub fn checked_add(&self, other: &Amount) -> Result<Amount> {
        Self::from_biguint(&self.0 + &other.0)
    }

    /// Sum a sequence of amounts, failing on 256-bit overflow
    pub fn checked_sum<'a>(amounts: impl IntoIterator<Item = &'a Amount>) -> Result<Amount> {
        amounts
            .into_iter()
            .try_fold(Amount::zero(), |total, amount| total.checked_add(amount))
    }

    /// Borrow the underlying integer
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(BigUint::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(BigUint::from(value))
    }
}

impl FromStr for Amount {
    type Err = MerkleDropError;

    fn from_str(s: &str) -> Result<Self> {
        Amount::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

// Decimal strings on the wire; JSON numbers lose precision past 2^53
impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_str_radix(10))
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an unsigned integer or a decimal string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Amount, E> {
        Amount::parse(value).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Amount, E> {
        Ok(Amount::from(value))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> std::result::Result<Amount, E> {
        Ok(Amount::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Amount, E> {
        u64::try_from(value)
            .map(Amount::from)
            .map_err(|_| E::custom(format!("amount must be non-negative: {}", value)))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}
