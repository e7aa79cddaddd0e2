//! Prove command implementation

use crate::cli::commands::{read_leaf_records, resolve_decimals, status};
use crate::core::types::Address;
use crate::proofs::Distribution;
use anyhow::{anyhow, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Print the claim proof for one recipient of a leaf list
pub fn execute(
    leaves: PathBuf,
    account: Option<String>,
    index: Option<u64>,
    decimals: Option<u32>,
    json: bool,
) -> Result<()> {
    let decimals = resolve_decimals(decimals)?;
    let records = read_leaf_records(&leaves)?;
    let distribution = Distribution::from_records(&records, decimals)?;

    let leaf = match (account, index) {
        (Some(account), _) => {
            let account = Address::from_hex(&account)?;
            distribution
                .leaf_by_account(&account)
                .ok_or_else(|| anyhow!("Account {} is not in the leaf list", account))?
        },
        (None, Some(index)) => distribution
            .leaf_by_index(index)
            .ok_or_else(|| anyhow!("Index {} is not in the leaf list", index))?,
        (None, None) => return Err(anyhow!("Either --account or --index is required")),
    };
    let claim = distribution.claim_for(leaf)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "merkle_root": distribution.root(),
                "claim": claim,
            }))?
        );
        return Ok(());
    }

    status(format!("{}", "✓ Proof generated".green()));
    status(format!("  • Merkle root: {}", distribution.root().to_hex().cyan()));
    status(format!("  • Index: {}", claim.index));
    status(format!("  • Account: {}", claim.account));
    status(format!("  • Amount: {}", claim.amount));
    status(format!("  • Leaf hash: {}", claim.leaf_hash));
    status(format!("  • Proof elements: {}", claim.merkle_proof.len()));
    for (level, sibling) in claim.merkle_proof.iter().enumerate() {
        status(format!("    [{}] {}", level, sibling.to_hex().dimmed()));
    }
    Ok(())
}
