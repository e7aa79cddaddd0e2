//! Verify command implementation

use crate::cli::commands::{parse_amount, resolve_decimals, status};
use crate::cli::context::CliContext;
use crate::core::types::Hash;
use crate::proofs::{compute_root, MerkleLeaf, MerkleProof};
use anyhow::{anyhow, Result};
use colored::Colorize;

/// Verify a claim against a root; fails when the proof does not verify
pub fn execute(
    root: String,
    index: String,
    account: String,
    amount: String,
    proof: Vec<String>,
    decimals: Option<u32>,
    json: bool,
) -> Result<()> {
    let decimals = resolve_decimals(decimals)?;
    let amount = parse_amount(&amount, decimals)?;
    let leaf = MerkleLeaf::from_parts(&index, &account, &amount.to_string())?;
    let expected_root = Hash::from_hex(&root)
        .map_err(|e| anyhow!("Invalid root {}: {}", root, e))?;
    let proof = MerkleProof::from_hex_strings(proof.as_slice())?;

    let leaf_hash = leaf.hash();
    let computed_root = compute_root(&leaf_hash, &proof);
    let valid = computed_root == expected_root;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "valid": valid,
                "leaf_hash": leaf_hash,
                "computed_root": computed_root,
                "expected_root": expected_root,
            }))?
        );
    } else {
        if CliContext::is_verbose() {
            status(format!("  • Account: {}", leaf.account));
            status(format!("  • Leaf hash: {}", leaf_hash));
            status(format!("  • Proof elements: {}", proof.len()));
            status(format!("  • Computed root: {}", computed_root));
        }
        if valid {
            status(format!("{}", "✓ Proof verification successful!".green()));
        } else {
            eprintln!("{}", "✗ Proof verification failed".red());
        }
    }

    if !valid {
        return Err(anyhow!(
            "Proof does not reproduce root {} (computed {})",
            expected_root,
            computed_root
        ));
    }
    Ok(())
}
