//! Build command implementation

use crate::cli::commands::{read_leaf_records, resolve_decimals, status};
use crate::proofs::Distribution;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Build a distribution bundle from a leaf list
pub fn execute(
    leaves: PathBuf,
    output: Option<PathBuf>,
    decimals: Option<u32>,
    json: bool,
) -> Result<()> {
    let decimals = resolve_decimals(decimals)?;
    let records = read_leaf_records(&leaves)?;
    let distribution = Distribution::from_records(&records, decimals)?;
    let bundle = distribution.bundle()?;
    let bundle_json = bundle.to_json()?;

    let Some(output) = output else {
        // The bundle itself is the output
        println!("{}", bundle_json);
        return Ok(());
    };

    std::fs::write(&output, &bundle_json)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "merkle_root": bundle.merkle_root,
                "leaf_count": bundle.leaf_count,
                "total_amount": bundle.total_amount,
                "depth": distribution.tree().depth(),
                "output": output.display().to_string(),
            }))?
        );
        return Ok(());
    }

    status(format!("{}", "✓ Distribution built".green()));
    status(format!("  • Merkle root: {}", bundle.merkle_root.to_hex().cyan()));
    status(format!("  • Leaves: {}", bundle.leaf_count));
    status(format!("  • Tree depth: {}", distribution.tree().depth()));
    match decimals {
        Some(decimals) => status(format!(
            "  • Total amount: {} ({} base units)",
            bundle.total_amount.format_units(decimals),
            bundle.total_amount
        )),
        None => status(format!("  • Total amount: {}", bundle.total_amount)),
    }
    status(format!("  • Written to: {}", output.display().to_string().cyan()));
    Ok(())
}
