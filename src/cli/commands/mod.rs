//! CLI command implementations

pub mod build;
pub mod campaign;
pub mod completion;
pub mod config;
pub mod prove;
pub mod verify;

// Common utilities for commands
use crate::cli::context::CliContext;
use crate::config::GlobalConfig;
use crate::core::amount::{Amount, MAX_DECIMALS};
use crate::proofs::LeafRecord;
use crate::storage::FileStore;
use anyhow::{anyhow, Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read a JSON leaf list from a file, or stdin when the path is `-`
pub fn read_leaf_records(path: &Path) -> Result<Vec<LeafRecord>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read leaf list {}", path.display()))?
    };

    let records: Vec<LeafRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Leaf list {} is not a JSON array of records", path.display()))?;
    debug!(path = %path.display(), records = records.len(), "read leaf list");
    Ok(records)
}

/// Decimals from the flag, else from the configuration
pub fn resolve_decimals(flag: Option<u32>) -> Result<Option<u32>> {
    let decimals = match flag {
        Some(decimals) => Some(decimals),
        None => GlobalConfig::load()?.decimals(),
    };
    if let Some(decimals) = decimals {
        if decimals > MAX_DECIMALS {
            return Err(anyhow!("Decimals must be at most {}, got {}", MAX_DECIMALS, decimals));
        }
    }
    Ok(decimals)
}

/// Parse an amount as base units, or as a token quantity when decimals apply
pub fn parse_amount(text: &str, decimals: Option<u32>) -> Result<Amount> {
    let amount = match decimals {
        Some(decimals) => Amount::parse_units(text, decimals)?,
        None => Amount::parse(text)?,
    };
    Ok(amount)
}

/// Open the campaign store: `--data-dir` if given, else the configured one
pub fn open_store() -> Result<FileStore> {
    let data_dir = match CliContext::data_dir() {
        Some(dir) => dir,
        None => GlobalConfig::load()?.data_dir()?,
    };
    debug!(data_dir = %data_dir.display(), "opening campaign store");
    Ok(FileStore::open(data_dir)?)
}

/// Print a status line unless `--quiet` was given
pub fn status(message: impl std::fmt::Display) {
    if !CliContext::is_quiet() {
        println!("{}", message);
    }
}
