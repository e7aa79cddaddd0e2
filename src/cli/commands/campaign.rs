//! Campaign command implementations

use crate::campaign::{CampaignService, CreateCampaignRequest, FundingUpdate};
use crate::cli::commands::{open_store, parse_amount, read_leaf_records, resolve_decimals, status};
use crate::cli::CampaignCommands;
use crate::core::types::{Address, Hash};
use crate::storage::{CampaignDocument, FileStore};
use anyhow::{anyhow, Result};
use chrono::Utc;
use colored::Colorize;

/// Dispatch a campaign subcommand
pub fn execute(command: CampaignCommands) -> Result<()> {
    let service = CampaignService::new(open_store()?);

    match command {
        CampaignCommands::Create {
            id,
            root,
            token,
            leaves,
            expiry,
            decimals,
            json,
        } => {
            let decimals = resolve_decimals(decimals)?;
            let request = CreateCampaignRequest {
                campaign_id: id,
                merkle_root: parse_hash("root", &root)?,
                reward_token: Address::from_hex(&token)?,
                leaves: read_leaf_records(&leaves)?,
                expiry,
            };
            let response = service.with_decimals(decimals).create_campaign(request)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                status(format!("{}", "✓ Campaign created".green()));
                status(format!("  • Campaign: {}", response.campaign_id));
                status(format!("  • Merkle root: {}", response.merkle_root.to_hex().cyan()));
                status(format!("  • Entries: {}", response.entries_count));
                status(format!("  • Total amount: {}", response.total_amount));
            }
        },

        CampaignCommands::Proof {
            id,
            address,
            index,
            json,
        } => {
            let proof = match (address, index) {
                (Some(address), _) => service.proof_for_account(id, &Address::from_hex(&address)?)?,
                (None, Some(index)) => service.proof_for_index(id, index)?,
                (None, None) => return Err(anyhow!("Pass --address or --index")),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&proof)?);
            } else {
                status(format!("{}", "Claim proof".green().bold()));
                status(format!("  • Index: {}", proof.index));
                status(format!("  • Address: {}", proof.address));
                status(format!("  • Amount: {}", proof.amount));
                status(format!("  • Claimed: {}", claimed_label(proof.claimed)));
                if let Some(tx) = proof.claimed_tx_hash {
                    status(format!("  • Claim tx: {}", tx));
                }
                status(format!("  • Proof elements: {}", proof.proof.len()));
                for sibling in proof.proof.iter() {
                    status(format!("    {}", sibling.to_hex().dimmed()));
                }
            }
        },

        CampaignCommands::Fund {
            id,
            total_funded,
            funded,
            decimals,
            json,
        } => {
            let decimals = resolve_decimals(decimals)?;
            let update = FundingUpdate {
                total_funded: total_funded
                    .as_deref()
                    .map(|text| parse_amount(text, decimals))
                    .transpose()?,
                is_funded: funded,
            };
            if update.is_empty() {
                return Err(anyhow!("Nothing to update: pass --total-funded and/or --funded"));
            }
            let campaign = service.update_funding(id, update)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&campaign)?);
            } else {
                status(format!("{} Campaign {} updated", "✓".green(), id));
                status(format!("  • Total funded: {}", campaign.total_funded));
                status(format!("  • Funded: {}", campaign.is_funded));
            }
        },

        CampaignCommands::MarkClaimed {
            id,
            index,
            tx_hash,
            json,
        } => {
            let tx_hash = parse_hash("tx hash", &tx_hash)?;
            let entry = service.mark_claimed(id, index, tx_hash)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                status(format!(
                    "{} Reward {} in campaign {} marked claimed",
                    "✓".green(),
                    index,
                    id
                ));
                status(format!("  • Address: {}", entry.kol_address));
                status(format!("  • Amount: {}", entry.reward_amount));
                status(format!("  • Claim tx: {}", tx_hash));
            }
        },

        CampaignCommands::Verify { id, address, json } => {
            let account = Address::from_hex(&address)?;
            let valid = service.verify_entry(id, &account)?;

            if json {
                println!(
                    "{}",
                    serde_json::json!({ "campaign_id": id, "address": account, "valid": valid })
                );
            } else if valid {
                status(format!("{}", "✓ Stored proof matches the campaign root".green()));
            } else {
                eprintln!("{}", "✗ Stored proof does not match the campaign root".red());
            }
            if !valid {
                return Err(anyhow!("Stored proof for {} in campaign {} is invalid", account, id));
            }
        },

        CampaignCommands::Show { id, json } => {
            let campaign = service.campaign(id)?;
            let entries = service.entries(id)?;
            let claimed = entries.iter().filter(|entry| entry.claimed).count();
            let open = campaign.is_claim_open(Utc::now());

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "campaign": campaign,
                        "entries": entries.len(),
                        "claimed_entries": claimed,
                        "claim_open": open,
                    }))?
                );
            } else {
                print_campaign(&campaign, entries.len(), claimed, open);
            }
        },

        CampaignCommands::List { json } => {
            let store: &FileStore = service.store();
            let ids = store.list_campaigns()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&ids)?);
            } else if ids.is_empty() {
                status(format!("{}", "No campaigns stored".yellow()));
            } else {
                for id in ids {
                    let campaign = service.campaign(id)?;
                    status(format!(
                        "{}  {}  funded={}",
                        id.to_string().bold(),
                        campaign.merkle_root.to_hex().cyan(),
                        campaign.is_funded
                    ));
                }
            }
        },
    }

    Ok(())
}

fn parse_hash(what: &str, text: &str) -> Result<Hash> {
    Hash::from_hex(text).map_err(|e| anyhow!("Invalid {} {}: {}", what, text, e))
}

fn claimed_label(claimed: bool) -> colored::ColoredString {
    if claimed {
        "yes".green()
    } else {
        "no".yellow()
    }
}

fn print_campaign(campaign: &CampaignDocument, entries: usize, claimed: usize, open: bool) {
    status(format!("{}", format!("Campaign {}", campaign.id).green().bold()));
    status("═".repeat(40));
    status(format!("  • Merkle root: {}", campaign.merkle_root.to_hex().cyan()));
    status(format!("  • Reward token: {}", campaign.reward_token));
    status(format!("  • Total funded: {}", campaign.total_funded));
    status(format!("  • Total claimed: {}", campaign.total_claimed));
    status(format!("  • Funded: {}", campaign.is_funded));
    status(format!("  • Finalized: {}", campaign.is_finalized));
    if let Some(deadline) = campaign.claim_deadline {
        status(format!("  • Claim deadline: {}", deadline.to_rfc3339()));
    }
    status(format!("  • Claims open: {}", claimed_label(open)));
    status(format!("  • Entries: {} ({} claimed)", entries, claimed));
    status(format!("  • Created: {}", campaign.created_at.to_rfc3339()));
}
