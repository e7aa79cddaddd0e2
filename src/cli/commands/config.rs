//! Configuration command implementation

use crate::cli::commands::status;
use crate::config::{ConfigKey, ConfigValue, GlobalConfig};
use anyhow::{anyhow, Result};
use colored::Colorize;

/// Execute the config command
pub fn execute(
    key: Option<String>,
    value: Option<String>,
    list: bool,
    unset: bool,
    show_origin: bool,
    json: bool,
) -> Result<()> {
    let mut config = GlobalConfig::load()?;

    if show_origin {
        let config_path = GlobalConfig::config_path()?;
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": config_path.display().to_string(),
                    "exists": config_path.exists()
                })
            );
        } else {
            println!(
                "{}: {}",
                "Configuration file".bold(),
                config_path.display().to_string().cyan()
            );
            if config_path.exists() {
                println!("{}: {}", "Status".bold(), "exists".green());
            } else {
                println!("{}: {}", "Status".bold(), "not created yet".yellow());
            }
        }
        return Ok(());
    }

    if list {
        return list_configuration(&config, json);
    }

    let Some(key_str) = key else {
        print_usage(json);
        return Ok(());
    };
    let config_key = ConfigKey::parse(&key_str);

    if unset {
        config.unset(&config_key);
        config.save()?;

        if json {
            println!(
                "{}",
                serde_json::json!({ "action": "unset", "key": key_str, "status": "success" })
            );
        } else {
            status(format!("{} {}", "✓".green(), format!("Unset {}", key_str).bold()));
        }
    } else if let Some(value_str) = value {
        config.set(config_key, ConfigValue::parse(&value_str))?;
        config.save()?;

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "action": "set",
                    "key": key_str,
                    "value": value_str,
                    "status": "success"
                })
            );
        } else {
            status(format!("{} {} = {}", "✓".green(), key_str.bold(), value_str.cyan()));
        }
    } else {
        match config.get(&config_key) {
            Some(value) => {
                if json {
                    println!("{}", serde_json::json!({ "key": key_str, "value": value }));
                } else {
                    println!("{}", value);
                }
            },
            None => {
                if json {
                    println!(
                        "{}",
                        serde_json::json!({ "key": key_str, "value": null, "error": "not set" })
                    );
                } else {
                    eprintln!(
                        "{}",
                        format!("Configuration key '{}' is not set", key_str).yellow()
                    );
                }
                return Err(anyhow!("Configuration key not found: {}", key_str));
            },
        }
    }

    Ok(())
}

/// List all configuration values
fn list_configuration(config: &GlobalConfig, json: bool) -> Result<()> {
    let entries = config.list();

    if json {
        let config_map: std::collections::BTreeMap<String, String> = entries.into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&config_map)?);
    } else if entries.is_empty() {
        println!("{}", "No configuration values set".yellow());
        println!();
        println!("{}", "To set configuration:".bold());
        println!("  {}", "merkledrop config units.decimals 18".cyan());
    } else {
        println!("{}", "Global Configuration".green().bold());
        println!("{}", "═".repeat(40));
        println!();

        for (key, value) in entries {
            println!("{} = {}", key.bold(), value.cyan());
        }
    }

    Ok(())
}

fn print_usage(json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "error": "No configuration key specified",
                "usage": "merkledrop config <key> [value] or --list"
            })
        );
        return;
    }

    println!("{}", "Configuration Management".green().bold());
    println!("{}", "═".repeat(40));
    println!();
    println!("{}", "Usage:".bold());
    println!("  {} Get value", "merkledrop config <key>".cyan());
    println!("  {} Set value", "merkledrop config <key> <value>".cyan());
    println!("  {} List all", "merkledrop config --list".cyan());
    println!("  {} Unset value", "merkledrop config --unset <key>".cyan());
    println!();
    println!("{}", "Common keys:".bold());
    println!("  {} Campaign data directory", "storage.data_dir".green());
    println!("  {} Token decimals for amounts", "units.decimals".green());
    println!("  {} Default log level", "log.level".green());
}
