//! merkledrop CLI
//!
//! Command-line interface for building merkle reward distributions and
//! managing campaign proofs.

use anyhow::Result;
use clap::Parser;
use merkledrop::cli::{commands, context::CliContext, Cli, Commands};
use merkledrop::config::GlobalConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Parse errors surface from the command that reads the config
    let config = GlobalConfig::load().unwrap_or_default();
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        config.log_level()
    };

    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    CliContext::set(CliContext {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir.clone(),
    });

    // Execute the command
    match cli.command {
        Commands::Build {
            leaves,
            output,
            decimals,
            json,
        } => commands::build::execute(leaves, output, decimals, json),
        Commands::Prove {
            leaves,
            account,
            index,
            decimals,
            json,
        } => commands::prove::execute(leaves, account, index, decimals, json),
        Commands::Verify {
            root,
            index,
            account,
            amount,
            proof,
            decimals,
            json,
        } => commands::verify::execute(root, index, account, amount, proof, decimals, json),
        Commands::Campaign { command } => commands::campaign::execute(command),
        Commands::Config {
            key,
            value,
            list,
            unset,
            show_origin,
            json,
        } => commands::config::execute(key, value, list, unset, show_origin, json),
        Commands::Completion { shell } => commands::completion::execute(shell),
    }
}
