//! Command-line interface for merkledrop

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod context;

/// merkledrop - Merkle-proof token reward distribution
#[derive(Parser)]
#[command(
    name = "merkledrop",
    version,
    about = "Build merkle reward trees, generate and verify claim proofs",
    long_about = "merkledrop builds keccak256 sorted-pair merkle trees over (index, account, amount) reward lists, produces per-recipient claim proofs compatible with on-chain verifiers, and keeps a campaign store of finalized distributions."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Campaign data directory (default: from config)
    #[arg(long, global = true, env = "MERKLEDROP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a distribution bundle (root plus every claim proof) from a leaf list
    Build {
        /// JSON array of { index, account, amount } records ("-" for stdin)
        leaves: PathBuf,

        /// Write the bundle to a file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read amounts as token quantities with this many decimals
        #[arg(long)]
        decimals: Option<u32>,

        /// Output summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate the claim proof for one recipient
    #[command(group(ArgGroup::new("target").required(true).args(["account", "index"])))]
    Prove {
        /// JSON array of { index, account, amount } records ("-" for stdin)
        leaves: PathBuf,

        /// Recipient address
        #[arg(long)]
        account: Option<String>,

        /// Leaf index
        #[arg(long)]
        index: Option<u64>,

        /// Read amounts as token quantities with this many decimals
        #[arg(long)]
        decimals: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify a claim proof against a root
    Verify {
        /// Expected merkle root
        #[arg(long)]
        root: String,

        /// Leaf index
        #[arg(long)]
        index: String,

        /// Recipient address
        #[arg(long)]
        account: String,

        /// Reward amount
        #[arg(long)]
        amount: String,

        /// Proof elements, bottom-up (repeat or comma-separate)
        #[arg(long, value_delimiter = ',')]
        proof: Vec<String>,

        /// Read the amount as a token quantity with this many decimals
        #[arg(long)]
        decimals: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Campaign store management
    Campaign {
        #[command(subcommand)]
        command: CampaignCommands,
    },

    /// Manage global configuration
    Config {
        /// Configuration key to get/set
        key: Option<String>,
        /// Configuration value to set
        value: Option<String>,
        /// List all configuration values
        #[arg(short, long)]
        list: bool,
        /// Unset a configuration value
        #[arg(long)]
        unset: bool,
        /// Show global configuration file location
        #[arg(long)]
        show_origin: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Campaign subcommands
#[derive(Subcommand)]
pub enum CampaignCommands {
    /// Create a campaign from its reward list and committed root
    Create {
        /// Campaign ID (non-zero)
        #[arg(long)]
        id: u64,

        /// Merkle root committed on-chain
        #[arg(long)]
        root: String,

        /// Reward token address
        #[arg(long)]
        token: String,

        /// JSON array of { index, account, amount } records ("-" for stdin)
        leaves: PathBuf,

        /// Claim deadline as unix seconds
        #[arg(long)]
        expiry: Option<i64>,

        /// Read amounts as token quantities with this many decimals
        #[arg(long)]
        decimals: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the stored claim proof for an address or leaf index
    Proof {
        /// Campaign ID
        #[arg(long)]
        id: u64,

        /// Recipient address
        #[arg(long, required_unless_present = "index", conflicts_with = "index")]
        address: Option<String>,

        /// Leaf index, instead of an address
        #[arg(long)]
        index: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update funding state
    Fund {
        /// Campaign ID
        #[arg(long)]
        id: u64,

        /// Total funded amount
        #[arg(long)]
        total_funded: Option<String>,

        /// Whether the campaign is funded
        #[arg(long)]
        funded: Option<bool>,

        /// Read the funded amount as a token quantity with this many decimals
        #[arg(long)]
        decimals: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a confirmed claim transaction
    MarkClaimed {
        /// Campaign ID
        #[arg(long)]
        id: u64,

        /// Leaf index of the claimed reward
        #[arg(long)]
        index: u64,

        /// Claim transaction hash
        #[arg(long)]
        tx_hash: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Re-check a stored proof against the campaign root
    Verify {
        /// Campaign ID
        #[arg(long)]
        id: u64,

        /// Recipient address
        #[arg(long)]
        address: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a campaign
    Show {
        /// Campaign ID
        #[arg(long)]
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored campaigns
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
