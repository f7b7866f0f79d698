pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// Draft, validate, and export OpenPGP keyring edits.
#[derive(Parser, Debug)]
#[command(name = "keywright", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a keyring snapshot, optionally with a plan's pending edits applied
    Inspect {
        /// Keyring snapshot file (TOML)
        snapshot: String,

        /// Overlay this edit plan's pending state
        #[arg(long)]
        plan: Option<String>,

        /// Include revoked user ids, which are hidden by default
        #[arg(long)]
        all: bool,
    },

    /// Validate an edit plan against a snapshot
    Check {
        /// Keyring snapshot file (TOML)
        snapshot: String,
        /// Edit plan file (TOML)
        plan: String,
    },

    /// Validate an edit plan and export the resulting transaction
    Commit {
        /// Keyring snapshot file (TOML)
        snapshot: String,
        /// Edit plan file (TOML)
        plan: String,

        /// Write the transaction JSON here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}
