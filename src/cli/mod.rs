//! Command-line interface.

pub mod decrypt;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::decrypt::PassKind;
use crate::error::Result;

/// Confcrypt - decrypt secrets embedded in configuration documents.
#[derive(Parser)]
#[command(
    name = "confcrypt",
    about = "Decrypt GPG and KMS wrapped secrets in configuration documents",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Decrypt a JSON or TOML document and print it as JSON
    Decrypt {
        /// Input file (`.toml` is read as TOML, anything else as JSON). Reads stdin when omitted
        file: Option<PathBuf>,

        /// Passes to run, in order
        #[arg(long, value_delimiter = ',', default_values_t = crate::core::decrypt::DEFAULT_ORDER)]
        passes: Vec<PassKind>,

        /// GPG home directory
        #[arg(long)]
        gpg_homedir: Option<String>,

        /// Path to the gpg executable
        #[arg(long)]
        gpg_binary: Option<String>,

        /// GPG keyring file
        #[arg(long)]
        gpg_keyring: Option<String>,

        /// AWS region for KMS
        #[arg(long)]
        region: Option<String>,

        /// AWS profile for KMS
        #[arg(long)]
        profile: Option<String>,

        /// Custom KMS endpoint URL
        #[arg(long)]
        endpoint_url: Option<String>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Print a per-pass summary to stderr
        #[arg(long)]
        summary: bool,
    },
}

/// Dispatch a parsed command.
pub fn execute(command: Command) -> Result<()> {
    match command {
        Command::Decrypt {
            file,
            passes,
            gpg_homedir,
            gpg_binary,
            gpg_keyring,
            region,
            profile,
            endpoint_url,
            pretty,
            summary,
        } => decrypt::execute(decrypt::Args {
            file,
            passes,
            gpg: crate::core::config::GpgOptions {
                homedir: gpg_homedir,
                binary: gpg_binary,
                keyring: gpg_keyring,
            },
            kms: crate::core::config::KmsOptions {
                region,
                profile,
                endpoint_url,
            },
            pretty,
            summary,
        }),
    }
}
