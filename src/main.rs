//! Confcrypt - decrypt secrets embedded in configuration documents.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use confcrypt::cli::output;
use confcrypt::cli::{execute, Cli};
use confcrypt::core::constants::ENV_LOG;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("confcrypt=debug")
        } else {
            EnvFilter::new("confcrypt=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        let suggestion = match &e {
            confcrypt::Error::Cipher(confcrypt::error::CipherError::Unexpected { .. }) => {
                Some("check the key service credentials and region, or drop the kms pass with --passes gpg")
            }
            confcrypt::Error::Config(confcrypt::error::ConfigError::Json(_)) => {
                Some("input is read as JSON unless the file ends in .toml")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
