//! Decrypt command.
//!
//! Loads a document with serde, runs the requested passes and prints the
//! result as JSON on stdout.

use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::output;
use crate::core::config::{GpgOptions, KmsOptions};
use crate::core::decrypt::{Decryptor, FailureKind, PassKind, PassReport};
use crate::core::node::ConfigNode;
use crate::error::{ConfigError, Result};

/// Options for a single decrypt run.
#[derive(Debug)]
pub struct Args {
    pub file: Option<PathBuf>,
    pub passes: Vec<PassKind>,
    pub gpg: GpgOptions,
    pub kms: KmsOptions,
    pub pretty: bool,
    pub summary: bool,
}

/// Decrypt a document and write it to stdout.
pub fn execute(args: Args) -> Result<()> {
    let tree = load(args.file.as_deref())?;

    let decrypted = Decryptor::new()
        .order(args.passes)
        .with_gpg(args.gpg)
        .with_kms(args.kms)
        .run(&tree)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&decrypted.tree)
    } else {
        serde_json::to_string(&decrypted.tree)
    }
    .map_err(ConfigError::Json)?;
    println!("{}", rendered);

    if args.summary {
        for report in &decrypted.reports {
            summarize(report);
        }
    }
    Ok(())
}

/// Read and parse the input document.
fn load(file: Option<&std::path::Path>) -> Result<ConfigNode> {
    let Some(path) = file else {
        debug!("reading document from stdin");
        let mut contents = String::new();
        std::io::stdin().read_to_string(&mut contents)?;
        return Ok(serde_json::from_str(&contents).map_err(ConfigError::Json)?);
    };

    debug!(path = %path.display(), "reading document");
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let tree = if is_toml {
        toml::from_str(&contents).map_err(ConfigError::Toml)?
    } else {
        serde_json::from_str(&contents).map_err(ConfigError::Json)?
    };
    Ok(tree)
}

fn summarize(report: &PassReport) {
    if !report.available {
        output::warn(&format!("{}: backend unavailable, nothing decrypted", report.pass));
        return;
    }
    output::success(&format!(
        "{}: {} secret(s) decrypted",
        report.pass, report.decrypted
    ));
    for failure in &report.failures {
        let what = match failure.kind {
            FailureKind::DecryptionFailed => "decryption failed",
            FailureKind::AccessDenied => "access denied",
            FailureKind::MalformedNode => "malformed marker",
        };
        output::warn(&format!(
            "{} {}: {}",
            output::path(&failure.path),
            what,
            failure.message
        ));
    }
}
