//! GPG engine.
//!
//! Decrypts ASCII-armored messages by piping them through the `gpg` CLI.
//!
//! ## Requirements
//!
//! - a `gpg` executable, on `PATH` or configured explicitly
//! - the private key for each message in the configured home directory or
//!   keyring

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::Engine;
use crate::core::config::GpgConfig;
use crate::error::CipherError;

/// Engine backed by the `gpg` executable.
#[derive(Debug, Clone)]
pub struct GpgCli {
    binary: PathBuf,
    homedir: Option<PathBuf>,
    keyring: Option<PathBuf>,
}

impl GpgCli {
    /// Resolve the executable and build an engine handle.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::BackendUnavailable` if the binary cannot be found.
    pub fn new(config: GpgConfig) -> Result<Self, CipherError> {
        let binary = which::which(&config.binary).map_err(|e| {
            CipherError::unavailable(
                "gpg",
                format!(
                    "cannot find gpg executable '{}' ({}). Set {} to its path",
                    config.binary,
                    e,
                    crate::core::constants::ENV_GPG_BINARY
                ),
            )
        })?;
        debug!(binary = %binary.display(), "gpg engine ready");
        Ok(Self {
            binary,
            homedir: config.homedir,
            keyring: config.keyring,
        })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["--batch", "--yes", "--quiet"]);
        if let Some(homedir) = &self.homedir {
            cmd.arg("--homedir").arg(homedir);
        }
        if let Some(keyring) = &self.keyring {
            cmd.arg("--no-default-keyring").arg("--keyring").arg(keyring);
        }
        cmd.arg("--decrypt");
        cmd
    }
}

impl Engine for GpgCli {
    fn name(&self) -> &'static str {
        "gpg"
    }

    fn available(&self) -> bool {
        self.binary.is_file()
    }

    fn decrypt(&self, armored: &str) -> Result<String, CipherError> {
        trace!(ciphertext_len = armored.len(), "decrypting with GPG");

        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CipherError::DecryptionFailed(format!("failed to spawn gpg: {}", e)))?;

        // Feed stdin from its own thread so a large message cannot fill the
        // pipe while gpg is blocked writing stdout.
        let writer = child.stdin.take().map(|mut stdin| {
            let ciphertext = armored.as_bytes().to_vec();
            thread::spawn(move || stdin.write_all(&ciphertext))
        });

        let output = child.wait_with_output();
        let written = match writer {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked"))
            }),
            None => Ok(()),
        };
        let output = output
            .map_err(|e| CipherError::DecryptionFailed(format!("gpg command failed: {}", e)))?;
        // Only this buffer is wiped; the returned String is an ordinary heap
        // allocation owned by the caller.
        let stdout = Zeroizing::new(output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CipherError::DecryptionFailed(format!(
                "gpg decrypt failed: {}",
                stderr.trim()
            )));
        }
        written.map_err(|e| {
            CipherError::DecryptionFailed(format!("failed to write ciphertext: {}", e))
        })?;

        let plaintext = std::str::from_utf8(&stdout)
            .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)))?
            .to_string();

        trace!(plaintext_len = plaintext.len(), "decrypted with GPG");
        Ok(plaintext)
    }
}
