//! KMS pass.
//!
//! Only the explicit wrapper is recognized:
//!
//! ```text
//! {"key": {"_kms": "<base64 ciphertext blob>", "note": "x"}} -> {"key": "plaintext"}
//! ```
//!
//! An access-denied answer degrades to a warning. Any other service failure
//! aborts the pass with `CipherError::Unexpected`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use super::report::{FailureKind, PassKind, PassReport};
use crate::core::cipher::KeyService;
use crate::core::constants::KMS_MARKER;
use crate::core::node::ConfigNode;
use crate::core::traverse::{self, NodePath, Policy};
use crate::error::{CipherError, Result};

/// Traversal policy driving a `KeyService`.
pub struct KmsPass<K> {
    service: K,
    report: PassReport,
}

impl<K: KeyService> KmsPass<K> {
    pub fn new(service: K) -> Self {
        Self {
            service,
            report: PassReport::new(PassKind::Kms),
        }
    }

    /// Run the pass over `tree`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Unexpected` on the first service failure that is
    /// not an access denial. Nodes after it are not visited.
    pub fn run(mut self, tree: &ConfigNode) -> Result<(ConfigNode, PassReport)> {
        if !self.service.available() {
            info!(
                backend = self.service.name(),
                "kms client unavailable, secrets stay encrypted"
            );
            return Ok((tree.clone(), PassReport::unavailable(PassKind::Kms)));
        }
        let out = traverse::transform(tree, &mut self)?;
        Ok((out, self.report))
    }

    fn decrypt(&mut self, path: &NodePath, encoded: &str) -> Result<Option<String>> {
        // Wrapped base64 (PEM-style line breaks) is accepted.
        let compact: String = encoded.split_ascii_whitespace().collect();
        let blob = match STANDARD.decode(&compact) {
            Ok(blob) => Zeroizing::new(blob),
            Err(e) => {
                error!(%path, error = %e, "kms value is not valid base64");
                self.report.record(
                    path,
                    FailureKind::DecryptionFailed,
                    format!("invalid base64: {}", e),
                );
                return Ok(None);
            }
        };

        let plaintext = match self.service.decrypt(&blob) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(CipherError::AccessDenied(message)) => {
                warn!(%path, "unable to decrypt kms value: key does not exist or no access");
                self.report
                    .record(path, FailureKind::AccessDenied, message);
                return Ok(None);
            }
            Err(e) => {
                return Err(CipherError::Unexpected {
                    backend: self.service.name(),
                    path: path.to_string(),
                    message: e.to_string(),
                }
                .into());
            }
        };

        // The service buffer is wiped on drop. The returned String is not.
        match std::str::from_utf8(&plaintext) {
            Ok(s) => {
                debug!(%path, "decrypted kms value");
                self.report.decrypted += 1;
                Ok(Some(s.to_string()))
            }
            Err(e) => {
                error!(%path, error = %e, "kms plaintext is not UTF-8");
                self.report.record(
                    path,
                    FailureKind::DecryptionFailed,
                    format!("UTF-8 error: {}", e),
                );
                Ok(None)
            }
        }
    }
}

impl<K: KeyService> Policy for KmsPass<K> {
    fn marker(&self) -> &'static str {
        KMS_MARKER
    }

    fn unwrap_marker(&mut self, path: &NodePath, value: &ConfigNode) -> Result<Option<String>> {
        match value.as_str() {
            Some(encoded) => self.decrypt(path, encoded),
            None => {
                debug!(%path, kind = value.kind(), "skipping _kms marker with non-string value");
                self.report.record(
                    path,
                    FailureKind::MalformedNode,
                    format!("expected string, found {}", value.kind()),
                );
                Ok(None)
            }
        }
    }
}
