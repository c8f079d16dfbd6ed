//! GPG pass.
//!
//! Recognizes both conventions:
//!
//! ```text
//! {"key": "-----BEGIN PGP MESSAGE----- ..."}             -> {"key": "plaintext"}
//! {"key": {"_gpg": "-----BEGIN PGP ...", "note": "x"}}   -> {"key": "plaintext"}
//! ```
//!
//! Engine failures never abort the pass. The node is left as it was and the
//! failure is logged and recorded.

use tracing::{debug, error};

use super::report::{FailureKind, PassKind, PassReport};
use crate::core::cipher::Engine;
use crate::core::constants::{GPG_MARKER, PGP_ARMOR};
use crate::core::node::ConfigNode;
use crate::core::traverse::{self, NodePath, Policy};
use crate::error::Result;

/// Traversal policy driving an `Engine`.
pub struct GpgPass<E> {
    engine: E,
    report: PassReport,
}

impl<E: Engine> GpgPass<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            report: PassReport::new(PassKind::Gpg),
        }
    }

    /// Run the pass over `tree`.
    ///
    /// An unavailable engine turns the pass into an identity transform.
    pub fn run(mut self, tree: &ConfigNode) -> Result<(ConfigNode, PassReport)> {
        if !self.engine.available() {
            error!(
                backend = self.engine.name(),
                "gpg engine unavailable, secrets stay encrypted"
            );
            return Ok((tree.clone(), PassReport::unavailable(PassKind::Gpg)));
        }
        let out = traverse::transform(tree, &mut self)?;
        Ok((out, self.report))
    }

    fn decrypt(&mut self, path: &NodePath, armored: &str) -> Option<String> {
        match self.engine.decrypt(armored) {
            Ok(plaintext) => {
                debug!(%path, "decrypted gpg value");
                self.report.decrypted += 1;
                Some(plaintext)
            }
            Err(e) => {
                error!(%path, error = %e, "gpg error unpacking secret");
                self.report
                    .record(path, FailureKind::DecryptionFailed, e.to_string());
                None
            }
        }
    }
}

impl<E: Engine> Policy for GpgPass<E> {
    fn marker(&self) -> &'static str {
        GPG_MARKER
    }

    fn unwrap_marker(&mut self, path: &NodePath, value: &ConfigNode) -> Result<Option<String>> {
        match value.as_str() {
            Some(armored) => Ok(self.decrypt(path, armored)),
            None => {
                debug!(%path, kind = value.kind(), "skipping _gpg marker with non-string value");
                self.report.record(
                    path,
                    FailureKind::MalformedNode,
                    format!("expected string, found {}", value.kind()),
                );
                Ok(None)
            }
        }
    }

    fn inline(&mut self, path: &NodePath, value: &str) -> Result<Option<String>> {
        if !value.contains(PGP_ARMOR) {
            return Ok(None);
        }
        Ok(self.decrypt(path, value))
    }
}
