//! Pass orchestration.
//!
//! A `Decryptor` runs one pass per configured backend over the same tree.
//! Passes are independent: each one builds its own backend handle when it
//! starts and drops it when it ends. The output of one pass is the input of
//! the next, so a later pass may pick up ciphertext an earlier one left
//! behind.
//!
//! Default order is **gpg, then kms**. The local engine needs no network and
//! is cheap to try first. Call [`Decryptor::order`] to change it.
//!
//! A backend that cannot be constructed makes its pass an identity
//! transform. Only an unexpected key-service failure aborts the run.

use tracing::{debug, error, info};

use crate::core::cipher::{Engine, GpgCli, KeyService};
use crate::core::config::{GpgOptions, KmsOptions};
use crate::core::node::ConfigNode;
use crate::error::{CipherError, Result};

pub mod gpg;
pub mod kms;
pub mod report;

pub use gpg::GpgPass;
pub use kms::KmsPass;
pub use report::{Failure, FailureKind, PassKind, PassReport};

/// Pass order used unless overridden.
pub const DEFAULT_ORDER: [PassKind; 2] = [PassKind::Gpg, PassKind::Kms];

type EngineFactory = Box<dyn Fn() -> std::result::Result<Box<dyn Engine>, CipherError>>;
type KeyServiceFactory = Box<dyn Fn() -> std::result::Result<Box<dyn KeyService>, CipherError>>;

/// Tree with secrets resolved, plus what each pass did.
#[derive(Debug, Clone)]
pub struct Decrypted {
    pub tree: ConfigNode,
    pub reports: Vec<PassReport>,
}

/// Runs backend passes over a configuration tree.
pub struct Decryptor {
    order: Vec<PassKind>,
    engine: Option<EngineFactory>,
    key_service: Option<KeyServiceFactory>,
}

impl Default for Decryptor {
    fn default() -> Self {
        Self::new()
    }
}

impl Decryptor {
    /// A decryptor with the default order and no backends configured.
    pub fn new() -> Self {
        Self {
            order: DEFAULT_ORDER.to_vec(),
            engine: None,
            key_service: None,
        }
    }

    /// Use the `gpg` executable, resolving `options` when each pass starts.
    pub fn with_gpg(self, options: GpgOptions) -> Self {
        self.with_engine(move || GpgCli::new(options.resolve()))
    }

    /// Use AWS KMS with the given session parameters.
    #[cfg(feature = "aws")]
    pub fn with_kms(self, options: KmsOptions) -> Self {
        self.with_key_service(move || crate::core::cipher::AwsKms::new(&options))
    }

    /// Without the `aws` feature the kms pass is always unavailable.
    #[cfg(not(feature = "aws"))]
    pub fn with_kms(self, _options: KmsOptions) -> Self {
        self.with_key_service(|| -> std::result::Result<NoKeyService, CipherError> {
            Err(CipherError::unavailable(
                "kms",
                "AWS KMS support not compiled. Rebuild with: cargo install confcrypt --features aws",
            ))
        })
    }

    /// Use a custom engine factory for the gpg pass.
    pub fn with_engine<F, E>(mut self, factory: F) -> Self
    where
        F: Fn() -> std::result::Result<E, CipherError> + 'static,
        E: Engine + 'static,
    {
        self.engine = Some(Box::new(move || {
            factory().map(|e| Box::new(e) as Box<dyn Engine>)
        }));
        self
    }

    /// Use a custom key service factory for the kms pass.
    pub fn with_key_service<F, K>(mut self, factory: F) -> Self
    where
        F: Fn() -> std::result::Result<K, CipherError> + 'static,
        K: KeyService + 'static,
    {
        self.key_service = Some(Box::new(move || {
            factory().map(|k| Box::new(k) as Box<dyn KeyService>)
        }));
        self
    }

    /// Override the pass order.
    pub fn order(mut self, order: impl IntoIterator<Item = PassKind>) -> Self {
        self.order = order.into_iter().collect();
        self
    }

    /// Run every configured pass and return the resolved tree.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Unexpected` if the key service fails with
    /// anything other than an access denial.
    pub fn decrypt(&self, tree: &ConfigNode) -> Result<ConfigNode> {
        self.run(tree).map(|d| d.tree)
    }

    /// Like [`decrypt`](Self::decrypt) but keeps the per-pass reports.
    pub fn run(&self, tree: &ConfigNode) -> Result<Decrypted> {
        let mut current = tree.clone();
        let mut reports = Vec::with_capacity(self.order.len());

        for pass in &self.order {
            let report = match pass {
                PassKind::Gpg => {
                    let Some(factory) = &self.engine else {
                        debug!(%pass, "no engine configured, skipping pass");
                        continue;
                    };
                    match factory() {
                        Ok(engine) => {
                            let (out, report) = GpgPass::new(engine).run(&current)?;
                            current = out;
                            report
                        }
                        Err(e) => {
                            error!(error = %e, "failed to configure gpg, unable to decrypt secrets");
                            PassReport::unavailable(PassKind::Gpg)
                        }
                    }
                }
                PassKind::Kms => {
                    let Some(factory) = &self.key_service else {
                        debug!(%pass, "no key service configured, skipping pass");
                        continue;
                    };
                    match factory() {
                        Ok(service) => {
                            let (out, report) = KmsPass::new(service).run(&current)?;
                            current = out;
                            report
                        }
                        Err(e) => {
                            info!(error = %e, "missing or invalid kms configuration, unable to decrypt secrets");
                            PassReport::unavailable(PassKind::Kms)
                        }
                    }
                }
            };
            debug!(
                %pass,
                available = report.available,
                decrypted = report.decrypted,
                failures = report.failures.len(),
                "pass finished"
            );
            reports.push(report);
        }

        Ok(Decrypted {
            tree: current,
            reports,
        })
    }
}

/// Placeholder service type for builds without a key service SDK.
#[cfg(not(feature = "aws"))]
#[derive(Debug)]
pub struct NoKeyService;

#[cfg(not(feature = "aws"))]
impl KeyService for NoKeyService {
    fn name(&self) -> &'static str {
        "kms"
    }

    fn available(&self) -> bool {
        false
    }

    fn decrypt(&self, _blob: &[u8]) -> std::result::Result<Vec<u8>, CipherError> {
        Err(CipherError::unavailable("kms", "no key service compiled in"))
    }
}

/// Run a single gpg pass.
pub fn gpg_decrypt(tree: &ConfigNode, options: GpgOptions) -> Result<ConfigNode> {
    Decryptor::new()
        .order([PassKind::Gpg])
        .with_gpg(options)
        .decrypt(tree)
}

/// Run a single kms pass.
///
/// # Errors
///
/// See [`Decryptor::decrypt`].
pub fn kms_decrypt(tree: &ConfigNode, options: KmsOptions) -> Result<ConfigNode> {
    Decryptor::new()
        .order([PassKind::Kms])
        .with_kms(options)
        .decrypt(tree)
}
