//! AWS KMS key service.
//!
//! Enable with `--features aws`.
//!
//! Session parameters (`region`, `profile`, `endpoint_url`) are handed to the
//! SDK as given; anything left unset falls through to the SDK's own
//! provider chain. KMS embeds the key reference in the ciphertext blob, so
//! decryption never needs a key id.

use aws_sdk_kms::error::ProvideErrorMetadata;
use aws_sdk_kms::primitives::Blob;
use tracing::{debug, trace};

use super::KeyService;
use crate::core::config::KmsOptions;
use crate::error::CipherError;

/// Service error codes that mean "not yours to read".
const ACCESS_DENIED_CODES: &[&str] = &["AccessDeniedException", "NotFoundException"];

/// Map a service error code and message onto a `CipherError`.
fn classify(code: Option<&str>, message: Option<&str>) -> CipherError {
    let code = code.unwrap_or("unknown");
    let message = format!("KMS decrypt failed: {}", message.unwrap_or(code));
    if ACCESS_DENIED_CODES.contains(&code) {
        CipherError::AccessDenied(message)
    } else {
        CipherError::Service(format!("{} ({})", message, code))
    }
}

/// AWS KMS client bound to a single-threaded runtime.
pub struct AwsKms {
    runtime: tokio::runtime::Runtime,
    client: aws_sdk_kms::Client,
}

impl AwsKms {
    /// Load an SDK session and build a KMS client.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::BackendUnavailable` if no region can be resolved
    /// or the runtime cannot be created.
    pub fn new(options: &KmsOptions) -> Result<Self, CipherError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                CipherError::unavailable("kms", format!("failed to create runtime: {}", e))
            })?;

        let config = runtime.block_on(async {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
            if let Some(region) = &options.region {
                loader = loader.region(aws_config::Region::new(region.clone()));
            }
            if let Some(profile) = &options.profile {
                loader = loader.profile_name(profile);
            }
            if let Some(endpoint) = &options.endpoint_url {
                loader = loader.endpoint_url(endpoint);
            }
            loader.load().await
        });

        let region = config
            .region()
            .ok_or_else(|| CipherError::unavailable("kms", "missing or invalid aws region"))?;
        debug!(region = %region, "kms client ready");

        Ok(Self {
            client: aws_sdk_kms::Client::new(&config),
            runtime,
        })
    }
}

impl KeyService for AwsKms {
    fn name(&self) -> &'static str {
        "kms"
    }

    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, CipherError> {
        trace!(ciphertext_len = blob.len(), "decrypting with AWS KMS");

        let result = self
            .runtime
            .block_on(
                self.client
                    .decrypt()
                    .ciphertext_blob(Blob::new(blob))
                    .send(),
            )
            .map_err(|e| classify(e.code(), e.message()))?;

        let plaintext = result
            .plaintext()
            .ok_or_else(|| CipherError::Service("no plaintext returned".into()))?;

        trace!(plaintext_len = plaintext.as_ref().len(), "decrypted with AWS KMS");
        Ok(plaintext.as_ref().to_vec())
    }
}
