//! Decryption backends.
//!
//! Confcrypt never does cryptography itself. It talks to one of two kinds of
//! collaborator:
//!
//! - **Engine**: a local engine that takes ASCII-armored text and returns
//!   plaintext. `GpgCli` drives the `gpg` executable.
//! - **KeyService**: a remote key-management service that takes a binary
//!   ciphertext blob. `AwsKms` (feature `aws`) drives AWS KMS.
//!
//! ## Adding a New Backend
//!
//! 1. Implement `Engine` or `KeyService`
//! 2. Add the implementation in a new file
//! 3. Feature-gate if it pulls in a heavy SDK
//! 4. Register a factory on `Decryptor`

use crate::error::CipherError;

pub mod gpg;

#[cfg(feature = "aws")]
pub mod aws;

pub use gpg::GpgCli;

#[cfg(feature = "aws")]
pub use aws::AwsKms;

/// Local decryption engine.
pub trait Engine {
    /// Backend name for logs and reports.
    fn name(&self) -> &'static str;

    /// Whether the engine can be used at all.
    fn available(&self) -> bool {
        true
    }

    /// Decrypt ASCII-armored ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` when the engine rejects the
    /// input or produces unusable output.
    fn decrypt(&self, armored: &str) -> Result<String, CipherError>;
}

/// Remote key-management service.
pub trait KeyService {
    /// Backend name for logs and reports.
    fn name(&self) -> &'static str;

    /// Whether the service client can be used at all.
    fn available(&self) -> bool {
        true
    }

    /// Decrypt a raw ciphertext blob.
    ///
    /// # Errors
    ///
    /// `CipherError::AccessDenied` when the key is missing or the caller lacks
    /// permission; any other variant is treated as a hard failure.
    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, CipherError>;
}

impl<T: Engine + ?Sized> Engine for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn available(&self) -> bool {
        (**self).available()
    }

    fn decrypt(&self, armored: &str) -> Result<String, CipherError> {
        (**self).decrypt(armored)
    }
}

impl<T: KeyService + ?Sized> KeyService for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn available(&self) -> bool {
        (**self).available()
    }

    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).decrypt(blob)
    }
}
