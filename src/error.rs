//! Error types.
//!
//! `Error` is the top-level type returned by the public API. Backend and
//! decryption failures live in `CipherError`; problems with the input
//! document or caller options live in `ConfigError`.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised by decryption backends.
///
/// Only `Unexpected` ever escapes a pass. The other variants are degraded to
/// log records and report entries by the pass that observed them.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable {
        backend: &'static str,
        reason: String,
    },

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("unexpected {backend} error at {path}: {message}")]
    Unexpected {
        backend: &'static str,
        path: String,
        message: String,
    },
}

impl CipherError {
    /// Shorthand for an unavailable backend.
    pub fn unavailable(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            backend,
            reason: reason.into(),
        }
    }
}

/// Problems with the input document or caller supplied options.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown pass: {0}. Supported: gpg, kms")]
    UnknownPass(String),
}

pub type Result<T> = std::result::Result<T, Error>;
