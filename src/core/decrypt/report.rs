//! Pass outcome bookkeeping.

use serde::Serialize;
use std::fmt;

use crate::core::traverse::NodePath;

/// Which backend a pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassKind {
    Gpg,
    Kms,
}

impl PassKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gpg => "gpg",
            Self::Kms => "kms",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PassKind {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpg" => Ok(Self::Gpg),
            "kms" => Ok(Self::Kms),
            other => Err(crate::error::ConfigError::UnknownPass(other.to_string())),
        }
    }
}

/// Why a node was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    DecryptionFailed,
    AccessDenied,
    MalformedNode,
}

/// A node the pass could not decrypt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: String,
    pub kind: FailureKind,
    pub message: String,
}

/// What one pass did to the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub pass: PassKind,
    pub available: bool,
    pub decrypted: usize,
    pub failures: Vec<Failure>,
}

impl PassReport {
    pub fn new(pass: PassKind) -> Self {
        Self {
            pass,
            available: true,
            decrypted: 0,
            failures: Vec::new(),
        }
    }

    /// Report for a pass whose backend could not be constructed.
    pub fn unavailable(pass: PassKind) -> Self {
        Self {
            available: false,
            ..Self::new(pass)
        }
    }

    pub(crate) fn record(&mut self, path: &NodePath, kind: FailureKind, message: impl Into<String>) {
        self.failures.push(Failure {
            path: path.to_string(),
            kind,
            message: message.into(),
        });
    }

    /// Failures of one kind.
    pub fn count(&self, kind: FailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }
}
