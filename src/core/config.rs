//! Backend configuration.
//!
//! `GpgOptions` carries what the caller asked for explicitly. Resolving it
//! into a `GpgConfig` fills the gaps from the environment and then from
//! compiled-in defaults, in that order. `KmsOptions` is handed to the SDK as
//! given.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::core::constants;

/// Caller supplied GPG settings. `None` means "not set by the caller".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GpgOptions {
    #[serde(default)]
    pub homedir: Option<String>,
    #[serde(default)]
    pub binary: Option<String>,
    #[serde(default)]
    pub keyring: Option<String>,
}

/// Fully resolved GPG settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpgConfig {
    pub homedir: Option<PathBuf>,
    pub binary: String,
    pub keyring: Option<PathBuf>,
}

impl GpgOptions {
    /// Resolve against the process environment.
    pub fn resolve(&self) -> GpgConfig {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve with a custom environment lookup.
    pub fn resolve_with<F>(&self, env: F) -> GpgConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: &Option<String>, var: &str, default: Option<&str>| {
            explicit
                .clone()
                .or_else(|| env(var).filter(|v| !v.is_empty()))
                .or_else(|| default.map(str::to_string))
        };

        let homedir = pick(
            &self.homedir,
            constants::ENV_GPG_HOMEDIR,
            Some(constants::DEFAULT_GPG_HOMEDIR),
        );
        let binary = pick(&self.binary, constants::ENV_GPG_BINARY, None)
            .unwrap_or_else(|| constants::DEFAULT_GPG_BINARY.to_string());
        let keyring = pick(&self.keyring, constants::ENV_GPG_KEYRING, None);

        let config = GpgConfig {
            homedir: homedir.map(|h| expand_home(&h)),
            binary,
            keyring: keyring.map(|k| expand_home(&k)),
        };
        debug!(?config, "resolved gpg config");
        config
    }
}

/// Key service session parameters, passed through to the SDK untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KmsOptions {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
