//! Constants used throughout confcrypt.
//!
//! Centralizes marker keys, environment variable names and defaults.

/// Mapping key that wraps GPG ciphertext.
pub const GPG_MARKER: &str = "_gpg";

/// Mapping key that wraps base64 KMS ciphertext.
pub const KMS_MARKER: &str = "_kms";

/// Substring identifying inline ASCII-armored PGP data.
pub const PGP_ARMOR: &str = "BEGIN PGP";

/// Environment override for the GPG home directory.
pub const ENV_GPG_HOMEDIR: &str = "CONFCRYPT_GPG_HOMEDIR";

/// Environment override for the gpg executable.
pub const ENV_GPG_BINARY: &str = "CONFCRYPT_GPG_BINARY";

/// Environment override for the GPG keyring file.
pub const ENV_GPG_KEYRING: &str = "CONFCRYPT_GPG_KEYRING";

/// Default GPG home directory.
pub const DEFAULT_GPG_HOMEDIR: &str = "~/.gnupg/";

/// Executable looked up on `PATH` when no binary is configured.
pub const DEFAULT_GPG_BINARY: &str = "gpg";

/// Log filter variable read by the binary.
pub const ENV_LOG: &str = "CONFCRYPT_LOG";
