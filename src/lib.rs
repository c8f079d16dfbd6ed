//! Confcrypt - decrypt secrets embedded in parsed configuration trees.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── decrypt       # Decrypt a JSON/TOML document
//! │   └── output        # Styled terminal output
//! └── core/             # Core library components
//!     ├── node          # ConfigNode tree model
//!     ├── traverse      # Pure rebuild traversal + Policy trait
//!     ├── config        # GPG/KMS backend options
//!     ├── cipher/       # Decryption backends
//!     │   ├── mod       # Engine and KeyService traits
//!     │   ├── gpg       # gpg CLI engine
//!     │   └── aws       # AWS KMS key service (feature `aws`)
//!     └── decrypt/      # Passes and orchestration
//!         ├── gpg       # `_gpg` markers + inline PGP armor
//!         ├── kms       # `_kms` markers
//!         └── report    # Per-pass outcome
//! ```
//!
//! # Example
//!
//! ```no_run
//! use confcrypt::{ConfigNode, Decryptor, GpgOptions, KmsOptions};
//!
//! let tree: ConfigNode = serde_json::from_str(r#"{"db": {"password": {"_kms": "AQID"}}}"#)?;
//! let tree = Decryptor::new()
//!     .with_gpg(GpgOptions::default())
//!     .with_kms(KmsOptions::default())
//!     .decrypt(&tree)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::{GpgOptions, KmsOptions};
pub use crate::core::decrypt::{gpg_decrypt, kms_decrypt, Decrypted, Decryptor, PassKind};
pub use crate::core::node::{ConfigNode, Mapping, Scalar};
pub use crate::error::{Error, Result};
