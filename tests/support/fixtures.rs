//! Test fixtures and constants.

/// Armored message the stub engine knows how to open.
pub const ARMORED: &str =
    "-----BEGIN PGP MESSAGE-----\n\nhQEMA7stub\n=abcd\n-----END PGP MESSAGE-----\n";

/// Plaintext behind `ARMORED`.
pub const ARMORED_PLAINTEXT: &str = "i-u-i";

/// Armored message no stub key opens.
pub const ARMORED_FOREIGN: &str =
    "-----BEGIN PGP MESSAGE-----\n\nhQEMA7foreign\n=wxyz\n-----END PGP MESSAGE-----\n";

/// Raw KMS ciphertext blobs used by the stub key service.
pub const KMS_BLOB: &[u8] = b"\x01\x02\x03kms-blob";
pub const KMS_DENIED_BLOB: &[u8] = b"\x01\x02\x03denied";
pub const KMS_BROKEN_BLOB: &[u8] = b"\x01\x02\x03throttled";

/// Base64 of a blob, as stored under a `_kms` key.
pub fn b64(blob: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(blob)
}
