//! In-process stand-ins for the gpg engine and the key service.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use confcrypt::core::cipher::{Engine, KeyService};
use confcrypt::error::CipherError;

use super::fixtures::*;

/// Engine that opens a fixed set of armored messages.
#[derive(Clone)]
pub struct StubEngine {
    secrets: HashMap<String, String>,
    available: bool,
    calls: Rc<RefCell<Vec<String>>>,
}

impl StubEngine {
    pub fn new() -> Self {
        let mut secrets = HashMap::new();
        secrets.insert(ARMORED.to_string(), ARMORED_PLAINTEXT.to_string());
        Self {
            secrets,
            available: true,
            calls: Rc::default(),
        }
    }

    pub fn with_secret(mut self, armored: &str, plaintext: &str) -> Self {
        self.secrets.insert(armored.to_string(), plaintext.to_string());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Ciphertexts the engine was asked to decrypt, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Engine for StubEngine {
    fn name(&self) -> &'static str {
        "stub-gpg"
    }

    fn available(&self) -> bool {
        self.available
    }

    fn decrypt(&self, armored: &str) -> Result<String, CipherError> {
        self.calls.borrow_mut().push(armored.to_string());
        self.secrets
            .get(armored)
            .cloned()
            .ok_or_else(|| CipherError::DecryptionFailed("No secret key".into()))
    }
}

/// What the stub key service answers for a blob.
#[derive(Clone)]
pub enum Reply {
    Plaintext(Vec<u8>),
    AccessDenied,
    Fail(&'static str),
}

/// Key service answering from a fixed table.
///
/// Unknown blobs are answered with `InvalidCiphertextException`.
#[derive(Clone)]
pub struct StubKms {
    replies: HashMap<Vec<u8>, Reply>,
    calls: Rc<RefCell<Vec<Vec<u8>>>>,
}

impl StubKms {
    pub fn new() -> Self {
        let mut replies = HashMap::new();
        replies.insert(KMS_BLOB.to_vec(), Reply::Plaintext(b"secret".to_vec()));
        replies.insert(KMS_DENIED_BLOB.to_vec(), Reply::AccessDenied);
        replies.insert(KMS_BROKEN_BLOB.to_vec(), Reply::Fail("ThrottlingException"));
        Self {
            replies,
            calls: Rc::default(),
        }
    }

    pub fn with_reply(mut self, blob: &[u8], reply: Reply) -> Self {
        self.replies.insert(blob.to_vec(), reply);
        self
    }

    /// Blobs the service was asked to decrypt, in order.
    pub fn calls(&self) -> Vec<Vec<u8>> {
        self.calls.borrow().clone()
    }
}

impl KeyService for StubKms {
    fn name(&self) -> &'static str {
        "stub-kms"
    }

    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.calls.borrow_mut().push(blob.to_vec());
        match self.replies.get(blob) {
            Some(Reply::Plaintext(p)) => Ok(p.clone()),
            Some(Reply::AccessDenied) => Err(CipherError::AccessDenied(
                "AccessDeniedException: not authorized".into(),
            )),
            Some(Reply::Fail(code)) => Err(CipherError::Service(code.to_string())),
            None => Err(CipherError::Service("InvalidCiphertextException".into())),
        }
    }
}
