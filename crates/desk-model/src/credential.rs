//! Salted password digests
//!
//! Login secrets are never kept in plain text: they are hashed with a
//! random 16-byte salt on entry and verified against the digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Salted SHA-256 password digest
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Hex-encoded salt
    salt: String,
    /// Hex-encoded digest of salt || password
    digest: String,
}

impl Credential {
    /// Hash a plain-text secret with a fresh salt
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let salt: [u8; 16] = rand::random();
        Self::with_salt(&salt, secret)
    }

    fn with_salt(salt: &[u8], secret: &str) -> Self {
        Self {
            salt: hex::encode(salt),
            digest: digest(salt, secret),
        }
    }

    /// Check a plain-text secret against the stored digest
    #[must_use]
    pub fn verify(&self, secret: &str) -> bool {
        match hex::decode(&self.salt) {
            Ok(salt) => digest(&salt, secret) == self.digest,
            Err(_) => false,
        }
    }
}

fn digest(salt: &[u8], secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

impl From<&str> for Credential {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}
