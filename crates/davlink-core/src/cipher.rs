//! Symmetric encryption for credential bundles.
//!
//! Uses AES-256-GCM with a random 12-byte nonce prepended to the output:
//! `nonce || ciphertext || tag`.
//!
//! The key is a process-wide secret supplied by configuration. It is handed
//! to [`CredentialCipher`] at construction and parsed on every call, so a
//! missing or malformed key surfaces as a [`CipherError`] at the point of
//! use instead of silently producing unencrypted output.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use thiserror::Error;

/// AES-256 key size (32 bytes).
pub const KEY_SIZE: usize = 32;
/// Nonce size for AES-256-GCM (12 bytes).
const NONCE_SIZE: usize = 12;
/// GCM tag size (16 bytes).
const TAG_SIZE: usize = 16;

/// Errors raised by the credential cipher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// No encryption key is configured.
    #[error("encryption key is not configured")]
    MissingKey,

    /// The configured key cannot be used.
    #[error("encryption key is malformed: {0}")]
    MalformedKey(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encrypt(String),

    /// Decryption failed (wrong key, truncated or tampered input).
    #[error("decryption failed: {0}")]
    Decrypt(String),
}

/// A validated 256-bit encryption key.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey([u8; KEY_SIZE]);

impl EncryptionKey {
    /// Builds a key from exactly [`KEY_SIZE`] raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        let key: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| {
            CipherError::MalformedKey(format!(
                "expected {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(key))
    }

    /// Parses a configured key value.
    ///
    /// Accepts either a 32-character string used as raw bytes, or standard
    /// base64 that decodes to 32 bytes. An empty value counts as missing.
    pub fn parse(value: &str) -> Result<Self, CipherError> {
        if value.is_empty() {
            return Err(CipherError::MissingKey);
        }
        if value.len() == KEY_SIZE {
            return Self::from_bytes(value.as_bytes());
        }

        let decoded = STANDARD.decode(value).map_err(|_| {
            CipherError::MalformedKey(format!(
                "expected {} raw characters or base64 of {} bytes",
                KEY_SIZE, KEY_SIZE
            ))
        })?;
        Self::from_bytes(&decoded)
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(..)")
    }
}

/// Encrypts `plaintext`, returning `nonce || ciphertext || tag`.
pub fn encrypt(plaintext: &[u8], key: &EncryptionKey) -> Result<Vec<u8>, CipherError> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = key
        .cipher()
        .encrypt(nonce, plaintext)
        .map_err(|e| CipherError::Encrypt(e.to_string()))?;

    let mut combined = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext);
    Ok(combined)
}

/// Decrypts output produced by [`encrypt`].
pub fn decrypt(data: &[u8], key: &EncryptionKey) -> Result<Vec<u8>, CipherError> {
    if data.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CipherError::Decrypt("ciphertext too short".into()));
    }

    let (nonce_bytes, ciphertext) = data.split_at(NONCE_SIZE);
    key.cipher()
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CipherError::Decrypt("authentication tag mismatch".into()))
}

/// Encrypts credential bundles with an injected process-wide key.
#[derive(Clone, Default)]
pub struct CredentialCipher {
    key: Option<String>,
}

impl CredentialCipher {
    /// Creates a cipher from an optional configured key value.
    pub fn new(key: Option<String>) -> Self {
        Self { key }
    }

    /// Creates a cipher with the given key value.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    /// Returns true if a key value was supplied (it may still be malformed).
    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// Checks that the configured key is present and well-formed.
    pub fn validate(&self) -> Result<(), CipherError> {
        self.key().map(|_| ())
    }

    /// Encrypts `plaintext` with the configured key.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        encrypt(plaintext, &self.key()?)
    }

    /// Decrypts `ciphertext` with the configured key.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        decrypt(ciphertext, &self.key()?)
    }

    fn key(&self) -> Result<EncryptionKey, CipherError> {
        match self.key.as_deref() {
            Some(raw) => EncryptionKey::parse(raw),
            None => Err(CipherError::MissingKey),
        }
    }
}

impl fmt::Debug for CredentialCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialCipher")
            .field("configured", &self.is_configured())
            .finish()
    }
}
