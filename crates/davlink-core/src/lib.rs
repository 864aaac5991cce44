//! Core types: credentials, credential cipher, tracing

pub mod cipher;
pub mod credential;
pub mod tracing;

pub use cipher::{CipherError, CredentialCipher, EncryptionKey, KEY_SIZE, decrypt, encrypt};
pub use credential::{CredentialInput, CredentialKind, NewCredential, StoredCredential, UserId};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
