//! Service error types.

use std::io;

use davlink_core::CipherError;
use davlink_providers::ProviderError;
use thiserror::Error;

/// Result type for service setup.
pub type ServerResult<T> = Result<T, ServerError>;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while assembling the service.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The probe could not be built.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Errors raised by credential stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing the backing file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The records could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file has content this version cannot use.
    #[error("Corrupt credential store at {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Errors returned by [`OnboardingService::onboard`](crate::OnboardingService::onboard).
///
/// `Display` carries the operator-facing detail. Callers should show
/// [`OnboardingError::user_message`] instead.
#[derive(Debug, Error)]
pub enum OnboardingError {
    /// No authenticated caller identity.
    #[error("no authenticated caller")]
    Unauthenticated,

    /// The CalDAV server answered but refused the credentials.
    #[error("CalDAV server rejected the credentials: {reason}")]
    ProbeRejected { reason: String },

    /// The CalDAV server could not be reached or answered garbage.
    #[error("CalDAV server unreachable: {cause}")]
    ProbeUnreachable { cause: String },

    /// The key is missing or malformed, or encryption failed.
    #[error("credential encryption failed: {0}")]
    Encryption(#[from] CipherError),

    /// The credential bundle could not be serialized or parsed.
    #[error("credential serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store failed the write or read.
    #[error("credential persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl OnboardingError {
    /// Returns a stable identifier for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::ProbeRejected { .. } => "probe_rejected",
            Self::ProbeUnreachable { .. } => "probe_unreachable",
            Self::Encryption(_) => "encryption_error",
            Self::Serialization(_) => "serialization_error",
            Self::Persistence(_) => "persistence_error",
        }
    }

    /// Returns the message shown to the caller.
    ///
    /// Every failure after the auth check maps to the same text so the
    /// response does not reveal anything about the remote server.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unauthenticated => crate::UNAUTHENTICATED_MESSAGE,
            _ => crate::GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Returns true for faults in this process's own setup (key, store).
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            Self::Encryption(_) | Self::Serialization(_) | Self::Persistence(_)
        )
    }
}
