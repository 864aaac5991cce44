//! Client error types.

use davlink_server::{OnboardingError, ServerError, StoreError};
use thiserror::Error;

use crate::secret::SecretError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A secret reference could not be resolved.
    #[error("secret error: {0}")]
    Secret(#[from] SecretError),

    /// The service could not be assembled.
    #[error("setup error: {0}")]
    Setup(#[from] ServerError),

    /// Onboarding failed. Displays only the caller-facing message.
    #[error("{}", .0.user_message())]
    Onboarding(#[from] OnboardingError),

    /// Reading stored credentials failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onboarding_errors_show_the_user_message() {
        let err = ClientError::from(OnboardingError::ProbeUnreachable {
            cause: "network_error: connection refused".to_string(),
        });
        assert_eq!(err.to_string(), "Could not add this caldav account");
    }

    #[test]
    fn config_error_display() {
        let err = ClientError::Config("missing key".to_string());
        assert_eq!(err.to_string(), "configuration error: missing key");
    }
}
