//! Error types for probe operations.
//!
//! A [`ProviderError`] describes why a probe could not be set up or why an
//! exchange with the remote server broke down. Probes fold the latter into
//! [`ProbeOutcome::Unreachable`](crate::ProbeOutcome::Unreachable).

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Network error - connection refused, DNS resolution, TLS, etc.
    NetworkError,
    /// The request did not complete within the configured timeout.
    Timeout,
    /// Invalid response from the server - unreadable body, malformed XML.
    InvalidResponse,
    /// Configuration error - e.g. the HTTP client could not be built.
    ConfigurationError,
    /// Internal provider error - unexpected state, bug.
    InternalError,
}

impl ProviderErrorCode {
    /// Returns true if this error happened on the wire rather than locally.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::NetworkError | Self::Timeout | Self::InvalidResponse
        )
    }

    /// Returns a stable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetworkError => "network_error",
            Self::Timeout => "timeout",
            Self::InvalidResponse => "invalid_response",
            Self::ConfigurationError => "configuration_error",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while probing a remote server.
#[derive(Debug, Error)]
pub struct ProviderError {
    /// The error code categorizing this error.
    code: ProviderErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::Timeout, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_codes() {
        assert!(ProviderErrorCode::NetworkError.is_transport());
        assert!(ProviderErrorCode::Timeout.is_transport());
        assert!(ProviderErrorCode::InvalidResponse.is_transport());
        assert!(!ProviderErrorCode::ConfigurationError.is_transport());
        assert!(!ProviderErrorCode::InternalError.is_transport());
    }

    #[test]
    fn error_display_includes_code() {
        let err = ProviderError::timeout("request timed out after 30s");
        assert_eq!(err.code(), ProviderErrorCode::Timeout);
        assert_eq!(err.message(), "request timed out after 30s");
        assert_eq!(err.to_string(), "timeout: request timed out after 30s");
    }

    #[test]
    fn error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("connection reset");
        let err = ProviderError::network("request failed").with_source(io_err);
        assert!(err.source().is_some());
    }
}
