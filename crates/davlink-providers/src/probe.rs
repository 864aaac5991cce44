//! The credential probe abstraction.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::ProviderError;

/// A boxed future for use in trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of probing a remote server with a set of credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered the discovery request with a success status.
    Verified {
        /// The `current-user-principal` href, when the response carried one.
        principal: Option<String>,
    },
    /// The server answered but refused the request.
    Rejected {
        /// Status and reason reported by the server.
        reason: String,
    },
    /// The exchange failed before a usable answer came back.
    Unreachable {
        /// Transport-level detail (DNS, TLS, timeout, malformed body).
        cause: String,
    },
}

impl ProbeOutcome {
    /// Creates a rejected outcome.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Creates an unreachable outcome.
    pub fn unreachable(cause: impl Into<String>) -> Self {
        Self::Unreachable {
            cause: cause.into(),
        }
    }

    /// Returns true for [`ProbeOutcome::Verified`].
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// Returns a stable name for the outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified { .. } => "verified",
            Self::Rejected { .. } => "rejected",
            Self::Unreachable { .. } => "unreachable",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified {
                principal: Some(principal),
            } => write!(f, "verified (principal {})", principal),
            Self::Verified { principal: None } => write!(f, "verified"),
            Self::Rejected { reason } => write!(f, "rejected: {}", reason),
            Self::Unreachable { cause } => write!(f, "unreachable: {}", cause),
        }
    }
}

impl From<ProviderError> for ProbeOutcome {
    fn from(err: ProviderError) -> Self {
        Self::Unreachable {
            cause: err.to_string(),
        }
    }
}

/// Verifies credentials against a remote server.
///
/// Implementations perform at most one outbound request per call and never
/// retry. Dropping the returned future aborts any request in flight.
///
/// # Example
///
/// ```ignore
/// struct AlwaysVerified;
///
/// impl CredentialProbe for AlwaysVerified {
///     fn probe<'a>(&'a self, _url: &'a str, _user: &'a str, _pass: &'a str)
///         -> BoxFuture<'a, ProbeOutcome>
///     {
///         Box::pin(async { ProbeOutcome::Verified { principal: None } })
///     }
/// }
/// ```
pub trait CredentialProbe: Send + Sync {
    /// Probes `url` with HTTP credentials `username` / `password`.
    fn probe<'a>(
        &'a self,
        url: &'a str,
        username: &'a str,
        password: &'a str,
    ) -> BoxFuture<'a, ProbeOutcome>;
}
