//! CalDAV probe configuration.

use std::time::Duration;

/// Configuration for the CalDAV probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Upper bound on the whole request, including reading the body.
    pub timeout: Duration,

    /// Whether to verify TLS certificates.
    pub verify_tls: bool,

    /// User agent string.
    pub user_agent: String,

    /// Treat a success status without a `current-user-principal` href as a
    /// rejection instead of a verification.
    pub require_principal: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            verify_tls: true,
            user_agent: format!("davlink/{}", env!("CARGO_PKG_VERSION")),
            require_principal: false,
        }
    }
}

impl ProbeConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables TLS verification (for testing only).
    pub fn with_insecure_tls(mut self) -> Self {
        self.verify_tls = false;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Requires a parsed principal for a verification.
    pub fn with_required_principal(mut self) -> Self {
        self.require_principal = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ProbeConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.verify_tls);
        assert!(!config.require_principal);
        assert!(config.user_agent.starts_with("davlink/"));
    }

    #[test]
    fn builder_methods() {
        let config = ProbeConfig::default()
            .with_timeout(Duration::from_millis(250))
            .with_insecure_tls()
            .with_user_agent("test-agent")
            .with_required_principal();

        assert_eq!(config.timeout, Duration::from_millis(250));
        assert!(!config.verify_tls);
        assert_eq!(config.user_agent, "test-agent");
        assert!(config.require_principal);
    }
}
