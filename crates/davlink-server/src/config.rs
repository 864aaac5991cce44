//! Service configuration.

use std::path::PathBuf;
use std::time::Duration;

use davlink_providers::caldav::ProbeConfig;

/// Onboarding service configuration.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Symmetric key for credential bundles, as supplied by the operator.
    pub encryption_key: Option<String>,

    /// Path to the JSON credential store.
    pub store_path: PathBuf,

    /// CalDAV probe settings.
    pub probe: ProbeConfig,
}

impl ServiceConfig {
    /// Creates a configuration storing credentials at `store_path`, with no key.
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            encryption_key: None,
            store_path: store_path.into(),
            probe: ProbeConfig::default(),
        }
    }

    /// Builder: set the encryption key.
    pub fn with_encryption_key(mut self, key: impl Into<String>) -> Self {
        self.encryption_key = Some(key.into());
        self
    }

    /// Builder: set the probe configuration.
    pub fn with_probe(mut self, probe: ProbeConfig) -> Self {
        self.probe = probe;
        self
    }

    /// Builder: set the probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field(
                "encryption_key",
                &self.encryption_key.as_ref().map(|_| "<redacted>"),
            )
            .field("store_path", &self.store_path)
            .field("probe", &self.probe)
            .finish()
    }
}
