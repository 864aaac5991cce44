//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/davlink/config.toml` by default.
//!
//! The encryption key supports secret references:
//! - `pass::path/in/store` is resolved via `pass show`
//! - `env::VAR_NAME` is resolved from the environment
//! - plain text is used as-is

use std::path::{Path, PathBuf};
use std::time::Duration;

use davlink_core::TracingConfig;
use davlink_providers::caldav::ProbeConfig;
use davlink_server::ServiceConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the davlink client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Key settings.
    pub security: SecuritySettings,

    /// Credential store settings.
    pub store: StoreSettings,

    /// CalDAV probe settings.
    pub probe: ProbeSettings,
}

/// Key settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Credential encryption key (supports `pass::` and `env::` prefixes).
    pub encryption_key: Option<String>,
}

/// Credential store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the credential store. Defaults to the user data directory.
    pub path: Option<PathBuf>,
}

/// CalDAV probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Verify TLS certificates.
    pub verify_tls: bool,

    /// Treat a success without `current-user-principal` as a rejection.
    pub require_principal: bool,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_secs: ProbeConfig::DEFAULT_TIMEOUT_SECS,
            verify_tls: true,
            require_principal: false,
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("failed to read config: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("davlink")
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("davlink")
    }

    /// Returns the credential store path.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join("credentials.json"))
    }

    /// Builds the tracing configuration. Debug output is on when either the
    /// `--debug` flag or `debug = true` in the file asks for it.
    pub fn tracing_config(&self, cli_debug: bool) -> TracingConfig {
        if cli_debug || self.debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::default()
        }
    }

    /// Builds the probe configuration.
    pub fn probe_config(&self) -> ProbeConfig {
        let mut config =
            ProbeConfig::default().with_timeout(Duration::from_secs(self.probe.timeout_secs));
        if !self.probe.verify_tls {
            config = config.with_insecure_tls();
        }
        if self.probe.require_principal {
            config = config.with_required_principal();
        }
        config
    }

    /// Converts to service configuration.
    ///
    /// Resolves the encryption key (expanding `pass::` / `env::` references).
    /// A missing key is left for the cipher to report.
    pub fn to_service_config(&self) -> ClientResult<ServiceConfig> {
        let mut config = ServiceConfig::new(self.store_path()).with_probe(self.probe_config());

        if let Some(ref raw) = self.security.encryption_key {
            config = config.with_encryption_key(crate::secret::resolve(raw)?);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert!(!config.debug);
        assert!(config.security.encryption_key.is_none());
        assert_eq!(config.probe.timeout_secs, 30);
        assert!(config.probe.verify_tls);
        assert!(!config.probe.require_principal);
        assert!(config.store_path().ends_with("davlink/credentials.json"));
    }

    #[test]
    fn parse_full_toml() {
        let toml_content = r#"
debug = true

[security]
encryption_key = "0123456789abcdef0123456789abcdef"

[store]
path = "/var/lib/davlink/credentials.json"

[probe]
timeout_secs = 5
verify_tls = false
require_principal = true
"#;
        let config: ClientConfig = toml::from_str(toml_content).unwrap();
        assert!(config.debug);
        assert_eq!(
            config.store_path(),
            PathBuf::from("/var/lib/davlink/credentials.json")
        );

        let probe = config.probe_config();
        assert_eq!(probe.timeout, Duration::from_secs(5));
        assert!(!probe.verify_tls);
        assert!(probe.require_principal);

        let service = config.to_service_config().unwrap();
        assert_eq!(
            service.encryption_key.as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
    }

    #[test]
    fn debug_from_file_or_flag_enables_debug_logging() {
        let quiet = ClientConfig::default();
        assert_eq!(quiet.tracing_config(false).default_level, tracing::Level::WARN);
        assert_eq!(quiet.tracing_config(true).default_level, tracing::Level::DEBUG);

        let from_file: ClientConfig = toml::from_str("debug = true\n").unwrap();
        assert_eq!(
            from_file.tracing_config(false).default_level,
            tracing::Level::DEBUG
        );
    }

    #[test]
    fn partial_probe_section_keeps_defaults() {
        let config: ClientConfig = toml::from_str("[probe]\ntimeout_secs = 10\n").unwrap();
        assert_eq!(config.probe.timeout_secs, 10);
        assert!(config.probe.verify_tls);
    }

    #[test]
    fn encryption_key_env_reference() {
        unsafe {
            std::env::set_var("_DAVLINK_TEST_KEY", "fedcba9876543210fedcba9876543210");
        }

        let config: ClientConfig =
            toml::from_str("[security]\nencryption_key = \"env::_DAVLINK_TEST_KEY\"\n").unwrap();
        let service = config.to_service_config().unwrap();
        assert_eq!(
            service.encryption_key.as_deref(),
            Some("fedcba9876543210fedcba9876543210")
        );

        unsafe {
            std::env::remove_var("_DAVLINK_TEST_KEY");
        }
    }

    #[test]
    fn unresolvable_key_reference_errors() {
        let config: ClientConfig = toml::from_str(
            "[security]\nencryption_key = \"env::_DAVLINK_KEY_THAT_IS_NOT_SET_12345\"\n",
        )
        .unwrap();
        assert!(matches!(
            config.to_service_config(),
            Err(ClientError::Secret(_))
        ));
    }

    #[test]
    fn missing_key_is_left_to_the_cipher() {
        let service = ClientConfig::default().to_service_config().unwrap();
        assert!(service.encryption_key.is_none());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store]\npath = \"/tmp/creds.json\"\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.store_path(), PathBuf::from("/tmp/creds.json"));
    }

    #[test]
    fn load_from_invalid_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "debug = \"yes please\"\n").unwrap();

        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }
}
