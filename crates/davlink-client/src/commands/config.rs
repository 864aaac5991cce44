//! Configuration commands.

use davlink_core::CredentialCipher;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
///
/// A plain-text key is replaced by a placeholder; secret references are
/// printed as written.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(&redacted(config))
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", ClientConfig::default_path().display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    let service = config.to_service_config()?;
    CredentialCipher::new(service.encryption_key)
        .validate()
        .map_err(|e| ClientError::Config(format!("invalid encryption key: {}", e)))?;
    println!("Encryption key is valid.");

    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file and credential store paths.
pub fn path(config: &ClientConfig) -> ClientResult<()> {
    println!("config: {}", ClientConfig::default_path().display());
    println!("store: {}", config.store_path().display());
    Ok(())
}

fn redacted(config: &ClientConfig) -> ClientConfig {
    let mut config = config.clone();
    if let Some(ref key) = config.security.encryption_key {
        if !key.starts_with("env::") && !key.starts_with("pass::") {
            config.security.encryption_key = Some("<redacted>".to_string());
        }
    }
    config
}
