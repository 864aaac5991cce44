//! Secret reference resolver.
//!
//! Values in `config.toml` and the `--password` flag can use special
//! prefixes to reference secrets stored elsewhere:
//!
//! - `pass::path/in/store` runs `pass show path/in/store` and takes the first line
//! - `env::VAR_NAME` reads `$VAR_NAME` from the environment
//! - anything else is returned as-is (plain text)

use thiserror::Error;

/// Errors raised while resolving a secret reference.
#[derive(Debug, Error)]
pub enum SecretError {
    /// `pass` could not be started.
    #[error("failed to run `pass show {path}`: {source}")]
    PassSpawn {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// `pass` exited with an error.
    #[error("`pass show {path}` failed (exit {status}): {stderr}")]
    PassFailed {
        path: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// `pass` printed nothing.
    #[error("`pass show {0}` produced no output")]
    PassEmpty(String),

    /// The referenced environment variable is unset.
    #[error("environment variable `{0}` is not set")]
    EnvMissing(String),
}

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, SecretError> {
    if let Some(path) = value.strip_prefix("pass::") {
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix("env::") {
        resolve_env(var)
    } else {
        Ok(value.to_string())
    }
}

fn resolve_pass(path: &str) -> Result<String, SecretError> {
    let output = std::process::Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|source| SecretError::PassSpawn {
            path: path.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(SecretError::PassFailed {
            path: path.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.to_string())
        .ok_or_else(|| SecretError::PassEmpty(path.to_string()))
}

fn resolve_env(var: &str) -> Result<String, SecretError> {
    std::env::var(var).map_err(|_| SecretError::EnvMissing(var.to_string()))
}
