//! Account linking command.

use davlink_core::{CredentialInput, UserId};
use davlink_server::OnboardingService;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Verify a CalDAV account and store it for `user`.
///
/// The key is checked before the server is contacted so a misconfigured
/// install fails without a network round trip.
pub async fn link(
    user: Option<String>,
    url: String,
    username: String,
    password: String,
    config: &ClientConfig,
) -> ClientResult<()> {
    let password = crate::secret::resolve(&password)?;
    let service_config = config.to_service_config()?;
    debug!(store = %service_config.store_path.display(), "Using credential store");

    let service = OnboardingService::from_config(service_config)?;
    service
        .cipher()
        .validate()
        .map_err(|e| ClientError::Config(format!("invalid encryption key: {}", e)))?;

    let caller = user.map(UserId::new);
    let input = CredentialInput::new(username, password, url.clone());
    service.onboard(caller.as_ref(), input).await?;

    println!("Linked CalDAV account at {}", url);
    Ok(())
}
