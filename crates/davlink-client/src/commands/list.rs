//! Linked account listing.

use davlink_core::UserId;
use davlink_server::OnboardingService;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Print the accounts linked to `user`. Passwords are never shown.
pub async fn list(user: String, config: &ClientConfig) -> ClientResult<()> {
    let service = OnboardingService::from_config(config.to_service_config()?)?;
    let user = UserId::new(user);
    let records = service.credentials_for(&user).await?;

    if records.is_empty() {
        println!("No CalDAV accounts linked for {}", user);
        return Ok(());
    }

    for record in &records {
        let account = match service.reveal(record) {
            Ok(input) => format!("{}@{}", input.username, input.url),
            Err(e) => {
                warn!(credential_id = %record.id, error = %e, "Could not decrypt stored credential");
                "<undecryptable>".to_string()
            }
        };
        println!(
            "{}  {}  {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M"),
            account
        );
    }

    Ok(())
}
