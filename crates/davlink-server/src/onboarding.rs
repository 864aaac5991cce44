//! CalDAV account onboarding.
//!
//! One call runs a fixed sequence:
//!
//! ```text
//! AuthCheck ─▶ Probe ─┬─ Verified ─▶ Encrypt ─▶ Persist ─▶ Done
//!                     └─ Rejected | Unreachable ─▶ Failed
//! ```
//!
//! The store insert is the last await point, so dropping the future at any
//! earlier point (for example when the caller's request is cancelled while
//! the probe is in flight) leaves no record behind.

use std::sync::Arc;

use davlink_core::{CredentialCipher, CredentialInput, NewCredential, StoredCredential, UserId};
use davlink_providers::caldav::CalDavProbe;
use davlink_providers::{CredentialProbe, ProbeOutcome};
use tracing::{debug, error, info, warn};

use crate::config::ServiceConfig;
use crate::error::{OnboardingError, ServerResult, StoreError};
use crate::store::{CredentialStore, FileStore};

/// Message returned to callers for every failure after the auth check.
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not add this caldav account";

/// Message returned to callers without an established identity.
pub const UNAUTHENTICATED_MESSAGE: &str = "You must be logged in to do this";

/// Links CalDAV accounts to users after verifying them.
///
/// The service performs no URL normalization and no duplicate check: linking
/// the same server twice for one user stores two independent records.
#[derive(Clone)]
pub struct OnboardingService {
    probe: Arc<dyn CredentialProbe>,
    store: Arc<dyn CredentialStore>,
    cipher: CredentialCipher,
}

impl OnboardingService {
    /// Creates a service from its collaborators.
    pub fn new(
        probe: Arc<dyn CredentialProbe>,
        store: Arc<dyn CredentialStore>,
        cipher: CredentialCipher,
    ) -> Self {
        Self {
            probe,
            store,
            cipher,
        }
    }

    /// Creates a service with a [`CalDavProbe`] and a [`FileStore`].
    ///
    /// The key is not checked here; call [`OnboardingService::cipher`] and
    /// `validate()` to fail fast at startup.
    pub fn from_config(config: ServiceConfig) -> ServerResult<Self> {
        let probe = CalDavProbe::new(config.probe)?;
        let store = FileStore::new(config.store_path);
        Ok(Self::new(
            Arc::new(probe),
            Arc::new(store),
            CredentialCipher::new(config.encryption_key),
        ))
    }

    /// Returns the credential cipher.
    pub fn cipher(&self) -> &CredentialCipher {
        &self.cipher
    }

    /// Verifies `input` against its CalDAV server and stores it encrypted
    /// for `caller`.
    ///
    /// # Errors
    ///
    /// - [`OnboardingError::Unauthenticated`] when `caller` is absent or
    ///   empty; nothing else runs.
    /// - [`OnboardingError::ProbeRejected`] / [`OnboardingError::ProbeUnreachable`]
    ///   when the probe fails; nothing is written.
    /// - [`OnboardingError::Encryption`] when the key is missing or
    ///   malformed; nothing is written.
    /// - [`OnboardingError::Persistence`] when the store fails the insert.
    pub async fn onboard(
        &self,
        caller: Option<&UserId>,
        input: CredentialInput,
    ) -> Result<(), OnboardingError> {
        let user_id = match caller {
            Some(id) if !id.is_empty() => id,
            _ => {
                warn!(url = %input.url, "Refusing CalDAV onboarding without an authenticated caller");
                return Err(OnboardingError::Unauthenticated);
            }
        };

        match self
            .probe
            .probe(&input.url, &input.username, &input.password)
            .await
        {
            ProbeOutcome::Verified { principal } => {
                debug!(user_id = %user_id, url = %input.url, principal = ?principal, "CalDAV credentials verified");
            }
            ProbeOutcome::Rejected { reason } => {
                warn!(user_id = %user_id, url = %input.url, reason = %reason, "Could not add this caldav account: server rejected the credentials");
                return Err(OnboardingError::ProbeRejected { reason });
            }
            ProbeOutcome::Unreachable { cause } => {
                error!(user_id = %user_id, url = %input.url, cause = %cause, "Could not add this caldav account: transport error");
                return Err(OnboardingError::ProbeUnreachable { cause });
            }
        }

        let plaintext = input.to_json_bytes()?;
        let encrypted_key = self.cipher.encrypt(&plaintext).map_err(|e| {
            error!(user_id = %user_id, error = %e, "Refusing to store CalDAV credentials: encryption unavailable");
            OnboardingError::Encryption(e)
        })?;

        let record = self
            .store
            .create(NewCredential::caldav(user_id.clone(), encrypted_key))
            .await
            .map_err(|e| {
                error!(user_id = %user_id, error = %e, "Could not persist CalDAV credentials");
                OnboardingError::Persistence(e)
            })?;

        info!(user_id = %user_id, credential_id = %record.id, kind = %record.kind, "Linked CalDAV account");
        Ok(())
    }

    /// Returns the stored credentials of `user_id`, oldest first.
    pub async fn credentials_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<StoredCredential>, StoreError> {
        self.store.find_by_user(user_id).await
    }

    /// Decrypts a stored record back into its credential bundle.
    pub fn reveal(&self, record: &StoredCredential) -> Result<CredentialInput, OnboardingError> {
        let plaintext = self.cipher.decrypt(&record.encrypted_key)?;
        Ok(CredentialInput::from_json_bytes(&plaintext)?)
    }
}
