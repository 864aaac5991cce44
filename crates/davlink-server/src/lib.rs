//! Credential onboarding service and credential stores.
//!
//! This crate wires the pieces of the linking pipeline together:
//! - [`OnboardingService`] runs auth check, probe, encryption and insert
//! - [`CredentialStore`] is the persistence seam, with [`MemoryStore`] and
//!   [`FileStore`] backends
//! - [`ServiceConfig`] carries the externally supplied key and settings
//!
//! # Example
//!
//! ```rust,no_run
//! use davlink_core::{CredentialInput, UserId};
//! use davlink_server::{OnboardingService, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig::new("/var/lib/davlink/credentials.json")
//!         .with_encryption_key("0123456789abcdef0123456789abcdef");
//!     let service = OnboardingService::from_config(config)?;
//!
//!     let user = UserId::new("42");
//!     let input = CredentialInput::new("alice", "secret", "https://cal.example.com/dav/");
//!     if let Err(e) = service.onboard(Some(&user), input).await {
//!         println!("{}", e.user_message());
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod onboarding;
mod store;

pub use config::ServiceConfig;
pub use error::{OnboardingError, ServerError, ServerResult, StoreError, StoreResult};
pub use onboarding::{GENERIC_FAILURE_MESSAGE, OnboardingService, UNAUTHENTICATED_MESSAGE};
pub use store::{CredentialStore, FileStore, MemoryStore};
