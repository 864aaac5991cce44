//! CredentialProbe trait and implementations.
//!
//! A probe answers one question: do these credentials authenticate against
//! the remote server? The answer is a [`ProbeOutcome`], never an error, so
//! callers branch on a closed set of cases:
//!
//! ```text
//! ┌────────────────┐   PROPFIND Depth: 0    ┌────────────────┐
//! │  CalDavProbe   │ ─────────────────────▶ │ CalDAV Server  │
//! └───────┬────────┘  Authorization: Basic  └────────────────┘
//!         │
//!         ▼
//!  Verified | Rejected | Unreachable
//! ```
//!
//! # Example
//!
//! ```ignore
//! use davlink_providers::{CredentialProbe, ProbeOutcome};
//! use davlink_providers::caldav::{CalDavProbe, ProbeConfig};
//!
//! let probe = CalDavProbe::new(ProbeConfig::default())?;
//! match probe.probe("https://cal.example.com/dav/", "alice", "secret").await {
//!     ProbeOutcome::Verified { .. } => { /* store it */ }
//!     other => eprintln!("not linked: {}", other),
//! }
//! ```

#[cfg(feature = "caldav")]
pub mod caldav;
pub mod error;
pub mod probe;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use probe::{BoxFuture, CredentialProbe, ProbeOutcome};
