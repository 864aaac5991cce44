//! CalDAV credential probe.
//!
//! This module provides a [`CalDavProbe`] that checks credentials against a
//! CalDAV-compatible server.
//!
//! # Features
//!
//! - HTTP Basic authentication
//! - A single `PROPFIND` with `Depth: 0` for `DAV:current-user-principal`
//! - Request timeout and TLS configuration (verification can be disabled for testing)
//!
//! # Example
//!
//! ```ignore
//! use davlink_providers::caldav::{CalDavProbe, ProbeConfig};
//!
//! let probe = CalDavProbe::new(ProbeConfig::default().with_required_principal())?;
//! let outcome = probe.probe("https://caldav.example.com/", "user", "password").await;
//! ```

mod auth;
mod client;
mod config;
mod probe;
mod xml;

pub use config::ProbeConfig;
pub use probe::CalDavProbe;
