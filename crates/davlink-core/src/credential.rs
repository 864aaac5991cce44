//! Credential types shared by the probe, the onboarding service and the stores.
//!
//! A [`CredentialInput`] only lives for the duration of one onboarding
//! request. What outlives the request is a [`StoredCredential`], whose
//! `encrypted_key` is the ciphertext of the input's JSON form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an authenticated user, as handed over by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the identifier is empty (no established identity).
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of a stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    /// A CalDAV calendar account (Basic auth).
    CaldavCalendar,
}

impl CredentialKind {
    /// Returns the persisted name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CaldavCalendar => "caldav_calendar",
        }
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied CalDAV account details.
///
/// The field order is the canonical serialization order.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialInput {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
    /// CalDAV server URL.
    pub url: String,
}

impl CredentialInput {
    /// Creates a new credential input.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            url: url.into(),
        }
    }

    /// Serializes the bundle to its canonical JSON bytes.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Parses a bundle from JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

impl fmt::Debug for CredentialInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialInput")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("url", &self.url)
            .finish()
    }
}

/// Insert payload handed to a credential store.
#[derive(Clone, PartialEq, Eq)]
pub struct NewCredential {
    /// Credential kind.
    pub kind: CredentialKind,
    /// Owner of the credential.
    pub user_id: UserId,
    /// Ciphertext of the serialized [`CredentialInput`].
    pub encrypted_key: Vec<u8>,
}

impl NewCredential {
    /// Creates a CalDAV calendar credential for `user_id`.
    pub fn caldav(user_id: UserId, encrypted_key: Vec<u8>) -> Self {
        Self {
            kind: CredentialKind::CaldavCalendar,
            user_id,
            encrypted_key,
        }
    }
}

impl fmt::Debug for NewCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewCredential")
            .field("kind", &self.kind)
            .field("user_id", &self.user_id)
            .field("encrypted_key_len", &self.encrypted_key.len())
            .finish()
    }
}

/// A persisted, encrypted credential record.
///
/// Records are never updated in place; linking the same account again
/// produces a new record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    /// Record identifier.
    pub id: Uuid,
    /// Owner of the credential.
    pub user_id: UserId,
    /// Credential kind.
    pub kind: CredentialKind,
    /// Ciphertext of the serialized [`CredentialInput`].
    #[serde(with = "base64_bytes")]
    pub encrypted_key: Vec<u8>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl StoredCredential {
    /// Materializes an insert payload into a record with a fresh id.
    pub fn from_new(credential: NewCredential) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: credential.user_id,
            kind: credential.kind,
            encrypted_key: credential.encrypted_key,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("kind", &self.kind)
            .field("encrypted_key_len", &self.encrypted_key.len())
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Serializes ciphertext as standard base64 text.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_json_field_order() {
        let input = CredentialInput::new("alice", "correct", "https://cal.example.com/dav/");
        let json = String::from_utf8(input.to_json_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"username":"alice","password":"correct","url":"https://cal.example.com/dav/"}"#
        );
        assert_eq!(CredentialInput::from_json_bytes(json.as_bytes()).unwrap(), input);
    }

    #[test]
    fn debug_redacts_password() {
        let input = CredentialInput::new("alice", "hunter2", "https://cal.example.com/");
        let debug = format!("{:?}", input);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&CredentialKind::CaldavCalendar).unwrap();
        assert_eq!(json, "\"caldav_calendar\"");
        assert_eq!(CredentialKind::CaldavCalendar.to_string(), "caldav_calendar");
    }

    #[test]
    fn empty_user_id() {
        assert!(UserId::new("").is_empty());
        assert!(UserId::new("   ").is_empty());
        assert!(!UserId::from("42").is_empty());
    }

    #[test]
    fn stored_credential_encodes_ciphertext_as_base64() {
        let record = StoredCredential::from_new(NewCredential::caldav(
            UserId::new("42"),
            vec![0, 1, 2, 253, 254, 255],
        ));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["encrypted_key"], "AAEC/f7/");
        assert_eq!(json["kind"], "caldav_calendar");
        assert_eq!(json["user_id"], "42");

        let back: StoredCredential = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn fresh_records_get_distinct_ids() {
        let a = StoredCredential::from_new(NewCredential::caldav(UserId::new("1"), vec![1]));
        let b = StoredCredential::from_new(NewCredential::caldav(UserId::new("1"), vec![1]));
        assert_ne!(a.id, b.id);
    }
}
