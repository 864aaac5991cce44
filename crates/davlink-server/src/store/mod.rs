//! Credential persistence.
//!
//! The onboarding service only needs two operations from a store: insert a
//! new record and look records up by owner. Schema and migration concerns
//! belong to the backend.

mod file;
mod memory;

use davlink_core::{NewCredential, StoredCredential, UserId};
use davlink_providers::BoxFuture;

use crate::error::StoreResult;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Persistence seam for encrypted credentials.
///
/// `create` is the only write. A failed `create` must leave no record
/// behind; a dropped `create` future either committed fully or not at all.
pub trait CredentialStore: Send + Sync {
    /// Inserts a new record and returns it with its assigned id.
    fn create(&self, credential: NewCredential) -> BoxFuture<'_, StoreResult<StoredCredential>>;

    /// Returns all records owned by `user_id`, oldest first.
    fn find_by_user<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, StoreResult<Vec<StoredCredential>>>;
}
