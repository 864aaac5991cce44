//! In-memory credential store.

use davlink_core::{NewCredential, StoredCredential, UserId};
use davlink_providers::BoxFuture;
use tokio::sync::Mutex;
use tracing::trace;

use super::CredentialStore;
use crate::error::StoreResult;

/// Credential store kept in process memory.
///
/// Useful for tests and for embedding the service where persistence is
/// handled elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StoredCredential>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl CredentialStore for MemoryStore {
    fn create(&self, credential: NewCredential) -> BoxFuture<'_, StoreResult<StoredCredential>> {
        Box::pin(async move {
            let record = StoredCredential::from_new(credential);
            let mut records = self.records.lock().await;
            records.push(record.clone());
            trace!(id = %record.id, total = records.len(), "Stored credential in memory");
            Ok(record)
        })
    }

    fn find_by_user<'a>(
        &'a self,
        user_id: &'a UserId,
    ) -> BoxFuture<'a, StoreResult<Vec<StoredCredential>>> {
        Box::pin(async move {
            let records = self.records.lock().await;
            Ok(records
                .iter()
                .filter(|r| &r.user_id == user_id)
                .cloned()
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_find_by_user() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        let alice = UserId::new("alice");
        let bob = UserId::new("bob");
        store
            .create(NewCredential::caldav(alice.clone(), vec![1, 2, 3]))
            .await
            .unwrap();
        store
            .create(NewCredential::caldav(bob.clone(), vec![4]))
            .await
            .unwrap();
        store
            .create(NewCredential::caldav(alice.clone(), vec![5]))
            .await
            .unwrap();

        assert_eq!(store.len().await, 3);
        let found = store.find_by_user(&alice).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].encrypted_key, vec![1, 2, 3]);
        assert_eq!(found[1].encrypted_key, vec![5]);
        assert!(
            store
                .find_by_user(&UserId::new("carol"))
                .await
                .unwrap()
                .is_empty()
        );
    }
}
