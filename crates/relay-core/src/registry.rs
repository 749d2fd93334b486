//! User registry storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::UserRecord;

/// Read-modify-write step applied to one record under the store's lock.
///
/// Receives the current record (if any) and returns the replacement, or
/// `None` to leave the stored value untouched.
pub type RecordUpdate<'a> =
    Box<dyn FnOnce(Option<&UserRecord>) -> Option<UserRecord> + Send + 'a>;

/// Keyed storage for user records.
///
/// Implementations must make `update` atomic with respect to every other
/// writer so a record is never observed half-written.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Snapshot of the record for `user_id`.
    async fn get(&self, user_id: &str) -> Option<UserRecord>;

    /// Insert or replace the record for `user_id`.
    async fn upsert(&self, user_id: &str, record: UserRecord);

    /// Atomically apply `update` to the record for `user_id`.
    ///
    /// Returns a snapshot of the record as it stands after the update.
    async fn update(&self, user_id: &str, update: RecordUpdate<'_>) -> Option<UserRecord>;

    /// Number of stored records.
    async fn count(&self) -> usize;
}

/// Process-lifetime registry guarded by a single lock.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryRegistry {
    async fn get(&self, user_id: &str) -> Option<UserRecord> {
        self.users.read().await.get(user_id).cloned()
    }

    async fn upsert(&self, user_id: &str, record: UserRecord) {
        self.users
            .write()
            .await
            .insert(user_id.to_string(), record);
    }

    async fn update(&self, user_id: &str, update: RecordUpdate<'_>) -> Option<UserRecord> {
        let mut users = self.users.write().await;
        if let Some(next) = update(users.get(user_id)) {
            users.insert(user_id.to_string(), next);
        }
        users.get(user_id).cloned()
    }

    async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing() {
        let registry = MemoryRegistry::new();
        assert!(registry.get("U1").await.is_none());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let registry = MemoryRegistry::new();
        let mut record = UserRecord::start_now();
        record.name = Some("Alice".to_string());
        registry.upsert("U1", record).await;

        registry.upsert("U1", UserRecord::start_now()).await;

        let stored = registry.get("U1").await.unwrap();
        assert!(stored.name.is_none());
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_update_none_leaves_record() {
        let registry = MemoryRegistry::new();
        let after = registry.update("U1", Box::new(|_: Option<&UserRecord>| None)).await;
        assert!(after.is_none());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_update_sees_current_value() {
        let registry = MemoryRegistry::new();
        registry.upsert("U1", UserRecord::start_now()).await;

        let after = registry
            .update(
                "U1",
                Box::new(|current: Option<&UserRecord>| {
                    let mut next = current.cloned()?;
                    next.name = Some("Bob".to_string());
                    Some(next)
                }),
            )
            .await
            .unwrap();

        assert_eq!(after.name.as_deref(), Some("Bob"));
        assert_eq!(registry.get("U1").await, Some(after));
    }
}
