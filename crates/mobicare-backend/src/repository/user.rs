//! # User Repository
//!
//! Store operations for the `users/{identity_id}` role records.
//!
//! ## Record Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  First successful authentication                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ensure_record() ── record exists? ──► yes ──► no-op                    │
//! │       │                                                                 │
//! │       └── no ──► write { email, role: user, createdAt, ... }            │
//! │                                                                         │
//! │  Records are created once and never overwritten by this system.         │
//! │  Promoting someone to admin is a manual store edit.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::store::{decode, encode, RealtimeStore};
use mobicare_core::types::{Role, UserRecord};

const USERS_PATH: &str = "users";

/// Repository for user role records.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn RealtimeStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        UserRepository { store }
    }

    fn path_for(uid: &str) -> String {
        format!("{}/{}", USERS_PATH, uid)
    }

    /// Writes the role record for `uid` unless one already exists.
    ///
    /// An existing record is left completely untouched, including its
    /// role. Repeated sign-ins must never demote a provisioned admin
    /// back to `user`.
    pub async fn ensure_record(&self, uid: &str, record: &UserRecord) -> StoreResult<()> {
        let path = Self::path_for(uid);

        if self.store.get(&path).await?.is_some() {
            debug!(uid = %uid, "User record already exists, keeping it");
            return Ok(());
        }

        let doc = encode(&path, record)?;
        self.store.put(&path, doc).await?;
        debug!(uid = %uid, "User record created");
        Ok(())
    }

    /// Fetches the role record for `uid`, if one exists.
    pub async fn get(&self, uid: &str) -> StoreResult<Option<UserRecord>> {
        let path = Self::path_for(uid);
        match self.store.get(&path).await? {
            Some(doc) => Ok(Some(decode(&path, doc)?)),
            None => Ok(None),
        }
    }

    /// Resolves the role for `uid`, failing OPEN to `user`.
    ///
    /// Role lookup gates an upgrade (admin panel), not a downgrade, so
    /// a missing record, a malformed record, or a store outage all
    /// resolve to the least-privileged role instead of blocking
    /// sign-in.
    pub async fn role_of(&self, uid: &str) -> Role {
        match self.get(uid).await {
            Ok(Some(record)) => record.role,
            Ok(None) => {
                debug!(uid = %uid, "No user record, defaulting role to user");
                Role::User
            }
            Err(e) => {
                warn!(uid = %uid, error = %e, "Role lookup failed, defaulting to user");
                Role::User
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::Utc;
    use serde_json::json;

    fn record(email: &str, role: Role) -> UserRecord {
        UserRecord {
            email: email.to_string(),
            role,
            display_name: None,
            photo_url: None,
            provider: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_ensure_record_creates_once() {
        let store = Arc::new(MemoryStore::new());
        let repo = UserRepository::new(store);

        repo.ensure_record("uid-1", &record("a@b.com", Role::User))
            .await
            .unwrap();

        let stored = repo.get("uid-1").await.unwrap().unwrap();
        assert_eq!(stored.role, Role::User);
    }

    #[tokio::test]
    async fn test_ensure_record_never_overwrites() {
        let store = Arc::new(MemoryStore::new());
        let repo = UserRepository::new(store);

        // Provisioned admin already in the store
        repo.ensure_record("uid-1", &record("boss@shop.com", Role::Admin))
            .await
            .unwrap();

        // A later sign-in tries to write the default record
        repo.ensure_record("uid-1", &record("boss@shop.com", Role::User))
            .await
            .unwrap();

        assert_eq!(repo.role_of("uid-1").await, Role::Admin);
    }

    #[tokio::test]
    async fn test_role_defaults_to_user_when_record_missing() {
        let store = Arc::new(MemoryStore::new());
        let repo = UserRepository::new(store);
        assert_eq!(repo.role_of("nobody").await, Role::User);
    }

    #[tokio::test]
    async fn test_role_fails_open_on_malformed_record() {
        let store = Arc::new(MemoryStore::with_tree(json!({
            "users": { "uid-1": { "role": 42 } }
        })));
        let repo = UserRepository::new(store);
        assert_eq!(repo.role_of("uid-1").await, Role::User);
    }
}
