//! # Session State
//!
//! The resolved authentication state of the storefront.
//!
//! ## Session Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  App start                                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Resolving  ──── first identity event ────►  Resolved                   │
//! │  (render nothing                             { identity: None }         │
//! │   auth-dependent yet)                        { identity: Some, role }   │
//! │                                                                         │
//! │  Role resolution: every sign-in triggers a users/{uid} lookup.          │
//! │  The lookup FAILS OPEN to `user`, so a store outage never locks         │
//! │  anyone out of shopping - it only hides the admin panel.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking Discipline
//! The snapshot lives behind a `std::sync::RwLock`. The lock is only
//! held to copy data in or out; the role lookup happens BEFORE taking
//! it. Never await while holding it.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{debug, info};

use mobicare_backend::{Identity, IdentityProvider, UserRepository};
use mobicare_core::types::Role;

/// A snapshot of the authentication state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Session {
    /// The first identity event has not arrived yet.
    Resolving,
    /// We know who (if anyone) is signed in, and their role.
    #[serde(rename_all = "camelCase")]
    Resolved {
        identity: Option<Identity>,
        role: Role,
    },
}

/// Holds the current session and keeps it in sync with the identity
/// provider.
#[derive(Clone)]
pub struct SessionState {
    provider: Arc<dyn IdentityProvider>,
    users: UserRepository,
    session: Arc<RwLock<Session>>,
}

impl SessionState {
    /// Creates a session state that starts out `Resolving`.
    pub fn new(provider: Arc<dyn IdentityProvider>, users: UserRepository) -> Self {
        SessionState {
            provider,
            users,
            session: Arc::new(RwLock::new(Session::Resolving)),
        }
    }

    /// The identity provider, for auth commands.
    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.provider
    }

    /// Spawns the listener that pumps identity events into this state.
    ///
    /// The subscription delivers the current identity first, so the
    /// session leaves `Resolving` as soon as the task gets scheduled.
    /// The task ends when the provider is dropped.
    pub fn spawn_listener(&self) -> tokio::task::JoinHandle<()> {
        let state = self.clone();
        let mut events = self.provider.subscribe();
        tokio::spawn(async move {
            while let Some(identity) = events.next().await {
                state.handle_identity_change(identity).await;
            }
            debug!("Identity event stream closed");
        })
    }

    /// Applies one identity transition: resolves the role, then swaps
    /// the snapshot.
    ///
    /// Auth commands call this directly (so the caller gets a resolved
    /// view back) while the spawned listener replays the same events
    /// from the broadcast. Both paths converge on one rule: an event
    /// is only applied if it still matches the provider's current
    /// identity. A stale event - one overtaken by a newer sign-in or
    /// sign-out - is dropped, so the duplicate delivery can reorder
    /// but never overwrite a fresher snapshot.
    ///
    /// The session re-enters `Resolving` for the duration of the role
    /// lookup, so a consumer never reads the PREVIOUS user's role
    /// against the next user's identity.
    pub async fn handle_identity_change(&self, identity: Option<Identity>) {
        let current = self.provider.current();
        if identity.as_ref().map(|i| i.uid.as_str()) != current.as_ref().map(|i| i.uid.as_str()) {
            debug!("Dropping stale identity event");
            return;
        }

        if let Ok(mut session) = self.session.write() {
            *session = Session::Resolving;
        }

        let resolved = match identity {
            Some(identity) => {
                let role = self.users.role_of(&identity.uid).await;
                info!(email = %identity.email, role = ?role, "Session resolved");
                Session::Resolved {
                    identity: Some(identity),
                    role,
                }
            }
            None => {
                debug!("Session resolved: signed out");
                Session::Resolved {
                    identity: None,
                    role: Role::User,
                }
            }
        };

        if let Ok(mut session) = self.session.write() {
            *session = resolved;
        }
    }

    /// The current session snapshot.
    pub fn snapshot(&self) -> Session {
        self.session
            .read()
            .map(|s| s.clone())
            .unwrap_or(Session::Resolving)
    }

    /// The signed-in identity, if the session has resolved to one.
    pub fn current_identity(&self) -> Option<Identity> {
        match self.snapshot() {
            Session::Resolved { identity, .. } => identity,
            Session::Resolving => None,
        }
    }

    /// Whether the resolved session belongs to an admin.
    pub fn is_admin(&self) -> bool {
        matches!(
            self.snapshot(),
            Session::Resolved {
                identity: Some(_),
                role: Role::Admin,
            }
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mobicare_backend::{LocalIdentityProvider, MemoryStore};
    use mobicare_core::types::UserRecord;

    fn state_with_store(store: Arc<MemoryStore>) -> (Arc<LocalIdentityProvider>, SessionState) {
        let provider = Arc::new(LocalIdentityProvider::new());
        let users = UserRepository::new(store);
        let state = SessionState::new(provider.clone(), users);
        (provider, state)
    }

    #[tokio::test]
    async fn test_starts_resolving() {
        let (_, state) = state_with_store(Arc::new(MemoryStore::new()));
        assert_eq!(state.snapshot(), Session::Resolving);
        assert!(!state.is_admin());
    }

    #[tokio::test]
    async fn test_resolves_signed_out() {
        let (provider, state) = state_with_store(Arc::new(MemoryStore::new()));
        state.handle_identity_change(provider.current()).await;

        assert_eq!(
            state.snapshot(),
            Session::Resolved {
                identity: None,
                role: Role::User
            }
        );
    }

    #[tokio::test]
    async fn test_resolves_role_from_user_record() {
        let store = Arc::new(MemoryStore::new());
        let (provider, state) = state_with_store(store.clone());

        let identity = provider.sign_up("boss@shop.com", "secret1").await.unwrap();
        let users = UserRepository::new(store);
        users
            .ensure_record(
                &identity.uid,
                &UserRecord {
                    email: identity.email.clone(),
                    role: Role::Admin,
                    display_name: None,
                    photo_url: None,
                    provider: None,
                    created_at: Utc::now(),
                },
            )
            .await
            .unwrap();

        state.handle_identity_change(provider.current()).await;
        assert!(state.is_admin());
        assert_eq!(state.current_identity(), Some(identity));
    }

    #[tokio::test]
    async fn test_missing_record_resolves_to_user() {
        let (provider, state) = state_with_store(Arc::new(MemoryStore::new()));
        provider.sign_up("a@b.com", "secret1").await.unwrap();

        state.handle_identity_change(provider.current()).await;
        assert!(!state.is_admin());
        assert!(state.current_identity().is_some());
    }

    #[tokio::test]
    async fn test_stale_sign_out_event_cannot_overwrite_fresh_sign_in() {
        let (provider, state) = state_with_store(Arc::new(MemoryStore::new()));
        let identity = provider.sign_up("a@b.com", "secret1").await.unwrap();
        state.handle_identity_change(Some(identity.clone())).await;

        // A signed-out event overtaken by the sign-in above must be dropped
        state.handle_identity_change(None).await;
        assert_eq!(state.current_identity(), Some(identity));
    }

    #[tokio::test]
    async fn test_stale_sign_in_event_cannot_resurrect_signed_out_user() {
        let (provider, state) = state_with_store(Arc::new(MemoryStore::new()));
        let identity = provider.sign_up("a@b.com", "secret1").await.unwrap();
        provider.sign_out().await.unwrap();
        state.handle_identity_change(None).await;

        state.handle_identity_change(Some(identity)).await;
        assert_eq!(state.current_identity(), None);
        assert!(matches!(
            state.snapshot(),
            Session::Resolved { identity: None, .. }
        ));
    }

    #[tokio::test]
    async fn test_session_serializes_with_status_tag() {
        let session = Session::Resolved {
            identity: None,
            role: Role::User,
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["role"], "user");
    }
}
