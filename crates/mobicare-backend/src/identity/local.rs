//! # Local Identity Provider
//!
//! In-process [`IdentityProvider`] used for development and tests.
//!
//! Accounts live in memory; passwords are hashed with Argon2 exactly as
//! a hosted deployment would, so credential handling is identical in
//! both environments. The federated flow has no real popup to show, so
//! its outcome is configurable: grant, cancelled, or blocked.

use std::collections::HashMap;
use std::sync::Mutex;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::AuthError;
use crate::identity::{Identity, IdentityEvents, IdentityProvider};

/// Buffered identity transitions before a slow subscriber lags.
const EVENT_CAPACITY: usize = 16;

/// What the next federated sign-in attempt will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FederatedOutcome {
    /// The popup completes and grants this email.
    Grant { email: String },
    /// The user closes the popup.
    Cancelled,
    /// The browser never opens the popup.
    Blocked,
}

/// A stored account.
#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password_hash: Option<String>,
    provider: Option<String>,
}

/// In-memory accounts plus the active session.
///
/// One lock guards both so a sign-in observes a consistent view. No
/// await ever happens while it is held.
#[derive(Debug, Default)]
struct ProviderState {
    /// Keyed by lowercased email.
    accounts: HashMap<String, Account>,
    current: Option<Identity>,
    federated: Option<FederatedOutcome>,
}

/// Local [`IdentityProvider`] implementation.
///
/// ## Usage
/// ```rust,ignore
/// let provider = LocalIdentityProvider::new();
/// let identity = provider.sign_up("a@b.com", "secret1").await?;
///
/// provider.set_federated_outcome(FederatedOutcome::Grant {
///     email: "g@gmail.com".to_string(),
/// });
/// let federated = provider.sign_in_federated().await?;
/// ```
pub struct LocalIdentityProvider {
    state: Mutex<ProviderState>,
    tx: broadcast::Sender<Option<Identity>>,
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalIdentityProvider {
    /// Creates a provider with no accounts and nobody signed in.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        LocalIdentityProvider {
            state: Mutex::new(ProviderState::default()),
            tx,
        }
    }

    /// Configures what the next federated sign-in does.
    ///
    /// Defaults to [`FederatedOutcome::Cancelled`] when never set; a
    /// popup that nobody interacts with never completes.
    pub fn set_federated_outcome(&self, outcome: FederatedOutcome) {
        self.lock_state().federated = Some(outcome);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ProviderState> {
        // Mutex poisoning only happens after a panic while holding the
        // lock; the held sections never panic, so recover the guard.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn set_current(&self, state: &mut ProviderState, identity: Option<Identity>) {
        state.current = identity.clone();
        // No subscribers is fine; session state may not be up yet
        let _ = self.tx.send(identity);
    }

    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::Provider(format!("Failed to hash password: {}", e)))
    }

    fn verify_password(password: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Provider-side policy checks, mirroring what a hosted provider
    /// enforces regardless of client validation.
    fn check_credentials(email: &str, password: &str) -> Result<(), AuthError> {
        if !email.contains('@') || email.trim().is_empty() {
            return Err(AuthError::InvalidEmail);
        }
        if password.chars().count() < 6 {
            return Err(AuthError::WeakPassword);
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        Self::check_credentials(email, password)?;
        let key = email.trim().to_lowercase();
        let hash = Self::hash_password(password)?;

        let mut state = self.lock_state();
        if state.accounts.contains_key(&key) {
            return Err(AuthError::EmailTaken);
        }

        let uid = Uuid::new_v4().to_string();
        state.accounts.insert(
            key.clone(),
            Account {
                uid: uid.clone(),
                password_hash: Some(hash),
                provider: None,
            },
        );

        let identity = Identity {
            uid,
            email: key,
            display_name: None,
            photo_url: None,
            provider: None,
        };
        info!(email = %identity.email, "Account created");
        self.set_current(&mut state, Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let key = email.trim().to_lowercase();

        let mut state = self.lock_state();
        let account = state
            .accounts
            .get(&key)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        // Federated-only accounts have no password to check
        let hash = account
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;
        if !Self::verify_password(password, hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let identity = Identity {
            uid: account.uid,
            email: key,
            display_name: None,
            photo_url: None,
            provider: None,
        };
        debug!(email = %identity.email, "Signed in");
        self.set_current(&mut state, Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in_federated(&self) -> Result<Identity, AuthError> {
        let mut state = self.lock_state();

        let email = match state.federated.clone() {
            Some(FederatedOutcome::Grant { email }) => email.trim().to_lowercase(),
            Some(FederatedOutcome::Blocked) => return Err(AuthError::PopupBlocked),
            Some(FederatedOutcome::Cancelled) | None => return Err(AuthError::PopupCancelled),
        };

        // Returning federated users keep their uid
        let account = state
            .accounts
            .entry(email.clone())
            .or_insert_with(|| Account {
                uid: Uuid::new_v4().to_string(),
                password_hash: None,
                provider: Some("google".to_string()),
            })
            .clone();

        let display_name = email.split('@').next().map(|s| s.to_string());
        let identity = Identity {
            uid: account.uid,
            email,
            display_name,
            photo_url: None,
            provider: Some("google".to_string()),
        };
        info!(email = %identity.email, "Federated sign-in");
        self.set_current(&mut state, Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let mut state = self.lock_state();
        if state.current.is_some() {
            debug!("Signed out");
            self.set_current(&mut state, None);
        }
        Ok(())
    }

    fn current(&self) -> Option<Identity> {
        self.lock_state().current.clone()
    }

    fn subscribe(&self) -> IdentityEvents {
        let state = self.lock_state();
        IdentityEvents::new(state.current.clone(), self.tx.subscribe())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let provider = LocalIdentityProvider::new();

        let created = provider.sign_up("asha@example.com", "secret1").await.unwrap();
        assert_eq!(created.email, "asha@example.com");
        assert!(created.provider.is_none());

        provider.sign_out().await.unwrap();
        let back = provider.sign_in("Asha@Example.com", "secret1").await.unwrap();
        assert_eq!(back.uid, created.uid);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let provider = LocalIdentityProvider::new();
        provider.sign_up("a@b.com", "secret1").await.unwrap();

        let err = provider.sign_up("a@b.com", "another1").await.unwrap_err();
        assert_eq!(err, AuthError::EmailTaken);
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let provider = LocalIdentityProvider::new();
        let err = provider.sign_up("a@b.com", "five5").await.unwrap_err();
        assert_eq!(err, AuthError::WeakPassword);
    }

    #[tokio::test]
    async fn test_sign_in_never_reveals_which_part_was_wrong() {
        let provider = LocalIdentityProvider::new();
        provider.sign_up("a@b.com", "secret1").await.unwrap();

        let wrong_password = provider.sign_in("a@b.com", "nope123").await.unwrap_err();
        let unknown_email = provider.sign_in("x@y.com", "secret1").await.unwrap_err();
        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(unknown_email, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_federated_uid_is_stable_across_sign_ins() {
        let provider = LocalIdentityProvider::new();
        provider.set_federated_outcome(FederatedOutcome::Grant {
            email: "g@gmail.com".to_string(),
        });

        let first = provider.sign_in_federated().await.unwrap();
        provider.sign_out().await.unwrap();
        let second = provider.sign_in_federated().await.unwrap();

        assert_eq!(first.uid, second.uid);
        assert_eq!(first.provider.as_deref(), Some("google"));
    }

    #[tokio::test]
    async fn test_federated_popup_outcomes() {
        let provider = LocalIdentityProvider::new();

        // Default: popup never completes
        let err = provider.sign_in_federated().await.unwrap_err();
        assert_eq!(err, AuthError::PopupCancelled);

        provider.set_federated_outcome(FederatedOutcome::Blocked);
        let err = provider.sign_in_federated().await.unwrap_err();
        assert_eq!(err, AuthError::PopupBlocked);
        assert!(provider.current().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_is_idempotent() {
        let provider = LocalIdentityProvider::new();
        provider.sign_out().await.unwrap();
        provider.sign_out().await.unwrap();
    }

    #[tokio::test]
    async fn test_subscription_sees_transitions() {
        let provider = LocalIdentityProvider::new();
        let mut events = provider.subscribe();

        // Nobody signed in yet
        assert_eq!(events.next().await, Some(None));

        let identity = provider.sign_up("a@b.com", "secret1").await.unwrap();
        assert_eq!(events.next().await, Some(Some(identity)));

        provider.sign_out().await.unwrap();
        assert_eq!(events.next().await, Some(None));
    }

    #[tokio::test]
    async fn test_late_subscriber_gets_current_identity() {
        let provider = LocalIdentityProvider::new();
        let identity = provider.sign_up("a@b.com", "secret1").await.unwrap();

        // Subscribing after the sign-in still observes it
        let mut events = provider.subscribe();
        assert_eq!(events.next().await, Some(Some(identity)));
    }
}
