//! # Auth Commands
//!
//! Sign-up, sign-in, federated sign-in, sign-out and session queries.
//!
//! ## Sign-Up Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoke('sign_up', { email, password })                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Validate email shape and password length (early reject)             │
//! │  2. provider.sign_up() - creates and signs in the account               │
//! │  3. Write users/{uid} role record (ONCE; failures logged, not fatal)    │
//! │  4. Resolve the session (role lookup)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionView { status: "resolved", identity, role, isAdmin }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed role-record write does NOT fail sign-up: the account exists
//! at the provider either way, and the role lookup fails open to
//! `user`. The failure is logged for the operator.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::{BackendState, Session, SessionState};
use mobicare_backend::{AuthError, Identity};
use mobicare_core::types::{Role, UserRecord};
use mobicare_core::validation::{validate_email, validate_password};

/// What the view layer sees of the session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session: Session,
    pub is_admin: bool,
}

impl SessionView {
    fn of(session: &SessionState) -> Self {
        SessionView {
            session: session.snapshot(),
            is_admin: session.is_admin(),
        }
    }
}

/// Writes the `users/{uid}` role record unless one exists.
///
/// Swallows store failures: see the module docs.
async fn ensure_user_record(backend: &BackendState, identity: &Identity, role: Role) {
    let record = UserRecord {
        email: identity.email.clone(),
        role,
        display_name: identity.display_name.clone(),
        photo_url: identity.photo_url.clone(),
        provider: identity.provider.clone(),
        created_at: Utc::now(),
    };

    if let Err(e) = backend
        .backend()
        .users()
        .ensure_record(&identity.uid, &record)
        .await
    {
        warn!(uid = %identity.uid, error = %e, "Could not write user record, continuing");
    }
}

/// Creates an email/password account and signs it in.
///
/// `role` seeds the `users/{uid}` record; ordinary storefront sign-up
/// passes `Role::User`, the provisioning path passes `Role::Admin`.
/// The record is written once, so the role cannot be changed by
/// signing up again.
pub async fn sign_up(
    session: &SessionState,
    backend: &BackendState,
    email: &str,
    password: &str,
    role: Role,
) -> Result<SessionView, ApiError> {
    validate_email(email)?;
    validate_password(password)?;

    let identity = session.provider().sign_up(email, password).await?;
    info!(email = %identity.email, role = ?role, "Signed up");

    ensure_user_record(backend, &identity, role).await;
    session.handle_identity_change(Some(identity)).await;
    Ok(SessionView::of(session))
}

/// Signs in an existing email/password account.
pub async fn sign_in(
    session: &SessionState,
    backend: &BackendState,
    email: &str,
    password: &str,
) -> Result<SessionView, ApiError> {
    validate_email(email)?;

    let identity = session.provider().sign_in(email, password).await?;

    // Accounts provisioned outside the app may not have a record yet
    ensure_user_record(backend, &identity, Role::User).await;
    session.handle_identity_change(Some(identity)).await;
    Ok(SessionView::of(session))
}

/// Runs the federated (popup) sign-in flow.
///
/// ## Returns
/// - `Ok(Some(view))` - sign-in completed
/// - `Ok(None)` - the user closed the popup; the view does nothing
/// - `Err(_)` - the popup was blocked, or the provider failed
pub async fn sign_in_with_google(
    session: &SessionState,
    backend: &BackendState,
) -> Result<Option<SessionView>, ApiError> {
    let identity = match session.provider().sign_in_federated().await {
        Ok(identity) => identity,
        Err(AuthError::PopupCancelled) => {
            info!("Federated sign-in cancelled by the user");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    ensure_user_record(backend, &identity, Role::User).await;
    session.handle_identity_change(Some(identity)).await;
    Ok(Some(SessionView::of(session)))
}

/// Signs the current user out.
pub async fn sign_out(session: &SessionState) -> Result<SessionView, ApiError> {
    session.provider().sign_out().await?;
    session.handle_identity_change(None).await;
    Ok(SessionView::of(session))
}

/// The current session snapshot.
pub fn get_session(session: &SessionState) -> SessionView {
    SessionView::of(session)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::sync::Arc;

    use mobicare_backend::identity::local::FederatedOutcome;
    use mobicare_backend::{LocalIdentityProvider, MemoryStore, UserRepository};

    fn fixture() -> (Arc<LocalIdentityProvider>, SessionState, BackendState) {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(LocalIdentityProvider::new());
        let session = SessionState::new(provider.clone(), UserRepository::new(store.clone()));
        let backend = BackendState::new(store);
        (provider, session, backend)
    }

    #[tokio::test]
    async fn test_sign_up_resolves_session_and_writes_record() {
        let (_, session, backend) = fixture();

        let view = sign_up(&session, &backend, "asha@example.com", "secret1", Role::User)
            .await
            .unwrap();
        assert!(!view.is_admin);
        assert!(matches!(
            view.session,
            Session::Resolved { identity: Some(_), role: Role::User }
        ));

        let identity = session.current_identity().unwrap();
        let record = backend
            .backend()
            .users()
            .get(&identity.uid)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.email, "asha@example.com");
        assert_eq!(record.role, Role::User);
    }

    #[tokio::test]
    async fn test_sign_up_rejects_bad_credentials_before_the_provider() {
        let (_, session, backend) = fixture();

        let err = sign_up(&session, &backend, "not-an-email", "secret1", Role::User)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = sign_up(&session, &backend, "a@b.com", "short", Role::User)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_sign_up_with_admin_role_provisions_an_admin() {
        let (_, session, backend) = fixture();

        let view = sign_up(&session, &backend, "boss@shop.com", "secret1", Role::Admin)
            .await
            .unwrap();
        assert!(view.is_admin);

        let uid = session.current_identity().unwrap().uid;
        let record = backend.backend().users().get(&uid).await.unwrap().unwrap();
        assert_eq!(record.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let (_, session, backend) = fixture();
        sign_up(&session, &backend, "a@b.com", "secret1", Role::User).await.unwrap();
        sign_out(&session).await.unwrap();

        let err = sign_in(&session, &backend, "a@b.com", "wrong123")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_repeat_sign_in_keeps_provisioned_role() {
        let (provider, session, backend) = fixture();

        // First sign-up creates the default record...
        sign_up(&session, &backend, "boss@shop.com", "secret1", Role::User).await.unwrap();
        let uid = session.current_identity().unwrap().uid;

        // ...which an operator then promotes by hand
        let mut record = backend.backend().users().get(&uid).await.unwrap().unwrap();
        record.role = Role::Admin;
        backend
            .backend()
            .store()
            .put(
                &format!("users/{}", uid),
                serde_json::to_value(&record).unwrap(),
            )
            .await
            .unwrap();

        sign_out(&session).await.unwrap();
        let view = sign_in(&session, &backend, "boss@shop.com", "secret1")
            .await
            .unwrap();
        assert!(view.is_admin);
        drop(provider);
    }

    #[tokio::test]
    async fn test_cancelled_popup_is_a_silent_no_op() {
        let (_, session, backend) = fixture();

        let view = sign_in_with_google(&session, &backend).await.unwrap();
        assert!(view.is_none());
        assert!(session.current_identity().is_none());
    }

    #[tokio::test]
    async fn test_blocked_popup_is_an_error() {
        let (provider, session, backend) = fixture();
        provider.set_federated_outcome(FederatedOutcome::Blocked);

        let err = sign_in_with_google(&session, &backend).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PopupBlocked);
    }

    #[tokio::test]
    async fn test_federated_sign_in_tags_record_with_provider() {
        let (provider, session, backend) = fixture();
        provider.set_federated_outcome(FederatedOutcome::Grant {
            email: "g@gmail.com".to_string(),
        });

        let view = sign_in_with_google(&session, &backend).await.unwrap().unwrap();
        assert!(!view.is_admin);

        let uid = session.current_identity().unwrap().uid;
        let record = backend.backend().users().get(&uid).await.unwrap().unwrap();
        assert_eq!(record.provider.as_deref(), Some("google"));
    }

    #[tokio::test]
    async fn test_sign_out_resolves_to_anonymous() {
        let (_, session, backend) = fixture();
        sign_up(&session, &backend, "a@b.com", "secret1", Role::User).await.unwrap();

        let view = sign_out(&session).await.unwrap();
        assert!(matches!(
            view.session,
            Session::Resolved { identity: None, .. }
        ));
    }
}
