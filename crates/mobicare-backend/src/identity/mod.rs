//! # Identity Provider Seam
//!
//! The authentication boundary of the storefront.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Identity Flow                                        │
//! │                                                                         │
//! │  Storefront commands (sign_up / sign_in / sign_out)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  IdentityProvider (trait, this module)                                  │
//! │       │                                                                 │
//! │       ├──► LocalIdentityProvider (local.rs)   dev + tests               │
//! │       └──► hosted provider                    production                │
//! │                                                                         │
//! │  Session state never polls: it subscribes once and reacts to            │
//! │  Option<Identity> events. The subscription delivers the CURRENT         │
//! │  identity first, so a subscriber is never left waiting for a            │
//! │  sign-in that already happened.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod local;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::error::AuthError;

pub use local::LocalIdentityProvider;

// =============================================================================
// Identity
// =============================================================================

/// A signed-in principal as reported by the provider.
///
/// This is the provider's view of the user. Role and profile records
/// live in the hosted store, keyed by `uid`, and are resolved
/// separately by session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Provider-assigned stable user id.
    pub uid: String,
    /// Email address the account was created with.
    pub email: String,
    /// Display name, when the provider has one (federated sign-in).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar URL, when the provider has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Federated provider name ("google"), absent for email/password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Authentication operations the storefront depends on.
///
/// ## Error Contract
/// - `sign_up` fails with [`AuthError::EmailTaken`], [`AuthError::WeakPassword`]
///   or [`AuthError::InvalidEmail`]
/// - `sign_in` fails with [`AuthError::InvalidCredentials`] only; it never
///   reveals whether the email exists
/// - `sign_in_federated` fails with [`AuthError::PopupCancelled`] or
///   [`AuthError::PopupBlocked`] when the user never completed the flow
/// - `sign_out` is idempotent
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an email/password account and signs it in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Signs in an existing email/password account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Runs the federated (popup) sign-in flow.
    ///
    /// First-time federated users get an account created on the fly;
    /// returning users keep their stable uid.
    async fn sign_in_federated(&self) -> Result<Identity, AuthError>;

    /// Signs the current identity out. A no-op when nobody is signed in.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// The currently signed-in identity, if any.
    fn current(&self) -> Option<Identity>;

    /// Subscribes to identity changes.
    ///
    /// The returned stream yields the current identity immediately,
    /// then every subsequent sign-in/sign-out transition.
    fn subscribe(&self) -> IdentityEvents;
}

// =============================================================================
// Event Stream
// =============================================================================

/// Stream of identity transitions from [`IdentityProvider::subscribe`].
///
/// Each event is the new session state: `Some(identity)` after a
/// sign-in, `None` after a sign-out.
pub struct IdentityEvents {
    /// The current identity at subscription time, delivered first.
    pending: Option<Option<Identity>>,
    rx: broadcast::Receiver<Option<Identity>>,
}

impl IdentityEvents {
    /// Builds a stream that yields `initial` before any broadcast event.
    pub fn new(initial: Option<Identity>, rx: broadcast::Receiver<Option<Identity>>) -> Self {
        IdentityEvents {
            pending: Some(initial),
            rx,
        }
    }

    /// Waits for the next identity transition.
    ///
    /// ## Returns
    /// - `Some(Some(identity))` - someone signed in
    /// - `Some(None)` - the session ended
    /// - `None` - the provider was dropped; no more events will come
    ///
    /// A slow subscriber that lags the channel skips to the newest
    /// event rather than erroring; only the latest session state
    /// matters.
    pub async fn next(&mut self) -> Option<Option<Identity>> {
        if let Some(initial) = self.pending.take() {
            return Some(initial);
        }

        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
