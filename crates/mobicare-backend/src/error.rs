//! # Backend Error Types
//!
//! Error types for the identity provider, the hosted store, and local
//! storage slots.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Provider / store / disk failure                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AuthError / StoreError / StorageError (this module)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront app) ← Serialized for the view layer          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  View displays user-friendly message                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Identity Errors
// =============================================================================

/// Identity provider failures.
///
/// Each variant corresponds to a distinct user-facing outcome; callers
/// match on the variant to pick the message, never on strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// An account with this email already exists.
    #[error("An account with this email already exists")]
    EmailTaken,

    /// The provider rejected the password as too weak.
    #[error("Password does not meet the provider's strength policy")]
    WeakPassword,

    /// The provider rejected the email address.
    #[error("Email address is not valid")]
    InvalidEmail,

    /// Wrong email or password.
    ///
    /// ## Why One Variant
    /// Sign-in never reveals whether the email exists or the password
    /// was wrong. Both collapse to this variant.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The user dismissed the federated sign-in popup.
    ///
    /// Silent from the user's perspective: the command layer maps this
    /// to a no-op, not an error banner.
    #[error("Sign-in popup was closed before completing")]
    PopupCancelled,

    /// The browser blocked the federated sign-in popup.
    #[error("Sign-in popup was blocked")]
    PopupBlocked,

    /// Any other provider-side failure.
    #[error("Identity provider error: {0}")]
    Provider(String),
}

// =============================================================================
// Hosted Store Errors
// =============================================================================

/// Hosted realtime store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document exists at the path.
    ///
    /// ## When This Occurs
    /// - Looking up a record by a stale or mistyped key
    /// - Updating a ticket that was deleted meanwhile
    #[error("Nothing stored at '{path}'")]
    NotFound { path: String },

    /// Reading a path from the store failed.
    #[error("Store read failed at '{path}': {message}")]
    Read { path: String, message: String },

    /// Writing a path to the store failed.
    #[error("Store write failed at '{path}': {message}")]
    Write { path: String, message: String },

    /// A document could not be (de)serialized.
    #[error("Store document at '{path}' is malformed: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Creates a NotFound error for a given path.
    pub fn not_found(path: impl Into<String>) -> Self {
        StoreError::NotFound { path: path.into() }
    }

    /// Creates a Read error for a given path.
    pub fn read(path: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Read {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a Write error for a given path.
    pub fn write(path: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Write {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a Serialize error for a given path.
    pub fn serialize(path: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::Serialize {
            path: path.into(),
            source,
        }
    }
}

/// Result type for hosted store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Local Storage Errors
// =============================================================================

/// Local storage slot failures.
///
/// Reads never surface these (a missing or corrupt slot loads the
/// default value); writes do.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Disk I/O failed.
    #[error("Storage I/O failed for slot '{slot}': {source}")]
    Io {
        slot: String,
        #[source]
        source: std::io::Error,
    },

    /// The value could not be serialized.
    #[error("Failed to serialize slot '{slot}': {source}")]
    Serialize {
        slot: String,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================
