//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in MobiCare                               │
//! │                                                                         │
//! │  View layer                  Rust Backend                               │
//! │  ──────────                  ────────────                               │
//! │                                                                         │
//! │  invoke('submit_service_request')                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ── ValidationError ─────────────┐             │  │
//! │  │  Auth Error?       ── AuthError ──────────────────►├─► ApiError  │  │
//! │  │  Store Error?      ── StoreError ──────────────────┘             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "FORBIDDEN", e.message = "Admin access required"         │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Store and storage failures log their detail server-side and return a
//! generic message; validation and auth failures return the message the
//! user should read.

use serde::Serialize;

use mobicare_backend::{AuthError, StorageError, StoreError};
use mobicare_core::{CoreError, ValidationError};

/// API error returned from storefront commands.
///
/// ## Serialization
/// This is what the view layer receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Service request not found: SRV-LOYW3V28"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Wrong email or password
    InvalidCredentials,

    /// Sign-up email is already registered
    EmailTaken,

    /// Sign-up password below the provider's policy
    WeakPassword,

    /// The browser blocked the sign-in popup
    PopupBlocked,

    /// Other identity provider failure
    AuthError,

    /// Signed-in user lacks the required role (403)
    Forbidden,

    /// Hosted store operation failed (500)
    StoreError,

    /// Local cart/wishlist persistence failed
    StorageError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a forbidden error.
    pub fn forbidden() -> Self {
        ApiError::new(ErrorCode::Forbidden, "Admin access required")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::ServiceRequestNotFound(id) => ApiError::not_found("Service request", &id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts hosted store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { path } => {
                // The path tail is the record key
                let id = path.rsplit('/').next().unwrap_or(&path).to_string();
                ApiError::not_found("Record", &id)
            }
            StoreError::Read { .. } | StoreError::Write { .. } => {
                tracing::error!("Store operation failed: {}", err);
                ApiError::new(ErrorCode::StoreError, "Store operation failed")
            }
            StoreError::Serialize { .. } => {
                tracing::error!("Store document malformed: {}", err);
                ApiError::new(ErrorCode::StoreError, "Stored data is malformed")
            }
        }
    }
}

/// Converts identity errors to API errors.
///
/// [`AuthError::PopupCancelled`] intentionally has no mapping of its
/// own: the auth commands intercept it and report a silent no-op, so it
/// only reaches here on unexpected paths.
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let code = match err {
            AuthError::EmailTaken => ErrorCode::EmailTaken,
            AuthError::WeakPassword => ErrorCode::WeakPassword,
            AuthError::InvalidEmail => ErrorCode::ValidationError,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::PopupBlocked => ErrorCode::PopupBlocked,
            AuthError::PopupCancelled | AuthError::Provider(_) => ErrorCode::AuthError,
        };
        if let AuthError::Provider(detail) = &err {
            tracing::error!("Identity provider failure: {}", detail);
        }
        ApiError::new(code, err.to_string())
    }
}

/// Converts local storage errors to API errors.
impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Local storage failed: {}", err);
        ApiError::new(ErrorCode::StorageError, "Could not save to local storage")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_from_store_error_uses_record_key() {
        let err: ApiError = StoreError::not_found("products/p-123").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("p-123"));
    }

    #[test]
    fn test_auth_error_codes() {
        let err: ApiError = AuthError::EmailTaken.into();
        assert_eq!(err.code, ErrorCode::EmailTaken);

        let err: ApiError = AuthError::InvalidCredentials.into();
        assert_eq!(err.code, ErrorCode::InvalidCredentials);
    }

    #[test]
    fn test_serialization_shape() {
        let err = ApiError::forbidden();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "FORBIDDEN");
        assert_eq!(json["message"], "Admin access required");
    }
}
