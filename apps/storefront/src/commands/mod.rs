//! # Storefront Commands Module
//!
//! The command API the view layer invokes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports + admin gate)
//! ├── auth.rs      ◄─── Sign-up, sign-in, federated, sign-out, session
//! ├── product.rs   ◄─── Catalog browsing + admin product CRUD
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── wishlist.rs  ◄─── Wishlist manipulation
//! ├── service.rs   ◄─── Service intake, tracking, admin ticket ops
//! └── dashboard.rs ◄─── Shopper dashboard + admin stats
//! ```
//!
//! ## How Commands Work
//! Each command is a plain async function over the state containers it
//! needs, returning `Result<T, ApiError>`. The view layer invokes them
//! over IPC and receives either the JSON payload or a
//! `{ code, message }` error object.
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! async fn list_products(backend: &BackendState, ...)
//!
//! // Needs catalog and cart
//! async fn add_to_cart(backend: &BackendState, cart: &CartState, ...)
//! ```

pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod product;
pub mod service;
pub mod wishlist;

use crate::error::ApiError;
use crate::state::SessionState;
use mobicare_backend::Identity;

/// Gates admin-only commands.
///
/// The view hides admin controls from non-admins; this is the real
/// enforcement behind it. A still-resolving session is rejected too:
/// privileged work never runs on a guess.
pub(crate) fn require_admin(session: &SessionState) -> Result<Identity, ApiError> {
    if !session.is_admin() {
        return Err(ApiError::forbidden());
    }
    session.current_identity().ok_or_else(ApiError::forbidden)
}
