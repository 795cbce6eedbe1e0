//! # Wishlist Commands
//!
//! Wishlist manipulation for the view layer.
//!
//! The wishlist holds full product snapshots, same as the cart, so the
//! wishlist page renders without refetching the catalog. Adding is
//! idempotent: the heart button can be mashed.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{BackendState, WishlistState};
use mobicare_core::{Product, Wishlist};

/// Wishlist response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub items: Vec<Product>,
    pub count: usize,
}

impl From<&Wishlist> for WishlistView {
    fn from(wishlist: &Wishlist) -> Self {
        WishlistView {
            items: wishlist.items().to_vec(),
            count: wishlist.len(),
        }
    }
}

/// Gets the current wishlist.
pub fn get_wishlist(wishlist: &WishlistState) -> WishlistView {
    debug!("get_wishlist command");
    wishlist.with_wishlist(|w| WishlistView::from(w))
}

/// Adds a product to the wishlist. A second add is a no-op.
pub async fn add_to_wishlist(
    backend: &BackendState,
    wishlist: &WishlistState,
    product_id: &str,
) -> Result<WishlistView, ApiError> {
    let product = backend.backend().products().get(product_id).await?;
    debug!(product_id = %product_id, "add_to_wishlist command");

    let view = wishlist.with_wishlist_mut(|w| {
        w.add(&product);
        WishlistView::from(&*w)
    })?;
    Ok(view)
}

/// Removes a product from the wishlist.
pub fn remove_from_wishlist(
    wishlist: &WishlistState,
    product_id: &str,
) -> Result<WishlistView, ApiError> {
    debug!(product_id = %product_id, "remove_from_wishlist command");
    let view = wishlist.with_wishlist_mut(|w| {
        w.remove(product_id);
        WishlistView::from(&*w)
    })?;
    Ok(view)
}

/// Whether a product is wishlisted (drives the heart icon).
pub fn is_in_wishlist(wishlist: &WishlistState, product_id: &str) -> bool {
    wishlist.with_wishlist(|w| w.contains(product_id))
}

// =============================================================================
// Unit Tests
// =============================================================================
