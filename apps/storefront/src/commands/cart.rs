//! # Cart Commands
//!
//! Cart manipulation for the view layer.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌─────────────────────────┐          │
//! │  │  Empty   │────►│ In Cart  │────►│ checkout (out of scope) │          │
//! │  └──────────┘     └──────────┘     └─────────────────────────┘          │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   update_cart_quantity                                  │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────► (back to empty)                │
//! │                                                                         │
//! │  Every mutation persists to the cart slot before returning, and         │
//! │  returns the full updated cart so the view never needs a second         │
//! │  round trip.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{BackendState, CartState};
use mobicare_core::{Cart, CartLineItem};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineItem>,
    pub total_quantity: i64,
    pub total_paise: i64,
    /// Display string like "₹3,19,800.00" is the view's job; this is
    /// the plain "₹319800.00" fallback.
    pub formatted_total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            items: cart.items().to_vec(),
            total_quantity: cart.total_quantity(),
            total_paise: cart.total().paise(),
            formatted_total: cart.total().to_string(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartView {
    debug!("get_cart command");
    cart.with_cart(|c| CartView::from(c))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Already in cart: quantity increases, the original snapshot stays
/// - Not in cart: added with quantity 1, price frozen at this moment
pub async fn add_to_cart(
    backend: &BackendState,
    cart: &CartState,
    product_id: &str,
) -> Result<CartView, ApiError> {
    let product = backend.backend().products().get(product_id).await?;
    debug!(product_id = %product_id, "add_to_cart command");

    let view = cart.with_cart_mut(|c| {
        c.add(&product);
        CartView::from(&*c)
    })?;
    Ok(view)
}

/// Sets a line's quantity. Anything below 1 removes the line.
pub fn update_cart_quantity(
    cart: &CartState,
    product_id: &str,
    quantity: i64,
) -> Result<CartView, ApiError> {
    debug!(product_id = %product_id, quantity, "update_cart_quantity command");
    let view = cart.with_cart_mut(|c| {
        c.set_quantity(product_id, quantity);
        CartView::from(&*c)
    })?;
    Ok(view)
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> Result<CartView, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    let view = cart.with_cart_mut(|c| {
        c.remove(product_id);
        CartView::from(&*c)
    })?;
    Ok(view)
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState) -> Result<CartView, ApiError> {
    debug!("clear_cart command");
    let view = cart.with_cart_mut(|c| {
        c.clear();
        CartView::from(&*c)
    })?;
    Ok(view)
}

// =============================================================================
// Unit Tests
// =============================================================================
