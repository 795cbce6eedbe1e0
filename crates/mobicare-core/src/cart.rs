//! # Cart & Wishlist
//!
//! The two per-session product collections and their derived totals.
//!
//! ## Collection Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart / Wishlist Invariants                           │
//! │                                                                         │
//! │  Cart                               Wishlist                            │
//! │  ────                               ────────                            │
//! │  • one line per product id          • one entry per product id          │
//! │  • quantity ≥ 1 always              • no quantity field                 │
//! │  • add existing id → qty + 1        • add existing id → no-op           │
//! │    (snapshot fields stay frozen)    • remove absent id → no-op          │
//! │  • set_quantity(id, 0) ≡ remove     • insertion order preserved         │
//! │  • insertion order preserved                                            │
//! │                                                                         │
//! │  Totals are derived on every read - never cached, never stale.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Freezing
//! A line item copies the product's fields when it is first added. Adding
//! the same product again only bumps the quantity; the stored snapshot is
//! NOT refreshed, so the cart keeps displaying the price the shopper saw.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line Item
// =============================================================================

/// A product entry in the cart carrying a quantity.
///
/// The product fields are a frozen snapshot from the moment of first add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Snapshot of the product, including its id.
    #[serde(flatten)]
    pub product: Product,

    /// Units of this product in the cart. Always at least 1.
    pub quantity: i64,
}

impl CartLineItem {
    /// Creates a line item from a product with quantity 1.
    fn from_product(product: &Product) -> Self {
        CartLineItem {
            product: product.clone(),
            quantity: 1,
        }
    }

    /// Line total: frozen unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.product.price_paise) * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an ordered collection of line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1, snapshot fields untouched
    /// - Product not in cart: appended as a new line with quantity 1
    pub fn add(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += 1;
            return;
        }

        self.items.push(CartLineItem::from_product(product));
    }

    /// Removes the line item for a product id. No-op when absent.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|i| i.product.id != product_id);
    }

    /// Sets the quantity of an existing line item.
    ///
    /// ## Behavior
    /// - `quantity < 1`: equivalent to [`Cart::remove`]
    /// - otherwise: quantity is replaced (no upper bound)
    /// - product not in cart: no-op
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity < 1 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Number of distinct line items.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all line items.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Grand total: Σ (frozen unit price × quantity). Recomputed on read.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Wishlist
// =============================================================================

/// The wishlist: an ordered set of product snapshots, no quantities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    items: Vec<Product>,
}

impl Wishlist {
    /// Creates a new empty wishlist.
    pub fn new() -> Self {
        Wishlist::default()
    }

    /// Adds a product snapshot. Idempotent: a second add of the same
    /// product id is a no-op.
    pub fn add(&mut self, product: &Product) {
        if self.contains(&product.id) {
            return;
        }
        self.items.push(product.clone());
    }

    /// Removes the entry for a product id. No-op when absent.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|p| p.id != product_id);
    }

    /// Membership predicate.
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|p| p.id == product_id)
    }

    /// The saved products in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Number of saved products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the wishlist is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
