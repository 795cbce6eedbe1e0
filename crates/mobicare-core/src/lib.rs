//! # mobicare-core: Pure Business Logic for MobiCare
//!
//! This crate is the **heart** of the MobiCare storefront. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       MobiCare Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View Layer (out of scope)                    │   │
//! │  │    Catalog UI ──► Cart Drawer ──► Intake Form ──► Admin Panel   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront Commands                          │   │
//! │  │    list_products, add_to_cart, submit_service_request, ...      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ mobicare-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │  Ticket   │  │  (paise)  │  │ Wishlist  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORE CALLS • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              mobicare-backend (Collaborator Layer)              │   │
//! │  │      identity provider, realtime store, local storage slots     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, UserRecord, ServiceRequest, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart and wishlist collections with derived totals
//! - [`error`] - Domain error types
//! - [`validation`] - Intake form and credential validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Store, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use mobicare_core::cart::Cart;
//! use mobicare_core::money::Money;
//! use mobicare_core::types::{Category, Product};
//!
//! let mut phone = Product::new(
//!     "iPhone 15 Pro Max",
//!     Category::Mobiles,
//!     "Apple",
//!     Money::from_rupees(159_900),
//!     4.8,
//!     10,
//!     "📱",
//! );
//! phone.id = "p-1".to_string();
//!
//! let mut cart = Cart::new();
//! cart.add(&phone);
//! cart.add(&phone); // same product: quantity bumps, no duplicate line
//!
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.total(), Money::from_rupees(319_800));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mobicare_core::Money` instead of
// `use mobicare_core::money::Money`

pub use cart::{Cart, CartLineItem, Wishlist};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Slot name for the persisted cart collection.
///
/// ## Why a constant?
/// The same name is the key of the browser-era storage slot, so existing
/// installs find their cart after an upgrade.
pub const CART_SLOT: &str = "mobicare_cart";

/// Slot name for the persisted wishlist collection.
pub const WISHLIST_SLOT: &str = "mobicare_wishlist";

/// Prefix for human-readable service ticket codes ("SRV-…").
pub const SERVICE_ID_PREFIX: &str = "SRV";
