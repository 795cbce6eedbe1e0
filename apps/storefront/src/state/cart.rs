//! # Cart and Wishlist State
//!
//! In-memory cart and wishlist, persisted to local storage slots.
//!
//! ## Thread Safety & Persistence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Write Path                                      │
//! │                                                                         │
//! │  Command (add_to_cart)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  with_cart_mut(|cart| cart.add(&product))                               │
//! │       │     1. lock the Mutex                                           │
//! │       │     2. mutate the cart                                          │
//! │       │     3. save the slot while still holding the lock               │
//! │       ▼                                                                 │
//! │  Result<R, StorageError>                                                │
//! │                                                                         │
//! │  Saving under the lock keeps memory and disk in step: two               │
//! │  concurrent writes can never persist out of order. A failed save        │
//! │  still surfaces, but the in-memory change stands - the next             │
//! │  successful save catches the file up.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex};

use mobicare_backend::{StorageError, StorageSlot};
use mobicare_core::{Cart, Wishlist, CART_SLOT, WISHLIST_SLOT};

/// The shopper's cart, loaded from its slot at startup.
#[derive(Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    slot: StorageSlot<Cart>,
}

impl CartState {
    /// Loads the cart from its storage slot under `data_dir`.
    pub fn load(data_dir: &Path) -> Self {
        let slot = StorageSlot::new(data_dir, CART_SLOT);
        CartState {
            cart: Arc::new(Mutex::new(slot.load())),
            slot,
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = match self.cart.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&cart)
    }

    /// Executes a mutation and persists the cart before unlocking.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add(&product))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = match self.cart.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let result = f(&mut cart);
        self.slot.save(&cart)?;
        Ok(result)
    }
}

/// The shopper's wishlist, loaded from its slot at startup.
#[derive(Clone)]
pub struct WishlistState {
    wishlist: Arc<Mutex<Wishlist>>,
    slot: StorageSlot<Wishlist>,
}

impl WishlistState {
    /// Loads the wishlist from its storage slot under `data_dir`.
    pub fn load(data_dir: &Path) -> Self {
        let slot = StorageSlot::new(data_dir, WISHLIST_SLOT);
        WishlistState {
            wishlist: Arc::new(Mutex::new(slot.load())),
            slot,
        }
    }

    /// Executes a function with read access to the wishlist.
    pub fn with_wishlist<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Wishlist) -> R,
    {
        let wishlist = match self.wishlist.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&wishlist)
    }

    /// Executes a mutation and persists the wishlist before unlocking.
    pub fn with_wishlist_mut<F, R>(&self, f: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut Wishlist) -> R,
    {
        let mut wishlist = match self.wishlist.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let result = f(&mut wishlist);
        self.slot.save(&wishlist)?;
        Ok(result)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mobicare_core::types::Category;
    use mobicare_core::{Money, Product};

    fn product(name: &str) -> Product {
        let mut p = Product::new(
            name,
            Category::Mobiles,
            "Apple",
            Money::from_rupees(79_900),
            4.8,
            10,
            "📱",
        );
        p.id = format!("id-{}", name);
        p
    }

    #[test]
    fn test_cart_survives_reload() {
        let dir = tempfile::tempdir().unwrap();

        {
            let state = CartState::load(dir.path());
            state.with_cart_mut(|cart| cart.add(&product("iPhone"))).unwrap();
            state.with_cart_mut(|cart| cart.add(&product("iPhone"))).unwrap();
        }

        // Fresh state from the same directory sees the saved cart
        let state = CartState::load(dir.path());
        assert_eq!(state.with_cart(|c| c.total_quantity()), 2);
        assert_eq!(state.with_cart(|c| c.line_count()), 1);
    }

    #[test]
    fn test_wishlist_survives_reload() {
        let dir = tempfile::tempdir().unwrap();

        {
            let state = WishlistState::load(dir.path());
            state
                .with_wishlist_mut(|w| w.add(&product("AirPods")))
                .unwrap();
        }

        let state = WishlistState::load(dir.path());
        assert!(state.with_wishlist(|w| w.contains("id-AirPods")));
    }

    #[test]
    fn test_unwritable_slot_surfaces_save_error() {
        let dir = tempfile::tempdir().unwrap();
        // A FILE where the data directory should be makes saves fail
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let state = CartState::load(&blocker.join("nested"));
        let err = state.with_cart_mut(|cart| cart.add(&product("iPhone")));
        assert!(err.is_err());
    }

    #[test]
    fn test_fresh_directory_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cart = CartState::load(dir.path());
        let wishlist = WishlistState::load(dir.path());
        assert!(cart.with_cart(|c| c.is_empty()));
        assert!(wishlist.with_wishlist(|w| w.is_empty()));
    }
}
