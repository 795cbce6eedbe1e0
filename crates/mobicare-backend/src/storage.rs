//! # Local Storage Slots
//!
//! Durable device-local storage for the cart and wishlist.
//!
//! ## Slot Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Storage Slots                                        │
//! │                                                                         │
//! │  <data dir>/                                                            │
//! │  ├── mobicare_cart.json       bare JSON array of line items             │
//! │  └── mobicare_wishlist.json   bare JSON array of products               │
//! │                                                                         │
//! │  One slot = one file = one JSON document. Slots belong to the           │
//! │  DEVICE, not the account: signing out leaves the cart alone.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! - `load` NEVER fails: a missing or corrupt file yields the default
//!   value (an empty cart beats a crash on startup), with a warning
//!   logged for the corrupt case
//! - `save` returns a Result: a full disk must surface to the user
//!   instead of silently dropping their cart

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StorageError;

/// A named, file-backed slot holding one serializable value.
///
/// ## Usage
/// ```rust,ignore
/// let slot: StorageSlot<Cart> = StorageSlot::new(&data_dir, CART_SLOT);
/// let cart = slot.load();          // empty cart if nothing saved yet
/// slot.save(&cart)?;               // write errors surface
/// ```
#[derive(Debug, Clone)]
pub struct StorageSlot<T> {
    name: String,
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StorageSlot<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Creates a slot named `name` under `dir`.
    pub fn new(dir: &Path, name: &str) -> Self {
        StorageSlot {
            name: name.to_string(),
            path: dir.join(format!("{}.json", name)),
            _marker: PhantomData,
        }
    }

    /// Loads the slot's value, falling back to `T::default()`.
    pub fn load(&self) -> T {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(slot = %self.name, "Slot not found, using default");
                return T::default();
            }
            Err(e) => {
                warn!(slot = %self.name, error = %e, "Slot unreadable, using default");
                return T::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                warn!(slot = %self.name, error = %e, "Slot corrupt, using default");
                T::default()
            }
        }
    }

    /// Saves `value` into the slot.
    pub fn save(&self, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_vec(value).map_err(|e| StorageError::Serialize {
            slot: self.name.clone(),
            source: e,
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                slot: self.name.clone(),
                source: e,
            })?;
        }

        fs::write(&self.path, json).map_err(|e| StorageError::Io {
            slot: self.name.clone(),
            source: e,
        })?;
        debug!(slot = %self.name, "Slot saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mobicare_core::{Cart, CART_SLOT};

    #[test]
    fn test_missing_slot_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let slot: StorageSlot<Cart> = StorageSlot::new(dir.path(), CART_SLOT);
        assert!(slot.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let slot: StorageSlot<Vec<String>> = StorageSlot::new(dir.path(), "test_slot");

        slot.save(&vec!["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(slot.load(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_corrupt_slot_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mobicare_cart.json"), b"{not json").unwrap();

        let slot: StorageSlot<Cart> = StorageSlot::new(dir.path(), CART_SLOT);
        assert!(slot.load().is_empty());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let slot: StorageSlot<Vec<i64>> = StorageSlot::new(&nested, "numbers");

        slot.save(&vec![1, 2, 3]).unwrap();
        assert_eq!(slot.load(), vec![1, 2, 3]);
    }
}
