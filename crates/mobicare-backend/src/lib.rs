//! # mobicare-backend: Collaborators and Persistence for MobiCare
//!
//! Everything that touches the outside world lives in this crate:
//! the identity provider seam, the hosted document store, typed
//! repositories over it, and device-local storage slots.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MobiCare Data Flow                               │
//! │                                                                         │
//! │  Storefront command (add_to_cart, submit_service_request, ...)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  mobicare-backend (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐   │   │
//! │  │   │   Identity    │   │  Repositories  │   │  StorageSlot  │   │   │
//! │  │   │  (identity/)  │   │ (repository/)  │   │ (storage.rs)  │   │   │
//! │  │   └───────┬───────┘   └───────┬────────┘   └───────┬───────┘   │   │
//! │  │           │                   │                    │           │   │
//! │  │           ▼                   ▼                    ▼           │   │
//! │  │   IdentityProvider      RealtimeStore         local disk       │   │
//! │  │   (trait seam)          (trait seam)                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`identity`] - Authentication seam and the local provider
//! - [`store`] - The hosted document store seam and [`MemoryStore`]
//! - [`repository`] - Typed repositories per collection
//! - [`backend`] - The [`Backend`] aggregate the app holds
//! - [`storage`] - Device-local cart/wishlist slots
//! - [`error`] - [`AuthError`], [`StoreError`], [`StorageError`]

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod identity;
pub mod repository;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::Backend;
pub use error::{AuthError, StorageError, StoreError, StoreResult};
pub use identity::{Identity, IdentityEvents, IdentityProvider, LocalIdentityProvider};
pub use storage::StorageSlot;
pub use store::{MemoryStore, RealtimeStore};

// Repository re-exports for convenience
pub use repository::{OrderRepository, ProductRepository, ServiceRequestRepository, UserRepository};
