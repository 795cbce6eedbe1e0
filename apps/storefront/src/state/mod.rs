//! # State Module
//!
//! Application state for the storefront.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. This approach:
//!
//! 1. **Better Separation of Concerns**: Each state type has a single responsibility
//! 2. **Easier Testing**: Commands take exactly the states they need
//! 3. **Reduced Contention**: Independent states don't block each other
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ BackendState │ │ SessionState │ │  CartState   │ │ ConfigState  │   │
//! │  │              │ │              │ │WishlistState │ │              │   │
//! │  │ Hosted store │ │ Identity +   │ │              │ │ Store name   │   │
//! │  │ repositories │ │ resolved     │ │ Mutex<Cart>  │ │ Currency     │   │
//! │  │              │ │ role         │ │ + disk slot  │ │ (INR)        │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • BackendState: repositories are Arc-backed, clone freely              │
//! │  • SessionState: RwLock snapshot, written only by the identity listener │
//! │  • CartState/WishlistState: Mutex, writes persist before unlocking      │
//! │  • ConfigState: read-only after startup                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod backend;
mod cart;
mod config;
mod session;

pub use backend::BackendState;
pub use cart::{CartState, WishlistState};
pub use config::ConfigState;
pub use session::{Session, SessionState};
