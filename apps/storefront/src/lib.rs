//! # MobiCare Storefront Library
//!
//! The orchestration layer of the MobiCare storefront: state
//! containers, the command API, and the composition root.
//!
//! ## Module Organization
//! ```text
//! mobicare_storefront/
//! ├── lib.rs           ◄─── You are here (wiring & run)
//! ├── state/
//! │   ├── mod.rs       ◄─── State type exports
//! │   ├── backend.rs   ◄─── Hosted store + repositories
//! │   ├── session.rs   ◄─── Identity + resolved role
//! │   ├── cart.rs      ◄─── Cart & wishlist with disk slots
//! │   └── config.rs    ◄─── Shop configuration
//! ├── commands/
//! │   ├── mod.rs       ◄─── Command exports + admin gate
//! │   ├── auth.rs      ◄─── Sign-up / sign-in / session
//! │   ├── product.rs   ◄─── Catalog + admin CRUD
//! │   ├── cart.rs      ◄─── Cart manipulation
//! │   ├── wishlist.rs  ◄─── Wishlist manipulation
//! │   ├── service.rs   ◄─── Service desk
//! │   └── dashboard.rs ◄─── Dashboard + admin stats
//! └── error.rs         ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mobicare_backend::{IdentityProvider, LocalIdentityProvider, MemoryStore, UserRepository};
use state::{BackendState, CartState, ConfigState, SessionState, WishlistState};

/// Every state container the command layer needs, wired together.
#[derive(Clone)]
pub struct App {
    pub backend: BackendState,
    pub session: SessionState,
    pub cart: CartState,
    pub wishlist: WishlistState,
    pub config: ConfigState,
}

impl App {
    /// Wires the app over the given identity provider and data dir.
    pub fn build(provider: Arc<dyn IdentityProvider>, data_dir: &std::path::Path) -> Self {
        let store = Arc::new(MemoryStore::new());
        let backend = BackendState::new(store.clone());
        let session = SessionState::new(provider, UserRepository::new(store));

        App {
            backend,
            session,
            cart: CartState::load(data_dir),
            wishlist: WishlistState::load(data_dir),
            config: ConfigState::from_env(),
        }
    }
}

/// Runs the storefront service.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Resolve Data Directory ───────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/storefront/                                 │
/// │     • Override: MOBICARE_DATA_DIR                                       │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • BackendState over the hosted store                                │
/// │     • SessionState + identity listener task                             │
/// │     • CartState / WishlistState loaded from their slots                 │
/// │                                                                         │
/// │  4. Serve until Ctrl-C ───────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> anyhow::Result<()> {
    init_tracing();
    info!("Starting MobiCare storefront");

    let data_dir = get_data_dir()?;
    info!(?data_dir, "Data directory resolved");

    let provider: Arc<dyn IdentityProvider> = Arc::new(LocalIdentityProvider::new());
    let app = App::build(provider, &data_dir);

    let listener = app.session.spawn_listener();
    info!(store = %app.config.store_name, "State initialized, storefront ready");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutting down");
    listener.abort();
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=mobicare=trace` - Show trace for mobicare crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,mobicare=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the local data directory for cart/wishlist slots.
///
/// ## Development Override
/// Set `MOBICARE_DATA_DIR` to use a custom path.
fn get_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::var("MOBICARE_DATA_DIR") {
        return Ok(PathBuf::from(path));
    }

    let proj_dirs = ProjectDirs::from("com", "mobicare", "storefront")
        .context("Could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Could not create data directory {:?}", data_dir))?;
    Ok(data_dir.to_path_buf())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use state::Session;

    #[tokio::test]
    async fn test_listener_resolves_session_after_sign_up() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(LocalIdentityProvider::new());
        let app = App::build(provider.clone(), dir.path());

        let listener = app.session.spawn_listener();
        provider.sign_up("asha@example.com", "secret1").await.unwrap();

        // The listener task needs a few polls to drain the events
        for _ in 0..100 {
            if matches!(
                app.session.snapshot(),
                Session::Resolved { identity: Some(_), .. }
            ) {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert!(matches!(
            app.session.snapshot(),
            Session::Resolved { identity: Some(_), .. }
        ));
        listener.abort();
    }

    #[tokio::test]
    async fn test_app_build_starts_with_empty_cart_and_wishlist() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::build(Arc::new(LocalIdentityProvider::new()), dir.path());

        assert!(app.cart.with_cart(|c| c.is_empty()));
        assert!(app.wishlist.with_wishlist(|w| w.is_empty()));
        assert_eq!(app.config.currency_code, "INR");
    }
}
