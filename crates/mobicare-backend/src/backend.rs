//! # Backend Aggregate
//!
//! One handle bundling the hosted store and its repositories.
//!
//! The storefront app holds a single `Backend` and reaches every
//! collection through it, mirroring how commands say
//! `backend.products().list()` rather than wiring four repositories
//! through every call site.

use std::sync::Arc;

use crate::repository::{
    OrderRepository, ProductRepository, ServiceRequestRepository, UserRepository,
};
use crate::store::RealtimeStore;

/// Entry point to everything persisted in the hosted store.
///
/// ## Usage
/// ```rust,ignore
/// let backend = Backend::new(Arc::new(MemoryStore::new()));
/// let products = backend.products().list().await?;
/// let role = backend.users().role_of(&uid).await;
/// ```
#[derive(Clone)]
pub struct Backend {
    store: Arc<dyn RealtimeStore>,
    users: UserRepository,
    products: ProductRepository,
    service_requests: ServiceRequestRepository,
    orders: OrderRepository,
}

impl Backend {
    /// Wires repositories over the given store.
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        Backend {
            users: UserRepository::new(store.clone()),
            products: ProductRepository::new(store.clone()),
            service_requests: ServiceRequestRepository::new(store.clone()),
            orders: OrderRepository::new(store.clone()),
            store,
        }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<dyn RealtimeStore> {
        &self.store
    }

    /// User role records.
    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    /// Catalog products.
    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    /// Repair tickets.
    pub fn service_requests(&self) -> &ServiceRequestRepository {
        &self.service_requests
    }

    /// Past orders.
    pub fn orders(&self) -> &OrderRepository {
        &self.orders
    }
}
