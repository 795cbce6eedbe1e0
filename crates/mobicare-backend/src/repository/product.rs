//! # Product Repository
//!
//! Store operations for the catalog.
//!
//! ## Key Operations
//! - CRUD against `products/{key}`
//! - Filtered listing (category, brand, price window, rating, search)
//!
//! Filtering happens in memory over the fetched catalog. The store has
//! no query language; the catalog of a single shop is a few hundred
//! records, so fetch-then-filter is the right trade.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{decode_list, encode_without_id, inject_id, RealtimeStore};
use mobicare_core::types::{Product, ProductFilter};

const PRODUCTS_PATH: &str = "products";

/// Repository for catalog products.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(store);
///
/// let created = repo.create(product).await?;
/// let all = repo.list().await?;
/// let phones = repo.list_filtered(&filter).await?;
/// ```
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn RealtimeStore>,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        ProductRepository { store }
    }

    fn path_for(id: &str) -> String {
        format!("{}/{}", PRODUCTS_PATH, id)
    }

    /// Persists a new product and returns it with its assigned id.
    pub async fn create(&self, mut product: Product) -> StoreResult<Product> {
        let doc = encode_without_id(PRODUCTS_PATH, &product, "id")?;
        let key = self.store.push(PRODUCTS_PATH, doc).await?;

        debug!(id = %key, name = %product.name, "Product created");
        product.id = key;
        Ok(product)
    }

    /// Fetches a product by id.
    pub async fn get(&self, id: &str) -> StoreResult<Product> {
        let path = Self::path_for(id);
        let doc = self
            .store
            .get(&path)
            .await?
            .ok_or_else(|| StoreError::not_found(&path))?;
        inject_id(&path, id, doc, "id")
    }

    /// Lists the whole catalog, newest first.
    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let entries = self.store.list(PRODUCTS_PATH).await?;
        let mut products: Vec<Product> = decode_list(PRODUCTS_PATH, entries, "id")?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    /// Lists catalog products passing `filter`, newest first.
    pub async fn list_filtered(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let mut products = self.list().await?;
        products.retain(|p| filter.matches(p));
        Ok(products)
    }

    /// Replaces an existing product, bumping its `updated_at`.
    ///
    /// Fails with [`StoreError::NotFound`] when the id no longer exists;
    /// an update must never silently resurrect a deleted product.
    pub async fn update(&self, mut product: Product) -> StoreResult<Product> {
        let path = Self::path_for(&product.id);
        if self.store.get(&path).await?.is_none() {
            return Err(StoreError::not_found(&path));
        }

        product.updated_at = Utc::now();
        let doc = encode_without_id(&path, &product, "id")?;
        self.store.put(&path, doc).await?;

        debug!(id = %product.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.delete(&Self::path_for(id)).await?;
        debug!(id = %id, "Product deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
