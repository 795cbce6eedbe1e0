//! # Product Commands
//!
//! Catalog browsing for everyone, product CRUD for admins.
//!
//! ## Catalog Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shop page                                                              │
//! │                                                                         │
//! │  invoke('list_products', { filter: { category: 'mobiles',               │
//! │                                      search: 'galaxy' } })              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Fetch catalog → apply filter in memory → newest first                  │
//! │                                                                         │
//! │  Admin panel (gated):                                                   │
//! │  create_product / update_product / delete_product                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use tracing::{debug, info};

use crate::commands::require_admin;
use crate::error::ApiError;
use crate::state::{BackendState, SessionState};
use mobicare_core::types::{Category, Product, ProductFilter};
use mobicare_core::validation::validate_product_form;
use mobicare_core::Money;

/// Admin product form payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub category: Category,
    pub brand: String,
    pub price_paise: i64,
    pub rating: f64,
    pub stock: i64,
    pub image: String,
}

/// Lists catalog products passing `filter`, newest first.
pub async fn list_products(
    backend: &BackendState,
    filter: &ProductFilter,
) -> Result<Vec<Product>, ApiError> {
    debug!(?filter, "list_products command");
    Ok(backend.backend().products().list_filtered(filter).await?)
}

/// Fetches one product for the detail page.
pub async fn get_product(backend: &BackendState, id: &str) -> Result<Product, ApiError> {
    Ok(backend.backend().products().get(id).await?)
}

/// Creates a catalog product. Admin only.
pub async fn create_product(
    session: &SessionState,
    backend: &BackendState,
    form: ProductForm,
) -> Result<Product, ApiError> {
    require_admin(session)?;
    validate_product_form(&form.name, &form.brand, form.price_paise, form.rating, form.stock)?;

    let product = Product::new(
        form.name.trim(),
        form.category,
        form.brand.trim(),
        Money::from_paise(form.price_paise),
        form.rating,
        form.stock,
        form.image,
    );
    let created = backend.backend().products().create(product).await?;
    info!(id = %created.id, name = %created.name, "Product created by admin");
    Ok(created)
}

/// Updates a catalog product. Admin only.
pub async fn update_product(
    session: &SessionState,
    backend: &BackendState,
    id: &str,
    form: ProductForm,
) -> Result<Product, ApiError> {
    require_admin(session)?;
    validate_product_form(&form.name, &form.brand, form.price_paise, form.rating, form.stock)?;

    // Creation timestamp comes from the stored record
    let mut product = backend.backend().products().get(id).await?;
    product.name = form.name.trim().to_string();
    product.category = form.category;
    product.brand = form.brand.trim().to_string();
    product.price_paise = form.price_paise;
    product.rating = form.rating;
    product.stock = form.stock;
    product.image = form.image;

    let updated = backend.backend().products().update(product).await?;
    info!(id = %updated.id, "Product updated by admin");
    Ok(updated)
}

/// Deletes a catalog product. Admin only.
pub async fn delete_product(
    session: &SessionState,
    backend: &BackendState,
    id: &str,
) -> Result<(), ApiError> {
    require_admin(session)?;
    backend.backend().products().delete(id).await?;
    info!(id = %id, "Product deleted by admin");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
