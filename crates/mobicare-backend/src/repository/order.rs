//! # Order Repository
//!
//! Read-only access to past orders.
//!
//! The checkout flow that WRITES orders lives outside this system; the
//! dashboard lists a shopper's history and the admin panel counts the
//! totals.

use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::store::{decode_list, inject_id, RealtimeStore};
use mobicare_core::types::Order;

const ORDERS_PATH: &str = "orders";

/// Repository for past orders.
#[derive(Clone)]
pub struct OrderRepository {
    store: Arc<dyn RealtimeStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        OrderRepository { store }
    }

    /// Fetches an order by id.
    pub async fn get(&self, id: &str) -> StoreResult<Order> {
        let path = format!("{}/{}", ORDERS_PATH, id);
        let doc = self
            .store
            .get(&path)
            .await?
            .ok_or_else(|| StoreError::not_found(&path))?;
        inject_id(&path, id, doc, "id")
    }

    /// Lists every order, newest first. Admin stats.
    pub async fn list_all(&self) -> StoreResult<Vec<Order>> {
        let entries = self.store.list(ORDERS_PATH).await?;
        let mut orders: Vec<Order> = decode_list(ORDERS_PATH, entries, "id")?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Lists the orders placed by `uid`, newest first. Dashboard view.
    pub async fn list_for_user(&self, uid: &str) -> StoreResult<Vec<Order>> {
        let mut orders = self.list_all().await?;
        orders.retain(|o| o.user_id == uid);
        Ok(orders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn seeded() -> OrderRepository {
        let store = MemoryStore::with_tree(json!({
            "orders": {
                "o-1": {
                    "userId": "uid-1",
                    "items": [
                        { "productId": "p-1", "name": "iPhone 15", "pricePaise": 7990000, "quantity": 1 }
                    ],
                    "totalPaise": 7990000,
                    "createdAt": "2026-08-01T10:00:00Z"
                },
                "o-2": {
                    "userId": "uid-2",
                    "items": [],
                    "totalPaise": 0,
                    "createdAt": "2026-08-02T10:00:00Z"
                }
            }
        }));
        OrderRepository::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let repo = seeded();
        let mine = repo.list_for_user("uid-1").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "o-1");
        assert_eq!(mine[0].total().paise(), 7_990_000);
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let repo = seeded();
        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "o-2");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = seeded();
        assert!(matches!(
            repo.get("ghost").await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }
}
