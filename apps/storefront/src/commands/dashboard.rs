//! # Dashboard Commands
//!
//! The shopper dashboard (order history) and the admin stats header.

use serde::Serialize;
use tracing::debug;

use crate::commands::require_admin;
use crate::error::ApiError;
use crate::state::{BackendState, SessionState};
use mobicare_core::types::Order;

/// The tiles at the top of the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_products: usize,
    pub total_service_requests: usize,
    /// Tickets still on the workbench: Received or In Progress.
    pub pending_repairs: usize,
    pub total_orders: usize,
}

/// Computes the admin overview numbers. Admin only.
pub async fn admin_stats(
    session: &SessionState,
    backend: &BackendState,
) -> Result<AdminStats, ApiError> {
    require_admin(session)?;
    debug!("admin_stats command");

    let products = backend.backend().products().list().await?;
    let requests = backend.backend().service_requests().list_all().await?;
    let orders = backend.backend().orders().list_all().await?;

    let pending_repairs = requests.iter().filter(|r| r.status.is_pending()).count();

    Ok(AdminStats {
        total_products: products.len(),
        total_service_requests: requests.len(),
        pending_repairs,
        total_orders: orders.len(),
    })
}

/// The signed-in user's order history, newest first.
pub async fn my_orders(
    session: &SessionState,
    backend: &BackendState,
) -> Result<Vec<Order>, ApiError> {
    let Some(identity) = session.current_identity() else {
        return Ok(Vec::new());
    };
    Ok(backend.backend().orders().list_for_user(&identity.uid).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::sync::Arc;

    use chrono::Utc;
    use mobicare_backend::{IdentityProvider, LocalIdentityProvider, MemoryStore, UserRepository};
    use mobicare_core::types::{Role, ServiceStatus, UserRecord};
    use serde_json::json;

    async fn admin_fixture(store: Arc<MemoryStore>) -> (SessionState, BackendState) {
        let provider = Arc::new(LocalIdentityProvider::new());
        let session = SessionState::new(provider.clone(), UserRepository::new(store.clone()));
        let backend = BackendState::new(store.clone());

        let identity = provider.sign_up("boss@shop.com", "secret1").await.unwrap();
        UserRepository::new(store)
            .ensure_record(
                &identity.uid,
                &UserRecord {
                    email: identity.email.clone(),
                    role: Role::Admin,
                    display_name: None,
                    photo_url: None,
                    provider: None,
                    created_at: Utc::now(),
                },
            )
            .await
            .unwrap();
        session.handle_identity_change(provider.current()).await;
        (session, backend)
    }

    #[tokio::test]
    async fn test_stats_count_pending_repairs() {
        let store = Arc::new(MemoryStore::with_tree(json!({
            "serviceRequests": {
                "r-1": {
                    "serviceId": "SRV-A", "customerName": "A", "phone": "9876543210",
                    "email": "a@b.com", "deviceType": "mobile", "brand": "Apple",
                    "problemDescription": "x", "preferredDate": "2026-09-01",
                    "status": "Received", "completionDate": null,
                    "createdAt": "2026-08-01T10:00:00Z"
                },
                "r-2": {
                    "serviceId": "SRV-B", "customerName": "B", "phone": "9876543210",
                    "email": "b@b.com", "deviceType": "laptop", "brand": "Dell",
                    "problemDescription": "y", "preferredDate": "2026-09-01",
                    "status": "In Progress", "completionDate": null,
                    "createdAt": "2026-08-02T10:00:00Z"
                },
                "r-3": {
                    "serviceId": "SRV-C", "customerName": "C", "phone": "9876543210",
                    "email": "c@b.com", "deviceType": "ups", "brand": "APC",
                    "problemDescription": "z", "preferredDate": "2026-09-01",
                    "status": "Ready", "completionDate": "2026-08-20",
                    "createdAt": "2026-08-03T10:00:00Z"
                }
            },
            "orders": {
                "o-1": { "userId": "u", "items": [], "totalPaise": 0,
                         "createdAt": "2026-08-01T10:00:00Z" }
            }
        })));
        let (session, backend) = admin_fixture(store).await;

        let stats = admin_stats(&session, &backend).await.unwrap();
        assert_eq!(stats.total_service_requests, 3);
        assert_eq!(stats.pending_repairs, 2);
        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.total_products, 0);

        // Sanity: Ready is really excluded from pending
        let requests = backend.backend().service_requests().list_all().await.unwrap();
        assert!(requests.iter().any(|r| r.status == ServiceStatus::Ready));
    }

    #[tokio::test]
    async fn test_stats_are_admin_gated() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(LocalIdentityProvider::new());
        let session = SessionState::new(provider, UserRepository::new(store.clone()));
        let backend = BackendState::new(store);

        let err = admin_stats(&session, &backend).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn test_my_orders_empty_for_anonymous() {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(LocalIdentityProvider::new());
        let session = SessionState::new(provider, UserRepository::new(store.clone()));
        let backend = BackendState::new(store);

        assert!(my_orders(&session, &backend).await.unwrap().is_empty());
    }
}
