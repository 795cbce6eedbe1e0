//! # Service Request Repository
//!
//! Store operations for repair tickets.
//!
//! ## Ticket Status Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repair Ticket Lifecycle                              │
//! │                                                                         │
//! │  intake form                                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Received ──► In Progress ──► Ready ──► Delivered                       │
//! │                                                                         │
//! │  Setting a completion date forces the ticket to Ready; clearing it      │
//! │  sends the ticket back to In Progress. Status can also be set           │
//! │  directly from the admin panel.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::{decode_list, encode_without_id, inject_id, RealtimeStore};
use mobicare_core::types::{ServiceRequest, ServiceStatus};

const REQUESTS_PATH: &str = "serviceRequests";

/// Repository for repair tickets.
#[derive(Clone)]
pub struct ServiceRequestRepository {
    store: Arc<dyn RealtimeStore>,
}

impl ServiceRequestRepository {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        ServiceRequestRepository { store }
    }

    fn path_for(id: &str) -> String {
        format!("{}/{}", REQUESTS_PATH, id)
    }

    /// Persists a new ticket and returns it with its assigned id.
    pub async fn create(&self, mut request: ServiceRequest) -> StoreResult<ServiceRequest> {
        let doc = encode_without_id(REQUESTS_PATH, &request, "id")?;
        let key = self.store.push(REQUESTS_PATH, doc).await?;

        info!(id = %key, service_id = %request.service_id, "Service request created");
        request.id = key;
        Ok(request)
    }

    /// Fetches a ticket by id.
    pub async fn get(&self, id: &str) -> StoreResult<ServiceRequest> {
        let path = Self::path_for(id);
        let doc = self
            .store
            .get(&path)
            .await?
            .ok_or_else(|| StoreError::not_found(&path))?;
        inject_id(&path, id, doc, "id")
    }

    /// Lists every ticket, newest first. Admin view.
    pub async fn list_all(&self) -> StoreResult<Vec<ServiceRequest>> {
        let entries = self.store.list(REQUESTS_PATH).await?;
        let mut requests: Vec<ServiceRequest> = decode_list(REQUESTS_PATH, entries, "id")?;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// Lists the tickets submitted by `uid`, newest first. Dashboard view.
    pub async fn list_for_user(&self, uid: &str) -> StoreResult<Vec<ServiceRequest>> {
        let mut requests = self.list_all().await?;
        requests.retain(|r| r.user_id.as_deref() == Some(uid));
        Ok(requests)
    }

    /// Sets a ticket's status directly.
    pub async fn set_status(&self, id: &str, status: ServiceStatus) -> StoreResult<ServiceRequest> {
        self.merge(id, {
            let mut fields = Map::new();
            fields.insert("status".to_string(), json!(status));
            fields
        })
        .await?;

        debug!(id = %id, status = ?status, "Service status changed");
        self.get(id).await
    }

    /// Sets or clears a ticket's completion date.
    ///
    /// ## Behavior
    /// - `Some(date)` also moves the ticket to `Ready`
    /// - `None` clears the date and moves the ticket back to `In Progress`
    pub async fn set_completion_date(
        &self,
        id: &str,
        completion_date: Option<NaiveDate>,
    ) -> StoreResult<ServiceRequest> {
        let status = match completion_date {
            Some(_) => ServiceStatus::Ready,
            None => ServiceStatus::InProgress,
        };

        self.merge(id, {
            let mut fields = Map::new();
            fields.insert("completionDate".to_string(), json!(completion_date));
            fields.insert("status".to_string(), json!(status));
            fields
        })
        .await?;

        debug!(id = %id, completed = completion_date.is_some(), "Completion date changed");
        self.get(id).await
    }

    /// Merges fields into an EXISTING ticket.
    async fn merge(&self, id: &str, fields: Map<String, Value>) -> StoreResult<()> {
        let path = Self::path_for(id);
        if self.store.get(&path).await?.is_none() {
            return Err(StoreError::not_found(&path));
        }
        self.store.update(&path, fields).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
