//! # Service Commands
//!
//! The service desk: intake, public tracking, and admin ticket ops.
//!
//! ## Intake Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoke('submit_service_request', { form })                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Validate (name, 10-digit phone, email, brand-in-family, ...)        │
//! │  2. Mint the ticket code: SRV-<base36 of now-millis>                    │
//! │  3. Persist with status Received, completionDate null                   │
//! │  4. Tag with the signed-in user's id, when there is one                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Customer keeps the SRV code and tracks the repair with it -            │
//! │  no account needed.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::commands::require_admin;
use crate::error::ApiError;
use crate::state::{BackendState, SessionState};
use mobicare_core::types::{service_id_for, DeviceType, ServiceRequest, ServiceStatus};
use mobicare_core::validation::validate_service_intake;

/// Intake form payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIntakeForm {
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub device_type: DeviceType,
    pub brand: String,
    pub problem_description: String,
    pub preferred_date: NaiveDate,
}

/// Brand options for a device family (drives the intake form dropdown).
pub fn device_brands(device_type: DeviceType) -> Vec<String> {
    device_type.brands().iter().map(|b| b.to_string()).collect()
}

/// Submits a repair ticket.
///
/// Works signed out; a signed-in session additionally ties the ticket
/// to the account so it shows up on the dashboard.
pub async fn submit_service_request(
    session: &SessionState,
    backend: &BackendState,
    form: ServiceIntakeForm,
) -> Result<ServiceRequest, ApiError> {
    let intake = validate_service_intake(
        &form.customer_name,
        &form.phone,
        &form.email,
        form.device_type,
        &form.brand,
        &form.problem_description,
        form.preferred_date,
    )?;

    let now = Utc::now();
    let request = ServiceRequest {
        id: String::new(),
        service_id: service_id_for(now.timestamp_millis()),
        customer_name: intake.customer_name,
        phone: intake.phone,
        email: intake.email,
        device_type: intake.device_type,
        brand: intake.brand,
        problem_description: intake.problem_description,
        preferred_date: intake.preferred_date,
        status: ServiceStatus::Received,
        completion_date: None,
        created_at: now,
        user_id: session.current_identity().map(|i| i.uid),
    };

    let created = backend.backend().service_requests().create(request).await?;
    info!(service_id = %created.service_id, "Service request submitted");
    Ok(created)
}

/// Looks a ticket up by its public SRV code.
///
/// This is the anonymous track-repair page: matching is case-insensitive
/// because the code gets read over the phone and typed back by hand.
pub async fn track_service_request(
    backend: &BackendState,
    service_id: &str,
) -> Result<ServiceRequest, ApiError> {
    let wanted = service_id.trim();
    debug!(service_id = %wanted, "track_service_request command");

    let all = backend.backend().service_requests().list_all().await?;
    all.into_iter()
        .find(|r| r.service_id.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ApiError::not_found("Service request", wanted))
}

/// The signed-in user's tickets, newest first.
pub async fn my_service_requests(
    session: &SessionState,
    backend: &BackendState,
) -> Result<Vec<ServiceRequest>, ApiError> {
    let Some(identity) = session.current_identity() else {
        return Ok(Vec::new());
    };
    Ok(backend
        .backend()
        .service_requests()
        .list_for_user(&identity.uid)
        .await?)
}

/// Every ticket, newest first. Admin only.
pub async fn list_service_requests(
    session: &SessionState,
    backend: &BackendState,
) -> Result<Vec<ServiceRequest>, ApiError> {
    require_admin(session)?;
    Ok(backend.backend().service_requests().list_all().await?)
}

/// Sets a ticket's status directly. Admin only.
pub async fn set_service_status(
    session: &SessionState,
    backend: &BackendState,
    id: &str,
    status: ServiceStatus,
) -> Result<ServiceRequest, ApiError> {
    require_admin(session)?;
    Ok(backend
        .backend()
        .service_requests()
        .set_status(id, status)
        .await?)
}

/// Sets or clears a ticket's completion date. Admin only.
///
/// Setting a date also readies the ticket; clearing it sends the
/// ticket back to In Progress.
pub async fn set_completion_date(
    session: &SessionState,
    backend: &BackendState,
    id: &str,
    completion_date: Option<NaiveDate>,
) -> Result<ServiceRequest, ApiError> {
    require_admin(session)?;
    Ok(backend
        .backend()
        .service_requests()
        .set_completion_date(id, completion_date)
        .await?)
}

// =============================================================================
// Unit Tests
// =============================================================================
