//! # Travel Requests API
//!
//! Submission and fulfillment lifecycle of travel requests.
//!
//! ## Endpoints
//!
//! - `POST /v1/requests` — submit (SubmitRequest; gate-locked users refused)
//! - `GET /v1/requests` — list
//! - `GET /v1/requests/:id` — get
//! - `POST /v1/requests/:id/approve` — approve (ApproveRequest)
//! - `POST /v1/requests/:id/reject` — reject (ApproveRequest)
//! - `POST /v1/requests/:id/cancel` — cancel (CancelRequest; own requests)
//! - `POST /v1/requests/:id/book` — book (BookTicket)
//! - `POST /v1/requests/:id/close` — close (CloseRequest)
//!
//! Submission is the policy chokepoint: the notice rule is evaluated and
//! frozen into the request's snapshot here, the verification gate is checked
//! here, and auto-approval fires here. Lifecycle endpoints only move the
//! state machine.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use tdesk_core::{Capability, TravelMode, UserId};
use tdesk_policy::{gate, submit_request};
use tdesk_state::{SubmitRequestParams, TravelRequest};

use crate::auth::{require_capability, CallerIdentity};
use crate::error::AppError;
use crate::extractors::{
    extract_json, extract_validated_json, require_text, FieldIssue, Validate,
};
use crate::state::AppState;

// ── Request DTOs ─────────────────────────────────────────────────────

/// Travel request submission payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitTravelRequest {
    /// The employee the request is for.
    pub employee_id: Uuid,
    /// One of "flight", "train", "bus", "other".
    pub mode: String,
    /// Calendar date of travel, `YYYY-MM-DD`.
    #[schema(value_type = String)]
    pub date_of_travel: NaiveDate,
    pub origin: String,
    pub destination: String,
    /// Estimated cost in minor currency units.
    pub estimated_cost_minor: u64,
    /// Mandatory when the submission violates the notice policy.
    #[serde(default)]
    pub justification: Option<String>,
}

impl Validate for SubmitTravelRequest {
    fn issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        issues.extend(require_text("origin", &self.origin));
        issues.extend(require_text("destination", &self.destination));
        if let Err(e) = TravelMode::parse(&self.mode) {
            issues.push(FieldIssue::new("mode", e.to_string()));
        }
        issues
    }
}

/// Lifecycle action payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LifecycleActionRequest {
    /// Reason recorded in the transition log.
    #[serde(default)]
    pub reason: Option<String>,
}

// ── Router ───────────────────────────────────────────────────────────

/// Build the requests router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/requests", get(list_requests).post(create_request))
        .route("/v1/requests/:id", get(get_request))
        .route("/v1/requests/:id/approve", post(approve_request))
        .route("/v1/requests/:id/reject", post(reject_request))
        .route("/v1/requests/:id/cancel", post(cancel_request))
        .route("/v1/requests/:id/book", post(book_request))
        .route("/v1/requests/:id/close", post(close_request))
}

// ── Handlers ─────────────────────────────────────────────────────────

/// POST /v1/requests — Submit a travel request.
///
/// The submitting employee must be past the verification gate; locked users
/// get 403. The notice policy is evaluated against today's date and frozen
/// into the request. Cost at or below the auto-approval limit moves the
/// request straight to Approved.
#[utoipa::path(
    post,
    path = "/v1/requests",
    request_body = SubmitTravelRequest,
    responses(
        (status = 201, description = "Request submitted", body = Object),
        (status = 403, description = "Caller lacks SubmitRequest, or the employee is gate-locked", body = crate::error::ErrorBody),
        (status = 404, description = "Employee not found", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error or missing justification", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn create_request(
    State(state): State<AppState>,
    caller: CallerIdentity,
    body: Result<Json<SubmitTravelRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TravelRequest>), AppError> {
    require_capability(&caller, Capability::SubmitRequest)?;
    let req = extract_validated_json(body)?;

    let employee = state
        .users
        .get(&req.employee_id)
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", req.employee_id)))?;

    let policy = state.policy_snapshot();
    if gate::is_locked(employee.role, &employee.documents, &policy) {
        return Err(AppError::Forbidden(
            "identity verification incomplete: upload and get your documents approved first"
                .to_string(),
        ));
    }

    let mode = TravelMode::parse(&req.mode)?;
    let params = SubmitRequestParams {
        employee_id: UserId::from_uuid(req.employee_id),
        mode,
        date_of_travel: req.date_of_travel,
        origin: req.origin,
        destination: req.destination,
        estimated_cost_minor: req.estimated_cost_minor,
        justification: req.justification,
    };

    let today = Utc::now().date_naive();
    let record = submit_request(params, &policy, today)?;
    let id = *record.id.as_uuid();

    tracing::info!(
        request_id = %id,
        mode = %mode,
        flagged = record.violation().flagged,
        status = %record.status,
        "travel request submitted"
    );

    state.requests.insert(id, record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/requests — List travel requests.
///
/// Callers with ViewDashboard see everything; employees see their own.
#[utoipa::path(
    get,
    path = "/v1/requests",
    responses(
        (status = 200, description = "List of requests", body = Vec<Object>),
    ),
    tag = "requests"
)]
pub async fn list_requests(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Json<Vec<TravelRequest>> {
    let all = state.requests.list();
    if caller.can(Capability::ViewDashboard) {
        return Json(all);
    }
    // Tokens without a user binding see nothing rather than everything.
    let own: Vec<_> = match caller.user_id {
        Some(uid) => all
            .into_iter()
            .filter(|r| *r.employee_id.as_uuid() == uid)
            .collect(),
        None => Vec::new(),
    };
    Json(own)
}

/// GET /v1/requests/:id — Get a single request.
#[utoipa::path(
    get,
    path = "/v1/requests/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request found", body = Object),
        (status = 404, description = "Request not found", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TravelRequest>, AppError> {
    state
        .requests
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("request {id} not found")))
}

/// Run a lifecycle transition under a single write lock.
fn transition(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut TravelRequest) -> Result<(), tdesk_state::RequestError>,
) -> Result<Json<TravelRequest>, AppError> {
    state
        .requests
        .try_update(&id, |request| {
            f(request)?;
            Ok::<_, AppError>(request.clone())
        })
        .ok_or_else(|| AppError::NotFound(format!("request {id} not found")))?
        .map(Json)
}

/// POST /v1/requests/:id/approve — Approve a submitted request.
#[utoipa::path(
    post,
    path = "/v1/requests/{id}/approve",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = LifecycleActionRequest,
    responses(
        (status = 200, description = "Request approved", body = Object),
        (status = 403, description = "Missing ApproveRequest capability", body = crate::error::ErrorBody),
        (status = 404, description = "Request not found", body = crate::error::ErrorBody),
        (status = 409, description = "Not in an approvable state", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn approve_request(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    body: Result<Json<LifecycleActionRequest>, JsonRejection>,
) -> Result<Json<TravelRequest>, AppError> {
    require_capability(&caller, Capability::ApproveRequest)?;
    let req = extract_json(body)?;
    let reason = req.reason.unwrap_or_else(|| "approved".to_string());
    transition(&state, id, |r| r.approve(&reason))
}

/// POST /v1/requests/:id/reject — Reject a submitted request.
#[utoipa::path(
    post,
    path = "/v1/requests/{id}/reject",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = LifecycleActionRequest,
    responses(
        (status = 200, description = "Request rejected", body = Object),
        (status = 403, description = "Missing ApproveRequest capability", body = crate::error::ErrorBody),
        (status = 404, description = "Request not found", body = crate::error::ErrorBody),
        (status = 409, description = "Not in a rejectable state", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn reject_request(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    body: Result<Json<LifecycleActionRequest>, JsonRejection>,
) -> Result<Json<TravelRequest>, AppError> {
    require_capability(&caller, Capability::ApproveRequest)?;
    let req = extract_json(body)?;
    let reason = req.reason.unwrap_or_else(|| "rejected".to_string());
    transition(&state, id, |r| r.reject(&reason))
}

/// POST /v1/requests/:id/cancel — Withdraw a pending request.
///
/// An employee may only cancel their own request; admins may cancel any.
#[utoipa::path(
    post,
    path = "/v1/requests/{id}/cancel",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = LifecycleActionRequest,
    responses(
        (status = 200, description = "Request cancelled", body = Object),
        (status = 403, description = "Missing CancelRequest capability or not the owner", body = crate::error::ErrorBody),
        (status = 404, description = "Request not found", body = crate::error::ErrorBody),
        (status = 409, description = "Not in a cancellable state", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn cancel_request(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    body: Result<Json<LifecycleActionRequest>, JsonRejection>,
) -> Result<Json<TravelRequest>, AppError> {
    require_capability(&caller, Capability::CancelRequest)?;
    let req = extract_json(body)?;
    let reason = req.reason.unwrap_or_else(|| "cancelled by requester".to_string());

    // Ownership check: a bound employee token may only touch its own rows.
    // ManageUsers holders (admins) act on anyone's behalf.
    if let Some(uid) = caller.user_id {
        if !caller.can(Capability::ManageUsers) {
            let existing = state
                .requests
                .get(&id)
                .ok_or_else(|| AppError::NotFound(format!("request {id} not found")))?;
            if *existing.employee_id.as_uuid() != uid {
                return Err(AppError::Forbidden(
                    "cannot cancel another employee's request".to_string(),
                ));
            }
        }
    }

    transition(&state, id, |r| r.cancel(&reason))
}

/// POST /v1/requests/:id/book — Record the booking (PNC desk).
#[utoipa::path(
    post,
    path = "/v1/requests/{id}/book",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = LifecycleActionRequest,
    responses(
        (status = 200, description = "Request booked", body = Object),
        (status = 403, description = "Missing BookTicket capability", body = crate::error::ErrorBody),
        (status = 404, description = "Request not found", body = crate::error::ErrorBody),
        (status = 409, description = "Not approved yet", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn book_request(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    body: Result<Json<LifecycleActionRequest>, JsonRejection>,
) -> Result<Json<TravelRequest>, AppError> {
    require_capability(&caller, Capability::BookTicket)?;
    let req = extract_json(body)?;
    let reason = req.reason.unwrap_or_else(|| "booked".to_string());
    transition(&state, id, |r| r.book(&reason))
}

/// POST /v1/requests/:id/close — Reconcile and close (finance).
#[utoipa::path(
    post,
    path = "/v1/requests/{id}/close",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = LifecycleActionRequest,
    responses(
        (status = 200, description = "Request closed", body = Object),
        (status = 403, description = "Missing CloseRequest capability", body = crate::error::ErrorBody),
        (status = 404, description = "Request not found", body = crate::error::ErrorBody),
        (status = 409, description = "Not booked yet", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub async fn close_request(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    body: Result<Json<LifecycleActionRequest>, JsonRejection>,
) -> Result<Json<TravelRequest>, AppError> {
    require_capability(&caller, Capability::CloseRequest)?;
    let req = extract_json(body)?;
    let reason = req.reason.unwrap_or_else(|| "closed".to_string());
    transition(&state, id, |r| r.close(&reason))
}
