//! # Dashboard API
//!
//! Aggregated reporting over the request store for the operations and
//! finance dashboards. Read-only; every number is recomputed per call.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use tdesk_core::Capability;
use tdesk_state::RequestStatus;

use crate::auth::{require_capability, CallerIdentity};
use crate::error::AppError;
use crate::state::AppState;

/// Aggregated view of the request store.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    /// Total number of requests, all statuses.
    pub total_requests: usize,
    /// Requests per status, keyed by snake_case status name.
    pub by_status: BTreeMap<String, usize>,
    /// Estimated spend per travel mode in minor units, keyed by mode name.
    pub spend_by_mode_minor: BTreeMap<String, u64>,
    /// Estimated spend per travel month (`YYYY-MM`) in minor units.
    pub spend_by_month_minor: BTreeMap<String, u64>,
    /// Requests flagged as notice-policy violations at submission.
    pub violation_count: usize,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/dashboard/summary", get(summary))
}

fn status_key(status: RequestStatus) -> String {
    // Matches the serde snake_case form of RequestStatus.
    status.to_string().to_lowercase()
}

/// GET /v1/dashboard/summary — Aggregate request counts and spend.
#[utoipa::path(
    get,
    path = "/v1/dashboard/summary",
    responses(
        (status = 200, description = "Dashboard aggregates", body = DashboardSummary),
        (status = 403, description = "Missing ViewDashboard capability", body = crate::error::ErrorBody),
    ),
    tag = "dashboard"
)]
pub async fn summary(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<DashboardSummary>, AppError> {
    require_capability(&caller, Capability::ViewDashboard)?;

    let requests = state.requests.list();
    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut spend_by_mode: BTreeMap<String, u64> = BTreeMap::new();
    let mut spend_by_month: BTreeMap<String, u64> = BTreeMap::new();
    let mut violation_count = 0;

    for request in &requests {
        *by_status.entry(status_key(request.status)).or_default() += 1;
        *spend_by_mode
            .entry(request.mode.as_str().to_string())
            .or_default() += request.estimated_cost_minor;
        *spend_by_month
            .entry(request.date_of_travel.format("%Y-%m").to_string())
            .or_default() += request.estimated_cost_minor;
        if request.violation().flagged {
            violation_count += 1;
        }
    }

    Ok(Json(DashboardSummary {
        total_requests: requests.len(),
        by_status,
        spend_by_mode_minor: spend_by_mode,
        spend_by_month_minor: spend_by_month,
        violation_count,
    }))
}
