//! # Policy Configuration API
//!
//! Admin-owned policy configuration. Edits replace the whole object (or one
//! per-mode notice rule); every evaluator reads the current config on its
//! next call, so there is no cache to invalidate.
//!
//! ## Endpoints
//!
//! - `GET /v1/policy` — read the current configuration
//! - `PUT /v1/policy` — replace the whole configuration (ManagePolicies)
//! - `PUT /v1/policy/notice/:mode` — set one mode's notice rule (ManagePolicies)

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use tdesk_core::{Capability, TravelMode};
use tdesk_policy::PolicyConfig;

use crate::auth::{require_capability, CallerIdentity};
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Per-mode notice rule payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetNoticeRuleRequest {
    /// Minimum whole calendar days of advance notice. `null` removes the
    /// rule for the mode (no rule means never a violation).
    pub min_advance_days: Option<u32>,
}

/// Build the policy router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/policy", get(get_policy).put(put_policy))
        .route("/v1/policy/notice/:mode", put(put_notice_rule))
}

/// GET /v1/policy — Read the current policy configuration.
#[utoipa::path(
    get,
    path = "/v1/policy",
    responses(
        (status = 200, description = "Current policy", body = Object),
    ),
    tag = "policy"
)]
pub async fn get_policy(State(state): State<AppState>) -> Json<PolicyConfig> {
    Json(state.policy_snapshot())
}

/// PUT /v1/policy — Replace the whole policy configuration.
#[utoipa::path(
    put,
    path = "/v1/policy",
    request_body = Object,
    responses(
        (status = 200, description = "Policy replaced", body = Object),
        (status = 403, description = "Missing ManagePolicies capability", body = crate::error::ErrorBody),
        (status = 400, description = "Malformed policy body", body = crate::error::ErrorBody),
    ),
    tag = "policy"
)]
pub async fn put_policy(
    State(state): State<AppState>,
    caller: CallerIdentity,
    body: Result<Json<PolicyConfig>, JsonRejection>,
) -> Result<Json<PolicyConfig>, AppError> {
    require_capability(&caller, Capability::ManagePolicies)?;
    let new_policy = extract_json(body)?;

    *state.policy.write() = new_policy.clone();
    tracing::info!(
        enforcement = new_policy.enforcement_enabled,
        notice_rules = new_policy.notice.len(),
        "policy replaced"
    );
    Ok(Json(new_policy))
}

/// PUT /v1/policy/notice/:mode — Set or remove one mode's notice rule.
#[utoipa::path(
    put,
    path = "/v1/policy/notice/{mode}",
    params(("mode" = String, Path, description = "flight, train, bus, or other")),
    request_body = SetNoticeRuleRequest,
    responses(
        (status = 200, description = "Updated policy", body = Object),
        (status = 403, description = "Missing ManagePolicies capability", body = crate::error::ErrorBody),
        (status = 422, description = "Unknown travel mode", body = crate::error::ErrorBody),
    ),
    tag = "policy"
)]
pub async fn put_notice_rule(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(mode): Path<String>,
    body: Result<Json<SetNoticeRuleRequest>, JsonRejection>,
) -> Result<Json<PolicyConfig>, AppError> {
    require_capability(&caller, Capability::ManagePolicies)?;
    let mode = TravelMode::parse(&mode)?;
    let req = extract_json(body)?;

    let mut guard = state.policy.write();
    match req.min_advance_days {
        Some(days) => guard.notice.set(mode, days),
        None => {
            guard.notice.remove(mode);
        }
    }
    Ok(Json(guard.clone()))
}
