//! # Users & Documents API
//!
//! User accounts, identity-document lifecycle, and live verification-gate
//! evaluation.
//!
//! ## Endpoints
//!
//! - `POST /v1/users` — create user (ManageUsers)
//! - `GET /v1/users` — list users (ManageUsers)
//! - `GET /v1/users/:id` — get user
//! - `POST /v1/users/:id/documents/:kind/upload` — upload or replace a file
//! - `POST /v1/users/:id/documents/:kind/approve` — approve (VerifyDocuments)
//! - `POST /v1/users/:id/documents/:kind/reject` — reject (VerifyDocuments)
//! - `GET /v1/users/:id/verification` — live gate evaluation

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use tdesk_core::{Capability, Role, Timestamp, UserId};
use tdesk_policy::gate;
use tdesk_state::{DocumentKind, DocumentSet};

use crate::auth::{require_capability, CallerIdentity};
use crate::error::AppError;
use crate::extractors::{
    extract_validated_json, require_email, require_text, FieldIssue, Validate,
};
use crate::state::{AppState, UserRecord};

// ── Request DTOs ─────────────────────────────────────────────────────

/// Request to create a user account.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    /// One of "employee", "pnc", "finance", "admin".
    pub role: String,
}

impl Validate for CreateUserRequest {
    fn issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        issues.extend(require_text("name", &self.name));
        issues.extend(require_email("email", &self.email));
        if let Err(e) = Role::parse(&self.role) {
            issues.push(FieldIssue::new("role", e.to_string()));
        }
        issues
    }
}

/// Request to upload (or re-upload) a document file.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UploadDocumentRequest {
    /// Where the uploaded file lives.
    pub file_url: String,
}

impl Validate for UploadDocumentRequest {
    fn issues(&self) -> Vec<FieldIssue> {
        require_text("file_url", &self.file_url).into_iter().collect()
    }
}

/// Approver decision payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DocumentDecisionRequest {
    /// Decision reason; mandatory for rejections, shown to the user.
    #[serde(default)]
    pub reason: Option<String>,
}

fn parse_kind(kind: &str) -> Result<DocumentKind, AppError> {
    DocumentKind::parse(kind)
        .ok_or_else(|| AppError::Validation(format!("unknown document kind '{kind}'")))
}

// ── Router ───────────────────────────────────────────────────────────

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/users", get(list_users).post(create_user))
        .route("/v1/users/:id", get(get_user))
        .route(
            "/v1/users/:id/documents/:kind/upload",
            post(upload_document),
        )
        .route(
            "/v1/users/:id/documents/:kind/approve",
            post(approve_document),
        )
        .route(
            "/v1/users/:id/documents/:kind/reject",
            post(reject_document),
        )
        .route("/v1/users/:id/verification", get(verification_status))
}

// ── Handlers ─────────────────────────────────────────────────────────

/// POST /v1/users — Create a user account.
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserRecord),
        (status = 403, description = "Missing ManageUsers capability", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    caller: CallerIdentity,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserRecord>), AppError> {
    require_capability(&caller, Capability::ManageUsers)?;
    let req = extract_validated_json(body)?;
    let role = Role::parse(&req.role)?;

    let now = Timestamp::now();
    let id = UserId::new();
    let record = UserRecord {
        id,
        name: req.name,
        email: req.email,
        role,
        documents: DocumentSet::empty_slots(),
        created_at: now,
        updated_at: now,
    };

    state.users.insert(*id.as_uuid(), record.clone());
    tracing::info!(user_id = %id, role = %role, "user created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/users — List all users.
#[utoipa::path(
    get,
    path = "/v1/users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserRecord>),
        (status = 403, description = "Missing ManageUsers capability", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<Vec<UserRecord>>, AppError> {
    require_capability(&caller, Capability::ManageUsers)?;
    Ok(Json(state.users.list()))
}

/// GET /v1/users/:id — Get a single user.
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserRecord),
        (status = 404, description = "User not found", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserRecord>, AppError> {
    state
        .users
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))
}

/// POST /v1/users/:id/documents/:kind/upload — Upload or replace a file.
///
/// First upload moves Incomplete → PendingVerification; a re-upload from
/// PendingVerification or Rejected resets to PendingVerification and clears
/// the rejection reason. Approved documents are final.
#[utoipa::path(
    post,
    path = "/v1/users/{id}/documents/{kind}/upload",
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("kind" = String, Path, description = "passport_photo or id_proof"),
    ),
    request_body = UploadDocumentRequest,
    responses(
        (status = 200, description = "Document uploaded", body = UserRecord),
        (status = 404, description = "User not found", body = crate::error::ErrorBody),
        (status = 409, description = "Document not in an uploadable state", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub async fn upload_document(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
    body: Result<Json<UploadDocumentRequest>, JsonRejection>,
) -> Result<Json<UserRecord>, AppError> {
    let kind = parse_kind(&kind)?;
    let req = extract_validated_json(body)?;

    state
        .users
        .try_update(&id, |user| {
            user.documents
                .get_or_create(kind)
                .upload_or_replace(req.file_url.clone())?;
            user.updated_at = Timestamp::now();
            Ok::<_, AppError>(user.clone())
        })
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))?
        .map(Json)
}

/// POST /v1/users/:id/documents/:kind/approve — Approve a document.
#[utoipa::path(
    post,
    path = "/v1/users/{id}/documents/{kind}/approve",
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("kind" = String, Path, description = "passport_photo or id_proof"),
    ),
    request_body = DocumentDecisionRequest,
    responses(
        (status = 200, description = "Document approved", body = UserRecord),
        (status = 403, description = "Missing VerifyDocuments capability", body = crate::error::ErrorBody),
        (status = 404, description = "User not found", body = crate::error::ErrorBody),
        (status = 409, description = "Document not pending verification", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub async fn approve_document(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path((id, kind)): Path<(Uuid, String)>,
    body: Result<Json<DocumentDecisionRequest>, JsonRejection>,
) -> Result<Json<UserRecord>, AppError> {
    require_capability(&caller, Capability::VerifyDocuments)?;
    let kind = parse_kind(&kind)?;
    let req = crate::extractors::extract_json(body)?;
    let reason = req.reason.unwrap_or_else(|| "approved".to_string());

    state
        .users
        .try_update(&id, |user| {
            user.documents.get_or_create(kind).approve(&reason)?;
            user.updated_at = Timestamp::now();
            Ok::<_, AppError>(user.clone())
        })
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))?
        .map(Json)
}

/// POST /v1/users/:id/documents/:kind/reject — Reject a document.
///
/// The reason is mandatory and stored on the document for the user.
#[utoipa::path(
    post,
    path = "/v1/users/{id}/documents/{kind}/reject",
    params(
        ("id" = Uuid, Path, description = "User ID"),
        ("kind" = String, Path, description = "passport_photo or id_proof"),
    ),
    request_body = DocumentDecisionRequest,
    responses(
        (status = 200, description = "Document rejected", body = UserRecord),
        (status = 403, description = "Missing VerifyDocuments capability", body = crate::error::ErrorBody),
        (status = 404, description = "User not found", body = crate::error::ErrorBody),
        (status = 409, description = "Document not pending verification", body = crate::error::ErrorBody),
        (status = 422, description = "Missing rejection reason", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub async fn reject_document(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path((id, kind)): Path<(Uuid, String)>,
    body: Result<Json<DocumentDecisionRequest>, JsonRejection>,
) -> Result<Json<UserRecord>, AppError> {
    require_capability(&caller, Capability::VerifyDocuments)?;
    let kind = parse_kind(&kind)?;
    let req = crate::extractors::extract_json(body)?;
    let reason = req
        .reason
        .ok_or_else(|| AppError::Validation("rejection reason is required".to_string()))?;

    state
        .users
        .try_update(&id, |user| {
            user.documents.get_or_create(kind).reject(&reason)?;
            user.updated_at = Timestamp::now();
            Ok::<_, AppError>(user.clone())
        })
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))?
        .map(Json)
}

/// GET /v1/users/:id/verification — Evaluate the verification gate live.
///
/// Always recomputed from the current documents and policy; lock state is
/// never stored, so policy edits take effect on the next call.
#[utoipa::path(
    get,
    path = "/v1/users/{id}/verification",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Gate evaluation", body = Object),
        (status = 404, description = "User not found", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub async fn verification_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<gate::GateStatus>, AppError> {
    let user = state
        .users
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))?;
    let policy = state.policy_snapshot();
    Ok(Json(gate::evaluate(user.role, &user.documents, &policy)))
}
