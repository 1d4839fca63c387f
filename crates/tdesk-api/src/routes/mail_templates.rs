//! # Mail Templates API
//!
//! Thin CRUD over the notification templates admins edit. Templates are
//! rows, not logic: no rendering or delivery happens here.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use tdesk_core::{Capability, TemplateId, Timestamp};

use crate::auth::{require_capability, CallerIdentity};
use crate::error::AppError;
use crate::extractors::{extract_validated_json, require_text, FieldIssue, Validate};
use crate::state::{AppState, MailTemplateRecord};

/// Create/update payload for a mail template.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MailTemplateRequest {
    pub name: String,
    pub subject: String,
    pub body: String,
}

impl Validate for MailTemplateRequest {
    fn issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        issues.extend(require_text("name", &self.name));
        issues.extend(require_text("subject", &self.subject));
        issues
    }
}

/// Build the mail-templates router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/mail-templates",
            get(list_templates).post(create_template),
        )
        .route(
            "/v1/mail-templates/:id",
            get(get_template).put(update_template).delete(delete_template),
        )
}

/// GET /v1/mail-templates — List all templates.
#[utoipa::path(
    get,
    path = "/v1/mail-templates",
    responses(
        (status = 200, description = "List of templates", body = Vec<MailTemplateRecord>),
        (status = 403, description = "Missing ManageMailTemplates capability", body = crate::error::ErrorBody),
    ),
    tag = "mail_templates"
)]
pub async fn list_templates(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> Result<Json<Vec<MailTemplateRecord>>, AppError> {
    require_capability(&caller, Capability::ManageMailTemplates)?;
    Ok(Json(state.mail_templates.list()))
}

/// POST /v1/mail-templates — Create a template.
#[utoipa::path(
    post,
    path = "/v1/mail-templates",
    request_body = MailTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = MailTemplateRecord),
        (status = 403, description = "Missing ManageMailTemplates capability", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "mail_templates"
)]
pub async fn create_template(
    State(state): State<AppState>,
    caller: CallerIdentity,
    body: Result<Json<MailTemplateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MailTemplateRecord>), AppError> {
    require_capability(&caller, Capability::ManageMailTemplates)?;
    let req = extract_validated_json(body)?;

    let id = TemplateId::new();
    let record = MailTemplateRecord {
        id,
        name: req.name,
        subject: req.subject,
        body: req.body,
        updated_at: Timestamp::now(),
    };
    state.mail_templates.insert(*id.as_uuid(), record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/mail-templates/:id — Get a single template.
#[utoipa::path(
    get,
    path = "/v1/mail-templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template found", body = MailTemplateRecord),
        (status = 404, description = "Template not found", body = crate::error::ErrorBody),
    ),
    tag = "mail_templates"
)]
pub async fn get_template(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<MailTemplateRecord>, AppError> {
    require_capability(&caller, Capability::ManageMailTemplates)?;
    state
        .mail_templates
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("mail template {id} not found")))
}

/// PUT /v1/mail-templates/:id — Replace a template.
#[utoipa::path(
    put,
    path = "/v1/mail-templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    request_body = MailTemplateRequest,
    responses(
        (status = 200, description = "Template updated", body = MailTemplateRecord),
        (status = 404, description = "Template not found", body = crate::error::ErrorBody),
    ),
    tag = "mail_templates"
)]
pub async fn update_template(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    body: Result<Json<MailTemplateRequest>, JsonRejection>,
) -> Result<Json<MailTemplateRecord>, AppError> {
    require_capability(&caller, Capability::ManageMailTemplates)?;
    let req = extract_validated_json(body)?;

    state
        .mail_templates
        .update(&id, |template| {
            template.name = req.name.clone();
            template.subject = req.subject.clone();
            template.body = req.body.clone();
            template.updated_at = Timestamp::now();
        })
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("mail template {id} not found")))
}

/// DELETE /v1/mail-templates/:id — Delete a template.
#[utoipa::path(
    delete,
    path = "/v1/mail-templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 404, description = "Template not found", body = crate::error::ErrorBody),
    ),
    tag = "mail_templates"
)]
pub async fn delete_template(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_capability(&caller, Capability::ManageMailTemplates)?;
    state
        .mail_templates
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| AppError::NotFound(format!("mail template {id} not found")))
}
