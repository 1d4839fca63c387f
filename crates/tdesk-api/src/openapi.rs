//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec.
//! Serves at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TDesk API",
        version = "0.3.0",
        description = "Travel-request management: users and identity documents, the verification gate, notice-policy evaluation, request lifecycle, policy configuration, dashboards, and mail templates.",
        license(name = "MIT")
    ),
    paths(
        // Users & documents
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::upload_document,
        crate::routes::users::approve_document,
        crate::routes::users::reject_document,
        crate::routes::users::verification_status,
        // Requests
        crate::routes::requests::create_request,
        crate::routes::requests::list_requests,
        crate::routes::requests::get_request,
        crate::routes::requests::approve_request,
        crate::routes::requests::reject_request,
        crate::routes::requests::cancel_request,
        crate::routes::requests::book_request,
        crate::routes::requests::close_request,
        // Policy
        crate::routes::policy::get_policy,
        crate::routes::policy::put_policy,
        crate::routes::policy::put_notice_rule,
        // Dashboard
        crate::routes::dashboard::summary,
        // Mail templates
        crate::routes::mail_templates::list_templates,
        crate::routes::mail_templates::create_template,
        crate::routes::mail_templates::get_template,
        crate::routes::mail_templates::update_template,
        crate::routes::mail_templates::delete_template,
    ),
    components(schemas(
        // Records
        crate::state::UserRecord,
        crate::state::MailTemplateRecord,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // User DTOs
        crate::routes::users::CreateUserRequest,
        crate::routes::users::UploadDocumentRequest,
        crate::routes::users::DocumentDecisionRequest,
        // Request DTOs
        crate::routes::requests::SubmitTravelRequest,
        crate::routes::requests::LifecycleActionRequest,
        // Policy DTOs
        crate::routes::policy::SetNoticeRuleRequest,
        // Dashboard DTOs
        crate::routes::dashboard::DashboardSummary,
    )),
    tags(
        (name = "users", description = "User accounts, identity documents, verification gate"),
        (name = "requests", description = "Travel request submission and lifecycle"),
        (name = "policy", description = "Travel policy configuration"),
        (name = "dashboard", description = "Aggregated reporting"),
        (name = "mail_templates", description = "Notification template CRUD"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
