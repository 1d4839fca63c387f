//! # tdesk-api — Axum HTTP Service for the TDesk Stack
//!
//! HTTP surface over the travel-desk domain: users and their identity
//! documents, travel requests and their lifecycle, policy configuration,
//! dashboard aggregation, and mail templates.
//!
//! ## API Surface
//!
//! | Prefix                  | Module                       | Domain            |
//! |-------------------------|------------------------------|-------------------|
//! | `/v1/users/*`           | [`routes::users`]            | Users & documents |
//! | `/v1/requests/*`        | [`routes::requests`]         | Travel requests   |
//! | `/v1/policy*`           | [`routes::policy`]           | Policy config     |
//! | `/v1/dashboard/*`       | [`routes::dashboard`]        | Reporting         |
//! | `/v1/mail-templates/*`  | [`routes::mail_templates`]   | Mail templates    |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → TrafficStats → AuthMiddleware → Handler
//! ```
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::middleware::stats::TrafficStats;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the auth middleware
/// so they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };
    let stats = TrafficStats::new();

    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::users::router())
        .merge(routes::requests::router())
        .merge(routes::policy::router())
        .merge(routes::dashboard::router())
        .merge(routes::mail_templates::router())
        .merge(openapi::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(from_fn(middleware::stats::track_traffic))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(auth_config))
        .layer(axum::Extension(stats.clone()))
        .with_state(state);

    // Unauthenticated health probes and traffic counters.
    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .route(
            "/health/stats",
            axum::routing::get(middleware::stats::stats_handler),
        )
        .layer(axum::Extension(stats));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
