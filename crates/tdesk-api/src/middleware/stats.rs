//! # Traffic Stats
//!
//! Per-process request counters, split by response class. Served
//! unauthenticated at `/health/stats` so operators can watch a deploy
//! without credentials. Counters reset with the process; there is no
//! external metrics sink.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

/// Shared counters, cloned into every request via an `Extension`.
#[derive(Debug, Clone, Default)]
pub struct TrafficStats {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicU64,
    client_errors: AtomicU64,
    server_errors: AtomicU64,
}

/// Point-in-time copy of the counters, the `/health/stats` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSnapshot {
    pub requests: u64,
    pub client_errors: u64,
    pub server_errors: u64,
}

impl TrafficStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished request by its response status.
    pub fn record(&self, status: StatusCode) {
        self.inner.requests.fetch_add(1, Ordering::Relaxed);
        if status.is_client_error() {
            self.inner.client_errors.fetch_add(1, Ordering::Relaxed);
        } else if status.is_server_error() {
            self.inner.server_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> TrafficSnapshot {
        TrafficSnapshot {
            requests: self.inner.requests.load(Ordering::Relaxed),
            client_errors: self.inner.client_errors.load(Ordering::Relaxed),
            server_errors: self.inner.server_errors.load(Ordering::Relaxed),
        }
    }
}

/// Middleware that records every response passing through the API router.
pub async fn track_traffic(request: Request, next: Next) -> Response {
    let stats = request.extensions().get::<TrafficStats>().cloned();

    let response = next.run(request).await;

    if let Some(stats) = stats {
        stats.record(response.status());
    }

    response
}

/// GET /health/stats — Return the current traffic counters.
pub async fn stats_handler(Extension(stats): Extension<TrafficStats>) -> Json<TrafficSnapshot> {
    Json(stats.snapshot())
}
