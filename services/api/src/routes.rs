use crate::dashboard::{DashboardPayload, DashboardSourceKind};
use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use call_dashboard::error::AppError;
use call_dashboard::workflows::calls::{CallLogImporter, CallReport};
use serde::Deserialize;
use serde_json::json;
use std::io::{self, Cursor};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardReportRequest {
    pub(crate) csv: String,
}

pub(crate) fn dashboard_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/dashboard", get(dashboard_endpoint))
        .route("/api/v1/dashboard/report", post(dashboard_report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn dashboard_endpoint(Extension(state): Extension<AppState>) -> Response {
    let source = state.dashboard.clone();
    // File stat, read and the session lock all block.
    let loaded = tokio::task::spawn_blocking(move || source.summary()).await;

    let source = &state.dashboard;
    match loaded {
        Ok(Ok(summary)) => Json(DashboardPayload {
            source: DashboardSourceKind::File,
            summary,
            automations: source.playbook(),
        })
        .into_response(),
        Ok(Err(err)) => {
            warn!(path = %source.data_path().display(), error = %err, "dashboard source unavailable");
            AppError::from(err).into_response()
        }
        Err(err) => {
            warn!(error = %err, "dashboard load task failed");
            AppError::from(io::Error::other(err)).into_response()
        }
    }
}

pub(crate) async fn dashboard_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DashboardReportRequest>,
) -> Result<Response, AppError> {
    let records = CallLogImporter::from_reader(Cursor::new(payload.csv.into_bytes()))?;
    info!(records = records.len(), "summarizing uploaded call log");
    let summary = CallReport::from_records(&records).summary();

    Ok(Json(DashboardPayload {
        source: DashboardSourceKind::Upload,
        summary,
        automations: state.dashboard.playbook(),
    })
    .into_response())
}
