//! Health check handler

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use crate::services::ServiceFactory;

pub async fn health(State(services): State<ServiceFactory>) -> (StatusCode, Json<Value>) {
    let status = services.health_check().await;

    if status.is_healthy() {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "issues": status.get_issues() })),
        )
    }
}
