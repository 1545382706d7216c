use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and whether the store answers a trivial query.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, database) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!("Health check database ping failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let overall = if status.is_success() { "ok" } else { "degraded" };

    (
        status,
        Json(json!({
            "status": overall,
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "database": {
                "backend": state.store.backend(),
                "status": database
            }
        })),
    )
}
