use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header::SET_COOKIE,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::admin::auth::cleared_cookie;
use crate::errors::AppError;
use crate::models::stats::StoreStats;
use crate::models::wrapped::AdminWrappedRow;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct VisibilityUpdate {
    pub is_public: Option<bool>,
}

/// POST /admin/login
pub async fn handle_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("Password required".to_string()))?;

    if !state.admin.verify_password(&password) {
        warn!("Rejected admin login attempt");
        return Err(AppError::Unauthorized("Wrong password".to_string()));
    }

    info!("Admin logged in");
    Ok((
        [(SET_COOKIE, state.admin.session_cookie())],
        Json(json!({ "ok": true })),
    ))
}

/// POST /admin/logout
pub async fn handle_logout() -> impl IntoResponse {
    ([(SET_COOKIE, cleared_cookie())], Json(json!({ "ok": true })))
}

/// GET /admin/api/check
pub async fn handle_check() -> Json<Value> {
    Json(json!({ "authenticated": true }))
}

/// GET /admin/api/wrappeds
pub async fn handle_list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminWrappedRow>>, AppError> {
    Ok(Json(state.store.list_all().await?))
}

/// PATCH /admin/api/wrappeds/:id
pub async fn handle_set_visibility(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VisibilityUpdate>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    let is_public = req
        .is_public
        .ok_or_else(|| AppError::Validation("is_public is required".to_string()))?;

    if !state.store.set_visibility(&id, is_public).await? {
        return Err(AppError::NotFound(format!("Wrapped {id} not found")));
    }

    info!("Set wrapped {id} public={is_public}");
    Ok(Json(json!({ "ok": true })))
}

/// DELETE /admin/api/wrappeds/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if !state.store.delete(&id).await? {
        return Err(AppError::NotFound(format!("Wrapped {id} not found")));
    }
    Ok(Json(json!({ "ok": true })))
}

/// GET /admin/api/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<StoreStats>, AppError> {
    Ok(Json(state.store.stats().await?))
}
