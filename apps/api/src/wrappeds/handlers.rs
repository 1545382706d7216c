use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::errors::AppError;
use crate::models::wrapped::{wrapped_url, WrappedSummary};
use crate::state::AppState;
use crate::wrappeds::content::{resolve_content, ResolvedContent};
use crate::wrappeds::validation::CreateWrappedRequest;

/// Client view of a public wrapped.
#[derive(Debug, Serialize)]
pub struct WrappedView {
    pub id: String,
    pub names: String,
    pub date_range: String,
    pub emoji: String,
    pub gradient: Option<String>,
    pub is_sample: bool,
    pub created_at: DateTime<Utc>,
    pub url: String,
}

impl From<WrappedSummary> for WrappedView {
    fn from(w: WrappedSummary) -> Self {
        let url = wrapped_url(&w.id);
        Self {
            id: w.id,
            names: w.names,
            date_range: w.date_range,
            emoji: w.emoji,
            gradient: w.gradient,
            is_sample: w.is_sample,
            created_at: w.created_at,
            url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateWrappedResponse {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PromptEventRequest {
    #[serde(default)]
    pub include_share: bool,
}

/// Errors of the HTML page route, answered in plain text rather than JSON.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Wrapped not found")]
    WrappedNotFound,

    #[error("Wrapped content not found")]
    ContentNotFound,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = match &self {
            PageError::WrappedNotFound | PageError::ContentNotFound => StatusCode::NOT_FOUND,
            PageError::Internal(e) => {
                tracing::error!("Error serving wrapped: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.to_string()).into_response()
    }
}

/// GET /api/wrappeds
pub async fn handle_list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<WrappedView>>, AppError> {
    let wrappeds = state.store.list_public().await?;
    Ok(Json(wrappeds.into_iter().map(WrappedView::from).collect()))
}

/// POST /api/wrappeds
pub async fn handle_create(
    State(state): State<AppState>,
    payload: Result<Json<CreateWrappedRequest>, JsonRejection>,
) -> Result<Json<CreateWrappedResponse>, AppError> {
    let Json(req) = payload?;
    let new = req.validate()?;
    let id = state.store.create_wrapped(&new).await?;
    let url = wrapped_url(&id);
    Ok(Json(CreateWrappedResponse { id, url }))
}

/// GET /w/:id
/// Static samples go through `ServeFile`, so content type, conditional and
/// range requests are handled there.
pub async fn handle_serve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Response, PageError> {
    let wrapped = state
        .store
        .get_by_id(&id)
        .await
        .map_err(|e| PageError::Internal(e.into()))?;

    match resolve_content(wrapped, &state.public_dir) {
        ResolvedContent::StaticFile(path) => {
            let response = match ServeFile::new(&path).oneshot(request).await {
                Ok(response) => response,
                Err(never) => match never {},
            };
            if response.status() == StatusCode::NOT_FOUND {
                tracing::warn!("Static file for wrapped {id} missing: {}", path.display());
                return Err(PageError::ContentNotFound);
            }
            Ok(response.map(Body::new))
        }
        ResolvedContent::Inline(html) => Ok(Html(html).into_response()),
        ResolvedContent::MissingContent => Err(PageError::ContentNotFound),
        ResolvedContent::MissingWrapped => Err(PageError::WrappedNotFound),
    }
}

/// POST /api/prompt-events
pub async fn handle_prompt_event(
    State(state): State<AppState>,
    payload: Result<Json<PromptEventRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(req) = payload?;
    state.store.record_prompt_event(req.include_share).await?;
    Ok(Json(json!({ "ok": true })))
}
