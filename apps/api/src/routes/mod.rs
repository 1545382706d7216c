pub mod health;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::admin::auth::require_admin;
use crate::admin::handlers as admin;
use crate::state::AppState;
use crate::wrappeds::handlers as wrappeds;

/// Room for a maximal `html_content` even when every character is escaped in JSON.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let admin_api = Router::new()
        .route("/check", get(admin::handle_check))
        .route("/wrappeds", get(admin::handle_list_all))
        .route(
            "/wrappeds/:id",
            patch(admin::handle_set_visibility).delete(admin::handle_delete),
        )
        .route("/stats", get(admin::handle_stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health::health_handler))
        // Public API
        .route(
            "/api/wrappeds",
            get(wrappeds::handle_list_public).post(wrappeds::handle_create),
        )
        .route("/api/prompt-events", post(wrappeds::handle_prompt_event))
        .route("/w/:id", get(wrappeds::handle_serve))
        // Admin session
        .route("/admin/login", post(admin::handle_login))
        .route("/admin/logout", post(admin::handle_logout))
        .nest("/admin/api", admin_api)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(answer_options))
        .layer(cors_layer())
        // CorsLayer only lists methods and headers on preflights
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PATCH, DELETE, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("content-type"),
        ))
        .with_state(state)
}

/// Browsers post generated wrappeds from arbitrary origins (including `file://`).
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

/// OPTIONS never reaches a handler. Preflights are answered by the CORS layer
/// first; anything else gets a bare 200 here.
async fn answer_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}
