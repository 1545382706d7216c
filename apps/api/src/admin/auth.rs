//! Admin session gate.
//!
//! A single shared password. Logging in sets an `admin_token` cookie whose value
//! is `hex(HMAC-SHA256(password, ADMIN_TOKEN_LABEL))`, so the token is stable
//! across restarts without being persisted. Every comparison is constant-time
//! over 64-char hex digests.

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

pub const ADMIN_COOKIE: &str = "admin_token";
const ADMIN_TOKEN_LABEL: &[u8] = b"wrapped-admin";
const SESSION_MAX_AGE_SECS: u64 = 86_400;

#[derive(Clone)]
pub struct AdminAuth {
    token: String,
}

impl AdminAuth {
    pub fn new(password: &str) -> Self {
        Self {
            token: derive_token(password),
        }
    }

    /// Hashing the candidate first makes both sides 32-byte digests, so the
    /// comparison neither short-circuits on a prefix nor leaks the password length.
    pub fn verify_password(&self, candidate: &str) -> bool {
        ct_eq(&derive_token(candidate), &self.token)
    }

    pub fn verify_token(&self, presented: &str) -> bool {
        ct_eq(presented, &self.token)
    }

    pub fn session_cookie(&self) -> String {
        format!(
            "{ADMIN_COOKIE}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={SESSION_MAX_AGE_SECS}",
            self.token
        )
    }
}

pub fn cleared_cookie() -> String {
    format!("{ADMIN_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
}

fn derive_token(password: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(password.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(ADMIN_TOKEN_LABEL);
    hex::encode(mac.finalize().into_bytes())
}

fn ct_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Returns the value of the named cookie across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Middleware for `/admin/api/*`: rejects requests without a valid session cookie.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorized = cookie_value(request.headers(), ADMIN_COOKIE)
        .map(|token| state.admin.verify_token(token))
        .unwrap_or(false);

    if !authorized {
        tracing::debug!("missing or invalid admin cookie");
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    Ok(next.run(request).await)
}
