use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

pub const DEFAULT_EMOJI: &str = "💕";

/// Full `wrappeds` row, including the HTML blob.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WrappedRow {
    pub id: String,
    pub names: String,
    pub date_range: String,
    pub emoji: String,
    pub gradient: Option<String>,
    pub html_content: Option<String>,
    pub static_path: Option<String>,
    pub is_sample: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Public listing projection: no content, no visibility flag.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WrappedSummary {
    pub id: String,
    pub names: String,
    pub date_range: String,
    pub emoji: String,
    pub gradient: Option<String>,
    pub is_sample: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin listing projection. `content_size` is the character length of
/// `html_content` (NULL for static samples) so the blob never leaves the store.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminWrappedRow {
    pub id: String,
    pub names: String,
    pub date_range: String,
    pub emoji: String,
    pub gradient: Option<String>,
    pub static_path: Option<String>,
    pub is_sample: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub content_size: Option<i64>,
}

/// A validated user submission. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWrapped {
    pub names: String,
    pub date_range: String,
    pub emoji: String,
    pub gradient: Option<String>,
    pub html_content: String,
    pub is_public: bool,
}

/// A seeded demonstration entry backed by a pre-rendered file under the public dir.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleWrapped {
    pub id: &'static str,
    pub names: &'static str,
    pub date_range: &'static str,
    pub emoji: &'static str,
    pub gradient: &'static str,
    pub static_path: &'static str,
}

/// Path a wrapped is served at.
pub fn wrapped_url(id: &str) -> String {
    format!("/w/{id}")
}
