use serde::Serialize;
use sqlx::FromRow;

/// Row counts reported on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct StoreStats {
    pub total_wrappeds: i64,
    pub public_wrappeds: i64,
    pub sample_wrappeds: i64,
    pub prompt_events: i64,
    pub prompt_events_with_share: i64,
}
