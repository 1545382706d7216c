//! Persistence for wrappeds, prompt events and seed tombstones.
//!
//! Two backends share one schema and one set of statements:
//! `PgWrappedStore` (networked) and `SqliteWrappedStore` (embedded, file-backed).
//! `AppState` holds an `Arc<dyn WrappedStore>` chosen at startup from `DATABASE_URL`.

pub mod postgres;
mod queries;
pub mod sqlite;

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use rand::Rng;

use crate::models::stats::StoreStats;
use crate::models::wrapped::{AdminWrappedRow, NewWrapped, SampleWrapped, WrappedRow, WrappedSummary};

pub use postgres::PgWrappedStore;
pub use sqlite::SqliteWrappedStore;

/// Every method is a single auto-committing statement, except `delete`,
/// which also writes a seed tombstone when the deleted row is a sample.
#[async_trait]
pub trait WrappedStore: Send + Sync {
    /// Short backend name for health output and logs.
    fn backend(&self) -> &'static str;

    /// Inserts a user submission under a freshly generated id and returns it.
    async fn create_wrapped(&self, new: &NewWrapped) -> Result<String, sqlx::Error>;

    async fn get_by_id(&self, id: &str) -> Result<Option<WrappedRow>, sqlx::Error>;

    /// Public rows only; samples first, then newest first.
    async fn list_public(&self) -> Result<Vec<WrappedSummary>, sqlx::Error>;

    /// Insert-or-ignore keyed by id. Never overwrites, never re-inserts a
    /// tombstoned sample. Returns whether a row was written.
    async fn upsert_seed(&self, sample: &SampleWrapped) -> Result<bool, sqlx::Error>;

    /// Every row, private ones included, with content size in place of content.
    async fn list_all(&self) -> Result<Vec<AdminWrappedRow>, sqlx::Error>;

    /// Returns false when no row has this id.
    async fn set_visibility(&self, id: &str, is_public: bool) -> Result<bool, sqlx::Error>;

    /// Returns false when no row has this id.
    async fn delete(&self, id: &str) -> Result<bool, sqlx::Error>;

    async fn record_prompt_event(&self, include_share: bool) -> Result<(), sqlx::Error>;

    async fn stats(&self) -> Result<StoreStats, sqlx::Error>;

    async fn ping(&self) -> Result<(), sqlx::Error>;

    /// Closes the underlying pool. Further calls fail with `PoolClosed`.
    async fn close(&self);
}

/// 4 random bytes, hex encoded: 8 lowercase hex characters.
pub fn generate_id() -> String {
    let bytes: [u8; 4] = rand::thread_rng().gen();
    hex::encode(bytes)
}

/// Opens the backend selected by the URL scheme and bootstraps its schema.
pub async fn connect(database_url: &str) -> Result<Arc<dyn WrappedStore>> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok(Arc::new(PgWrappedStore::connect(database_url).await?))
    } else if database_url.starts_with("sqlite:") {
        Ok(Arc::new(SqliteWrappedStore::connect(database_url).await?))
    } else {
        bail!("Unsupported DATABASE_URL scheme (expected postgres:// or sqlite:)")
    }
}

#[cfg(test)]
pub async fn memory_store() -> Arc<dyn WrappedStore> {
    Arc::new(
        SqliteWrappedStore::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite store"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_eight_lowercase_hex() {
        for _ in 0..100 {
            let id = generate_id();
            assert_eq!(id.len(), 8, "id was {id}");
            assert!(id
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let err = connect("mysql://localhost/wrappeds").await.err().unwrap();
        assert!(err.to_string().contains("Unsupported"));
    }

    #[tokio::test]
    async fn test_connect_sqlite_memory() {
        let store = connect("sqlite::memory:").await.unwrap();
        assert_eq!(store.backend(), "sqlite");
        store.ping().await.unwrap();
    }
}
