use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use super::queries::impl_wrapped_store;

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS wrappeds (
        id TEXT PRIMARY KEY,
        names TEXT NOT NULL,
        date_range TEXT NOT NULL,
        emoji TEXT NOT NULL DEFAULT '💕',
        gradient TEXT,
        html_content TEXT,
        static_path TEXT,
        is_sample BOOLEAN NOT NULL DEFAULT FALSE,
        is_public BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS wrappeds_listing_idx ON wrappeds (is_sample DESC, created_at DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS prompt_events (
        id BIGSERIAL PRIMARY KEY,
        include_share BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS seed_tombstones (
        id TEXT PRIMARY KEY,
        deleted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

/// Networked backend over a PostgreSQL connection pool.
pub struct PgWrappedStore {
    pool: PgPool,
}

impl PgWrappedStore {
    /// Creates the pool and bootstraps the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

impl_wrapped_store!(PgWrappedStore, "postgres");
