use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use super::queries::impl_wrapped_store;

// created_at is bound from the application as RFC 3339 text; the default only
// covers rows inserted by hand.
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
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
    "#,
    "CREATE INDEX IF NOT EXISTS wrappeds_listing_idx ON wrappeds (is_sample DESC, created_at DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS prompt_events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        include_share BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS seed_tombstones (
        id TEXT PRIMARY KEY,
        deleted_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
    "#,
];

/// Embedded backend over a SQLite file (or `sqlite::memory:` in tests).
pub struct SqliteWrappedStore {
    pool: SqlitePool,
}

impl SqliteWrappedStore {
    /// Opens (creating if missing) the database file and bootstraps the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        info!("Opening SQLite database {database_url}");

        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid SQLite URL '{database_url}'"))?
            .create_if_missing(true);

        // Every connection to an in-memory database sees its own empty database,
        // so keep exactly one alive for the lifetime of the pool.
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        info!("SQLite database ready");
        Ok(Self { pool })
    }
}

impl_wrapped_store!(SqliteWrappedStore, "sqlite");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::wrapped::{NewWrapped, SampleWrapped, DEFAULT_EMOJI};
    use crate::store::WrappedStore;

    async fn store() -> SqliteWrappedStore {
        SqliteWrappedStore::connect("sqlite::memory:").await.unwrap()
    }

    fn submission(names: &str, html: &str, is_public: bool) -> NewWrapped {
        NewWrapped {
            names: names.to_string(),
            date_range: "Jan 2025".to_string(),
            emoji: DEFAULT_EMOJI.to_string(),
            gradient: None,
            html_content: html.to_string(),
            is_public,
        }
    }

    const SAMPLE: SampleWrapped = SampleWrapped {
        id: "alex-jordan",
        names: "Alex & Jordan",
        date_range: "Jun 2024 – Feb 2025",
        emoji: "🔥",
        gradient: "linear-gradient(135deg, #7c4dff, #1a1040)",
        static_path: "/wrappeds/alex-jordan.html",
    };

    // created_at has sub-millisecond precision but two inserts can still tie.
    async fn tick() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips_content() {
        let store = store().await;
        let id = store
            .create_wrapped(&submission("A & B", "<h1>x</h1>", true))
            .await
            .unwrap();

        assert_eq!(id.len(), 8);
        let row = store.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(row.names, "A & B");
        assert_eq!(row.html_content.as_deref(), Some("<h1>x</h1>"));
        assert_eq!(row.static_path, None);
        assert!(!row.is_sample);
        assert!(row.is_public);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let store = store().await;
        assert!(store.get_by_id("deadbeef").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_public_filters_and_orders() {
        let store = store().await;
        let older = store
            .create_wrapped(&submission("Older", "<p>1</p>", true))
            .await
            .unwrap();
        tick().await;
        let hidden = store
            .create_wrapped(&submission("Hidden", "<p>2</p>", false))
            .await
            .unwrap();
        tick().await;
        let newer = store
            .create_wrapped(&submission("Newer", "<p>3</p>", true))
            .await
            .unwrap();
        tick().await;
        store.upsert_seed(&SAMPLE).await.unwrap();

        let ids: Vec<String> = store
            .list_public()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();

        assert_eq!(ids, vec![SAMPLE.id.to_string(), newer, older]);
        assert!(!ids.contains(&hidden));
    }

    #[tokio::test]
    async fn test_toggled_private_leaves_public_list() {
        let store = store().await;
        let id = store
            .create_wrapped(&submission("A", "<p>a</p>", true))
            .await
            .unwrap();
        store.upsert_seed(&SAMPLE).await.unwrap();

        assert!(store.set_visibility(&id, false).await.unwrap());
        assert!(store.set_visibility(SAMPLE.id, false).await.unwrap());
        assert!(store.list_public().await.unwrap().is_empty());

        assert!(store.set_visibility(&id, true).await.unwrap());
        let listed = store.list_public().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent_and_never_overwrites() {
        let store = store().await;
        assert!(store.upsert_seed(&SAMPLE).await.unwrap());
        assert!(!store.upsert_seed(&SAMPLE).await.unwrap());

        store.set_visibility(SAMPLE.id, false).await.unwrap();
        let renamed = SampleWrapped {
            names: "Someone Else",
            ..SAMPLE
        };
        assert!(!store.upsert_seed(&renamed).await.unwrap());

        let row = store.get_by_id(SAMPLE.id).await.unwrap().unwrap();
        assert_eq!(row.names, "Alex & Jordan");
        assert!(!row.is_public);
        assert!(row.is_sample);
        assert_eq!(store.stats().await.unwrap().total_wrappeds, 1);
    }

    #[tokio::test]
    async fn test_deleted_sample_is_not_resurrected() {
        let store = store().await;
        store.upsert_seed(&SAMPLE).await.unwrap();

        assert!(store.delete(SAMPLE.id).await.unwrap());
        assert!(!store.upsert_seed(&SAMPLE).await.unwrap());
        assert!(store.get_by_id(SAMPLE.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_rows_alone() {
        let store = store().await;
        store
            .create_wrapped(&submission("A", "<p>a</p>", true))
            .await
            .unwrap();

        assert!(!store.delete("00000000").await.unwrap());
        assert!(!store.set_visibility("00000000", false).await.unwrap());
        assert_eq!(store.stats().await.unwrap().total_wrappeds, 1);
    }

    #[tokio::test]
    async fn test_list_all_reports_content_size() {
        let store = store().await;
        let id = store
            .create_wrapped(&submission("A", "héllo", false))
            .await
            .unwrap();
        store.upsert_seed(&SAMPLE).await.unwrap();

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, SAMPLE.id);
        assert_eq!(rows[0].content_size, None);
        assert_eq!(rows[1].id, id);
        assert_eq!(rows[1].content_size, Some(5));
        assert!(!rows[1].is_public);
    }

    #[tokio::test]
    async fn test_stats_count_prompt_events() {
        let store = store().await;
        store.record_prompt_event(true).await.unwrap();
        store.record_prompt_event(false).await.unwrap();
        store.record_prompt_event(true).await.unwrap();
        store
            .create_wrapped(&submission("A", "<p>a</p>", false))
            .await
            .unwrap();
        store.upsert_seed(&SAMPLE).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_wrappeds, 2);
        assert_eq!(stats.public_wrappeds, 1);
        assert_eq!(stats.sample_wrappeds, 1);
        assert_eq!(stats.prompt_events, 3);
        assert_eq!(stats.prompt_events_with_share, 2);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("wrappeds.db").display());

        let store = SqliteWrappedStore::connect(&url).await.unwrap();
        let id = store
            .create_wrapped(&submission("A", "<p>kept</p>", true))
            .await
            .unwrap();
        store.close().await;

        let reopened = SqliteWrappedStore::connect(&url).await.unwrap();
        let row = reopened.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(row.html_content.as_deref(), Some("<p>kept</p>"));
    }
}
