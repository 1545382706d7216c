//! Statements shared by both backends. Only `$N` placeholders and syntax
//! understood by both PostgreSQL and SQLite (>= 3.35) appear here; schema DDL
//! lives with each backend.

pub const INSERT_WRAPPED: &str = r#"
    INSERT INTO wrappeds
        (id, names, date_range, emoji, gradient, html_content, is_sample, is_public, created_at)
    VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8)
"#;

pub const SELECT_BY_ID: &str = r#"
    SELECT id, names, date_range, emoji, gradient, html_content, static_path,
           is_sample, is_public, created_at
    FROM wrappeds
    WHERE id = $1
"#;

pub const SELECT_PUBLIC: &str = r#"
    SELECT id, names, date_range, emoji, gradient, is_sample, created_at
    FROM wrappeds
    WHERE is_public
    ORDER BY is_sample DESC, created_at DESC
"#;

pub const SELECT_ALL_ADMIN: &str = r#"
    SELECT id, names, date_range, emoji, gradient, static_path, is_sample, is_public,
           created_at, CAST(LENGTH(html_content) AS BIGINT) AS content_size
    FROM wrappeds
    ORDER BY is_sample DESC, created_at DESC
"#;

// SQLite needs the WHERE clause on INSERT ... SELECT for the upsert clause to parse.
pub const INSERT_SAMPLE: &str = r#"
    INSERT INTO wrappeds
        (id, names, date_range, emoji, gradient, static_path, is_sample, is_public, created_at)
    SELECT $1, $2, $3, $4, $5, $6, TRUE, TRUE, $7
    WHERE NOT EXISTS (SELECT 1 FROM seed_tombstones WHERE id = $8)
    ON CONFLICT (id) DO NOTHING
"#;

pub const UPDATE_VISIBILITY: &str = "UPDATE wrappeds SET is_public = $1 WHERE id = $2";

pub const DELETE_RETURNING_SAMPLE: &str = "DELETE FROM wrappeds WHERE id = $1 RETURNING is_sample";

pub const INSERT_TOMBSTONE: &str = r#"
    INSERT INTO seed_tombstones (id, deleted_at)
    VALUES ($1, $2)
    ON CONFLICT (id) DO NOTHING
"#;

pub const INSERT_PROMPT_EVENT: &str =
    "INSERT INTO prompt_events (include_share, created_at) VALUES ($1, $2)";

pub const SELECT_STATS: &str = r#"
    SELECT
        (SELECT COUNT(*) FROM wrappeds) AS total_wrappeds,
        (SELECT COUNT(*) FROM wrappeds WHERE is_public) AS public_wrappeds,
        (SELECT COUNT(*) FROM wrappeds WHERE is_sample) AS sample_wrappeds,
        (SELECT COUNT(*) FROM prompt_events) AS prompt_events,
        (SELECT COUNT(*) FROM prompt_events WHERE include_share) AS prompt_events_with_share
"#;

/// Implements `WrappedStore` for a struct with a `pool` field of any sqlx pool
/// type. Both backends run the same statements, so the body is shared.
macro_rules! impl_wrapped_store {
    ($store:ty, $backend:literal) => {
        #[async_trait::async_trait]
        impl $crate::store::WrappedStore for $store {
            fn backend(&self) -> &'static str {
                $backend
            }

            async fn create_wrapped(
                &self,
                new: &$crate::models::wrapped::NewWrapped,
            ) -> Result<String, sqlx::Error> {
                let id = $crate::store::generate_id();
                sqlx::query($crate::store::queries::INSERT_WRAPPED)
                    .bind(&id)
                    .bind(&new.names)
                    .bind(&new.date_range)
                    .bind(&new.emoji)
                    .bind(&new.gradient)
                    .bind(&new.html_content)
                    .bind(new.is_public)
                    .bind(chrono::Utc::now())
                    .execute(&self.pool)
                    .await?;
                tracing::info!("Created wrapped {id} (public: {})", new.is_public);
                Ok(id)
            }

            async fn get_by_id(
                &self,
                id: &str,
            ) -> Result<Option<$crate::models::wrapped::WrappedRow>, sqlx::Error> {
                sqlx::query_as::<_, $crate::models::wrapped::WrappedRow>(
                    $crate::store::queries::SELECT_BY_ID,
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await
            }

            async fn list_public(
                &self,
            ) -> Result<Vec<$crate::models::wrapped::WrappedSummary>, sqlx::Error> {
                sqlx::query_as::<_, $crate::models::wrapped::WrappedSummary>(
                    $crate::store::queries::SELECT_PUBLIC,
                )
                .fetch_all(&self.pool)
                .await
            }

            async fn upsert_seed(
                &self,
                sample: &$crate::models::wrapped::SampleWrapped,
            ) -> Result<bool, sqlx::Error> {
                let result = sqlx::query($crate::store::queries::INSERT_SAMPLE)
                    .bind(sample.id)
                    .bind(sample.names)
                    .bind(sample.date_range)
                    .bind(sample.emoji)
                    .bind(sample.gradient)
                    .bind(sample.static_path)
                    .bind(chrono::Utc::now())
                    .bind(sample.id)
                    .execute(&self.pool)
                    .await?;
                Ok(result.rows_affected() > 0)
            }

            async fn list_all(
                &self,
            ) -> Result<Vec<$crate::models::wrapped::AdminWrappedRow>, sqlx::Error> {
                sqlx::query_as::<_, $crate::models::wrapped::AdminWrappedRow>(
                    $crate::store::queries::SELECT_ALL_ADMIN,
                )
                .fetch_all(&self.pool)
                .await
            }

            async fn set_visibility(&self, id: &str, is_public: bool) -> Result<bool, sqlx::Error> {
                let result = sqlx::query($crate::store::queries::UPDATE_VISIBILITY)
                    .bind(is_public)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
                Ok(result.rows_affected() > 0)
            }

            async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
                let mut tx = self.pool.begin().await?;
                let deleted: Option<bool> =
                    sqlx::query_scalar($crate::store::queries::DELETE_RETURNING_SAMPLE)
                        .bind(id)
                        .fetch_optional(&mut *tx)
                        .await?;

                let Some(was_sample) = deleted else {
                    return Ok(false);
                };

                if was_sample {
                    sqlx::query($crate::store::queries::INSERT_TOMBSTONE)
                        .bind(id)
                        .bind(chrono::Utc::now())
                        .execute(&mut *tx)
                        .await?;
                }
                tx.commit().await?;

                tracing::info!("Deleted wrapped {id} (sample: {was_sample})");
                Ok(true)
            }

            async fn record_prompt_event(&self, include_share: bool) -> Result<(), sqlx::Error> {
                sqlx::query($crate::store::queries::INSERT_PROMPT_EVENT)
                    .bind(include_share)
                    .bind(chrono::Utc::now())
                    .execute(&self.pool)
                    .await?;
                Ok(())
            }

            async fn stats(&self) -> Result<$crate::models::stats::StoreStats, sqlx::Error> {
                sqlx::query_as::<_, $crate::models::stats::StoreStats>(
                    $crate::store::queries::SELECT_STATS,
                )
                .fetch_one(&self.pool)
                .await
            }

            async fn ping(&self) -> Result<(), sqlx::Error> {
                sqlx::query("SELECT 1").execute(&self.pool).await?;
                Ok(())
            }

            async fn close(&self) {
                self.pool.close().await;
            }
        }
    };
}

pub(crate) use impl_wrapped_store;
