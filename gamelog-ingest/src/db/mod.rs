//! Persistence layer: connection, schema, idempotent upserts
//!
//! One table keyed by title name. Each record is written with a single
//! insert-or-update statement, so re-running the pipeline over the same
//! sources converges to the same rows. No batching and no cross-record
//! transaction: record counts are small and each upsert is its own unit.

use gamelog_common::{GameRecord, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Connect to the store. The URL comes verbatim from the database config
/// (credentials already applied); file-backed SQLite URLs should carry
/// `?mode=rwc` so a first run creates the database.
pub async fn connect(url: &str) -> Result<SqlitePool> {
    let pool = SqlitePool::connect(url).await?;
    info!("Connected to database");
    Ok(pool)
}

/// Create the games table if it does not exist yet
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            name TEXT PRIMARY KEY,
            minutes_played TEXT NOT NULL,
            last_played_hours TEXT NOT NULL,
            genres TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Upsert one record with its resolved genre.
///
/// Idempotent by construction: a conflicting name overwrites all non-key
/// columns, so the same tuple twice leaves exactly one row.
pub async fn upsert_game(pool: &SqlitePool, record: &GameRecord, genre: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO games (name, minutes_played, last_played_hours, genres)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(name) DO UPDATE SET
            minutes_played = excluded.minutes_played,
            last_played_hours = excluded.last_played_hours,
            genres = excluded.genres
        "#,
    )
    .bind(&record.name)
    .bind(&record.minutes_played)
    .bind(&record.last_played)
    .bind(genre)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    async fn setup_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        ensure_schema(&pool).await.expect("Failed to create schema");
        pool
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let pool = setup_pool().await;
        let record = GameRecord::new("Half-Life".into(), "120".into(), "2.00".into());

        upsert_game(&pool, &record, "FPS").await.expect("first upsert");
        upsert_game(&pool, &record, "FPS").await.expect("second upsert");

        let rows = sqlx::query("SELECT name, minutes_played, last_played_hours, genres FROM games")
            .fetch_all(&pool)
            .await
            .expect("select");

        assert_eq!(rows.len(), 1, "Same tuple twice must leave one row");
        assert_eq!(rows[0].get::<String, _>("genres"), "FPS");
    }

    #[tokio::test]
    async fn test_upsert_overwrites_non_key_columns() {
        let pool = setup_pool().await;

        let old = GameRecord::new("Portal".into(), "45".into(), "1.50".into());
        upsert_game(&pool, &old, "Unknown").await.unwrap();

        let new = GameRecord::new("Portal".into(), "90".into(), "0.25".into());
        upsert_game(&pool, &new, "Puzzle").await.unwrap();

        let row = sqlx::query("SELECT minutes_played, last_played_hours, genres FROM games WHERE name = ?")
            .bind("Portal")
            .fetch_one(&pool)
            .await
            .expect("select");

        assert_eq!(row.get::<String, _>("minutes_played"), "90");
        assert_eq!(row.get::<String, _>("last_played_hours"), "0.25");
        assert_eq!(row.get::<String, _>("genres"), "Puzzle");
    }
}
