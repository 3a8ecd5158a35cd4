//! Aggregation report
//!
//! Two fixed grouped-sum queries over the persisted store (top 5 genres,
//! top 50 titles by total minutes played) merged into one insertion-ordered
//! map and written to the output artifact as a JSON object of string keys
//! to summed-minutes text.

use gamelog_common::Result;
use serde_json::{Map, Value};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::info;

/// The two aggregate queries, run in order. Both alias the grouping column
/// to `dimension` so row handling is uniform; `CAST` keeps the sum numeric
/// even though minutes are stored as text.
const AGGREGATE_QUERIES: [&str; 2] = [
    r#"
    SELECT SUM(CAST(minutes_played AS INTEGER)) AS minutes_played, genres AS dimension
    FROM games
    GROUP BY genres
    ORDER BY SUM(CAST(minutes_played AS INTEGER)) DESC
    LIMIT 5
    "#,
    r#"
    SELECT SUM(CAST(minutes_played AS INTEGER)) AS minutes_played, name AS dimension
    FROM games
    GROUP BY name
    ORDER BY SUM(CAST(minutes_played AS INTEGER)) DESC
    LIMIT 50
    "#,
];

/// Run both aggregate queries and merge their rows into one map.
///
/// Insertion order is the first query's rows then the second's; a title
/// name colliding with a genre string keeps the genre's position and takes
/// the title's value (last write wins on value, first on position).
pub async fn build_report(pool: &SqlitePool) -> Result<Map<String, Value>> {
    let mut merged = Map::new();

    for query in AGGREGATE_QUERIES {
        let rows = sqlx::query(query).fetch_all(pool).await?;
        for row in rows {
            let minutes: i64 = row.get("minutes_played");
            let dimension: String = row.get("dimension");
            merged.insert(dimension, Value::String(minutes.to_string()));
        }
    }

    info!(entries = merged.len(), "Aggregation report assembled");
    Ok(merged)
}

/// Serialize the merged map and write it to `path`, fully overwriting any
/// prior content. Serialization failure aborts before the file is touched.
pub fn write_report(report: &Map<String, Value>, path: &Path) -> Result<()> {
    let json = serde_json::to_string(&Value::Object(report.clone()))?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), "Report written");
    Ok(())
}
