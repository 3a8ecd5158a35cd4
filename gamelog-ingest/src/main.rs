//! gamelog-ingest - per-title usage ingestion and reporting
//!
//! One-shot batch run: load and validate configuration, fetch the
//! configured JSON sources, normalize the extracted records, upsert them
//! into the relational store, and write the merged top-genres/top-titles
//! report. Any failure terminates the process non-zero with a single
//! diagnostic; the run is meant to be re-invoked externally.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;

use gamelog_common::config;
use gamelog_ingest::credentials::{
    apply_credentials, ConsoleCredentials, CredentialProvider, NoCredentials,
};
use gamelog_ingest::fetch::{HttpFetcher, SourceCache};
use gamelog_ingest::{db, genres, pipeline, report};

/// Command-line arguments for gamelog-ingest
#[derive(Parser, Debug)]
#[command(name = "gamelog-ingest")]
#[command(about = "Ingest per-title usage records and report top genres and titles")]
#[command(version)]
struct Args {
    /// Source list file: one `<url> <path-steps> <field,keys>` line per endpoint
    #[arg(long, default_value = "urls.txt", env = "GAMELOG_SOURCES")]
    sources: PathBuf,

    /// Genre side table: `name%genre` lines
    #[arg(long, default_value = "game_genres.txt", env = "GAMELOG_GENRES")]
    genres: PathBuf,

    /// Database config: first line is the connection URL
    #[arg(long, default_value = "config.txt", env = "GAMELOG_DB_CONFIG")]
    db_config: PathBuf,

    /// Output artifact path, overwritten on every run
    #[arg(long, default_value = "result.json", env = "GAMELOG_OUTPUT")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting gamelog-ingest v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // All three config files are parsed and validated up front, so a
    // malformed line aborts before any network or database I/O.
    let sources = config::load_source_list(&args.sources).context("Loading source list")?;
    let genre_table = config::load_genre_table(&args.genres).context("Loading genre side table")?;
    let db_url = config::load_db_url(&args.db_config).context("Loading database config")?;
    info!(sources = sources.len(), "Configuration loaded");

    let mut cache = SourceCache::new(HttpFetcher::new()?);
    let now_epoch = Utc::now().timestamp();
    let records = pipeline::run(&mut cache, &sources, now_epoch)
        .await
        .context("Collecting records")?;

    let genre_index = genres::resolve(&records, &genre_table);

    // SQLite needs no credentials; other schemes prompt on the console.
    let provider: Box<dyn CredentialProvider> = if db_url.starts_with("sqlite") {
        Box::new(NoCredentials)
    } else {
        Box::new(ConsoleCredentials)
    };
    let db_url = apply_credentials(&db_url, provider.as_ref())?;

    let pool = db::connect(&db_url).await.context("Connecting to database")?;
    db::ensure_schema(&pool).await.context("Ensuring schema")?;

    for record in &records {
        let genre = genres::genre_or_unknown(&genre_index, &record.name);
        db::upsert_game(&pool, record, &genre)
            .await
            .with_context(|| format!("Upserting '{}'", record.name))?;
    }
    info!(count = records.len(), "Records persisted");

    let merged = report::build_report(&pool).await.context("Running aggregate queries")?;
    report::write_report(&merged, &args.output).context("Writing report")?;

    Ok(())
}
