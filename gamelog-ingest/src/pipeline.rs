//! Record assembly pipeline
//!
//! Drives the per-source sequence (cache-fetch → parse → navigate →
//! extract → materialize) and the post-collection transform (epoch to
//! hours, never-played filter). Stages run strictly in order and any
//! failure aborts the whole run; this is an offline one-shot pipeline,
//! not a resilient service.

use crate::fetch::{Fetcher, SourceCache};
use crate::json_path::{chunk_fields, extract, navigate};
use gamelog_common::config::SourceDescriptor;
use gamelog_common::{Error, GameRecord, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Record arity: every source must extract name, minutes played, and
/// last-played epoch, in that order.
const RECORD_ARITY: usize = 3;

/// Run the full pipeline: collect records from every source, then
/// transform last-played values and drop never-played titles.
///
/// `now_epoch` is the reference time in epoch seconds; it is a parameter
/// (rather than read inside) so the two-decimal hours output is testable
/// against a pinned clock.
pub async fn run<F: Fetcher>(
    cache: &mut SourceCache<F>,
    sources: &[SourceDescriptor],
    now_epoch: i64,
) -> Result<Vec<GameRecord>> {
    let mut records = collect_records(cache, sources).await?;
    transform_records(&mut records, now_epoch)?;
    Ok(records)
}

/// Fetch and extract every configured source into the record set.
///
/// Invariant: only the first source whose extraction yields values
/// populates the record set. Later sources are still fetched (and cached)
/// but their extracted values are discarded. True multi-source merging is
/// deliberately out of scope.
pub async fn collect_records<F: Fetcher>(
    cache: &mut SourceCache<F>,
    sources: &[SourceDescriptor],
) -> Result<Vec<GameRecord>> {
    // Arity is a config property; reject it before any fetch happens.
    for source in sources {
        if source.field_keys.len() != RECORD_ARITY {
            return Err(Error::Config(format!(
                "source {} must extract exactly {} fields (name, minutes played, last-played epoch), got {}",
                source.url,
                RECORD_ARITY,
                source.field_keys.len()
            )));
        }
    }

    let mut records: Vec<GameRecord> = Vec::new();
    for source in sources {
        let body = cache.get_or_fetch(&source.url).await?;
        let doc: Value = serde_json::from_str(body)?;

        let target = navigate(&doc, &source.path_steps);
        if !target.is_array() {
            warn!(
                url = %source.url,
                path = source.path_steps.join("-"),
                "Path did not resolve to an array; source yields no records"
            );
        }
        let flat = extract(target, &source.field_keys);

        if records.is_empty() {
            for chunk in chunk_fields(&flat, RECORD_ARITY)? {
                let mut fields = chunk.into_iter();
                records.push(GameRecord::new(
                    fields.next().expect("chunk has arity 3"),
                    fields.next().expect("chunk has arity 3"),
                    fields.next().expect("chunk has arity 3"),
                ));
            }
        } else if !flat.is_empty() {
            warn!(
                url = %source.url,
                discarded = flat.len(),
                "Record set already populated; discarding this source's values"
            );
        }
    }

    info!(count = records.len(), "Assembled record set");
    for record in &records {
        debug!(
            name = %record.name,
            minutes_played = %record.minutes_played,
            last_played = %record.last_played,
            "Record"
        );
    }
    Ok(records)
}

/// Transform and filter the record set in place:
/// - `minutes_played == "0"` becomes the never-played sentinel,
/// - everything else has its epoch rewritten to hours since played,
/// - never-played records are then removed.
pub fn transform_records(records: &mut Vec<GameRecord>, now_epoch: i64) -> Result<()> {
    for record in records.iter_mut() {
        if record.minutes_played == "0" {
            record.mark_never_played();
        } else {
            record.epoch_to_hours(now_epoch)?;
        }
    }

    let before = records.len();
    records.retain(|record| !record.is_never_played());
    debug!(
        kept = records.len(),
        dropped = before - records.len(),
        "Filtered never-played records"
    );
    Ok(())
}
