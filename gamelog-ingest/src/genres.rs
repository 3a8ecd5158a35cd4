//! Genre resolution: join the side table against the record set
//!
//! The side table arrives as ordered `(name, genre)` pairs (already
//! validated by the config loader). Resolution is a hash join on exact
//! title name, first occurrence wins; unmatched names stay absent and
//! fall back to "Unknown" at persistence time.

use gamelog_common::GameRecord;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Genre used when a title has no side-table entry
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Build the name→genre mapping for the given record set.
///
/// A pair contributes only if some record carries that exact name and no
/// mapping entry exists for it yet; later duplicate lines for the same
/// name are skipped silently.
pub fn resolve(records: &[GameRecord], pairs: &[(String, String)]) -> HashMap<String, String> {
    let names: HashSet<&str> = records.iter().map(|r| r.name.as_str()).collect();

    let mut genres = HashMap::new();
    for (name, genre) in pairs {
        if names.contains(name.as_str()) && !genres.contains_key(name) {
            genres.insert(name.clone(), genre.clone());
        }
    }
    debug!(
        resolved = genres.len(),
        records = records.len(),
        "Resolved genres"
    );
    genres
}

/// Look up a title's genre, trimming side-table whitespace and falling
/// back to [`UNKNOWN_GENRE`] for unmatched names.
pub fn genre_or_unknown(genres: &HashMap<String, String>, name: &str) -> String {
    genres
        .get(name)
        .map(|genre| genre.trim().to_string())
        .unwrap_or_else(|| UNKNOWN_GENRE.to_string())
}
