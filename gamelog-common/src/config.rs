//! Configuration loading for the ingestion pipeline
//!
//! Three line-oriented text files drive a run:
//! - the source list (one JSON endpoint per line),
//! - the genre side table (`name%genre` lines),
//! - the database config (first line is the connection URL).
//!
//! All parsing happens up front, before any network or database I/O, so a
//! malformed line aborts the run without side effects.

use crate::{Error, Result};
use std::path::Path;

/// One configured JSON endpoint: where to fetch, how to reach the target
/// array inside the document, and which fields to pull from each element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub url: String,
    /// Object-field names descended one level at a time
    pub path_steps: Vec<String>,
    /// Field keys extracted from each array element; length = record arity
    pub field_keys: Vec<String>,
}

impl SourceDescriptor {
    /// Parse one source-list line:
    /// `<url> <dash-separated path steps> <comma-separated field keys>`
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            return Err(Error::Config(format!(
                "source line must have 3 space-separated fields (url, path, keys), got {}: '{}'",
                parts.len(),
                line
            )));
        }

        let path_steps: Vec<String> = parts[1].split('-').map(str::to_string).collect();
        let field_keys: Vec<String> = parts[2].split(',').map(str::to_string).collect();

        if field_keys.iter().any(|k| k.is_empty()) {
            return Err(Error::Config(format!(
                "source line has an empty field key: '{}'",
                line
            )));
        }

        Ok(Self {
            url: parts[0].to_string(),
            path_steps,
            field_keys,
        })
    }
}

/// Load and validate the source list. An empty list is a config error:
/// a run with nothing to fetch is a misconfiguration, not a no-op.
pub fn load_source_list(path: &Path) -> Result<Vec<SourceDescriptor>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("cannot read source list {}: {}", path.display(), e))
    })?;

    let sources = contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(SourceDescriptor::parse)
        .collect::<Result<Vec<_>>>()?;

    if sources.is_empty() {
        return Err(Error::Config(format!(
            "source list {} contains no sources",
            path.display()
        )));
    }
    Ok(sources)
}

/// Load the genre side table as ordered `(name, genre)` pairs.
///
/// Each non-empty line must contain exactly one `%` separator; zero or
/// multiple is a fatal format error. File order is preserved because the
/// resolver's first-occurrence-wins rule depends on it.
pub fn load_genre_table(path: &Path) -> Result<Vec<(String, String)>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("cannot read genre table {}: {}", path.display(), e))
    })?;

    let mut pairs = Vec::new();
    for line in contents.lines().filter(|line| !line.trim().is_empty()) {
        let separators = line.matches('%').count();
        if separators != 1 {
            return Err(Error::Config(format!(
                "genre line must contain exactly one '%', found {}: '{}'",
                separators, line
            )));
        }
        let (name, genre) = line.split_once('%').expect("counted one separator");
        pairs.push((name.to_string(), genre.to_string()));
    }
    Ok(pairs)
}

/// Database connection config: the first non-empty line is the URL.
/// Credentials, if the URL scheme needs any, come from the credential
/// provider capability, not from this file.
pub fn load_db_url(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("cannot read database config {}: {}", path.display(), e))
    })?;

    contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            Error::Config(format!(
                "database config {} has no connection URL",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_parse_source_line() {
        let descriptor = SourceDescriptor::parse(
            "https://api.example.com/v1/profile response-games name,playtime_forever,rtime_last_played",
        )
        .expect("valid line");

        assert_eq!(descriptor.url, "https://api.example.com/v1/profile");
        assert_eq!(descriptor.path_steps, vec!["response", "games"]);
        assert_eq!(
            descriptor.field_keys,
            vec!["name", "playtime_forever", "rtime_last_played"]
        );
    }

    #[test]
    fn test_parse_source_line_single_step() {
        let descriptor =
            SourceDescriptor::parse("https://example.com games name,minutes,last").expect("valid");
        assert_eq!(descriptor.path_steps, vec!["games"]);
    }

    #[test]
    fn test_parse_source_line_wrong_field_count() {
        assert!(SourceDescriptor::parse("https://example.com games").is_err());
        assert!(SourceDescriptor::parse("https://example.com a b c d").is_err());
        assert!(SourceDescriptor::parse("").is_err());
    }

    #[test]
    fn test_load_source_list_skips_blank_lines() {
        let file = temp_file("https://a.example games name,mp,lp\n\nhttps://b.example data-games name,mp,lp\n");
        let sources = load_source_list(file.path()).expect("valid list");
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1].path_steps, vec!["data", "games"]);
    }

    #[test]
    fn test_load_source_list_empty_is_error() {
        let file = temp_file("\n\n");
        assert!(load_source_list(file.path()).is_err());
    }

    #[test]
    fn test_load_genre_table() {
        let file = temp_file("Half-Life%FPS\nStardew Valley%Farming\n");
        let pairs = load_genre_table(file.path()).expect("valid table");
        assert_eq!(
            pairs,
            vec![
                ("Half-Life".to_string(), "FPS".to_string()),
                ("Stardew Valley".to_string(), "Farming".to_string()),
            ]
        );
    }

    #[test]
    fn test_load_genre_table_missing_separator() {
        let file = temp_file("Half-Life FPS\n");
        let result = load_genre_table(file.path());
        assert!(result.is_err(), "Line without '%' must be fatal");
    }

    #[test]
    fn test_load_genre_table_double_separator() {
        let file = temp_file("Half%Life%FPS\n");
        assert!(load_genre_table(file.path()).is_err());
    }

    #[test]
    fn test_load_db_url_first_nonempty_line() {
        let file = temp_file("\nsqlite://gamelog.db\nignored-second-line\n");
        let url = load_db_url(file.path()).expect("valid config");
        assert_eq!(url, "sqlite://gamelog.db");
    }

    #[test]
    fn test_load_db_url_empty_file() {
        let file = temp_file("");
        assert!(load_db_url(file.path()).is_err());
    }
}
