//! # Gamelog Ingest
//!
//! Offline one-shot pipeline: fetch per-title usage records from configured
//! JSON endpoints, normalize them, upsert them into a relational store
//! keyed by title name, and write a merged top-genres/top-titles report as
//! a JSON artifact.
//!
//! Stages run strictly in sequence; any failure terminates the run. The
//! modules mirror the stages:
//! - [`fetch`] — HTTP capability behind a trait, with per-URL body caching
//! - [`json_path`] — path navigation and field extraction over parsed JSON
//! - [`pipeline`] — record assembly, time transform, never-played filter
//! - [`genres`] — side-table join from title name to genre
//! - [`db`] — schema, idempotent upserts, grouped-sum aggregate queries
//! - [`report`] — merged result map serialized to the output artifact
//! - [`credentials`] — injected username/password capability for the store

pub mod credentials;
pub mod db;
pub mod fetch;
pub mod genres;
pub mod json_path;
pub mod pipeline;
pub mod report;
