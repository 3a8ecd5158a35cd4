//! # Gamelog Common Library
//!
//! Shared code for the gamelog pipeline:
//! - Error taxonomy and `Result` alias
//! - Configuration parsing (source list, genre side table, database config)
//! - The `GameRecord` model

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::GameRecord;
