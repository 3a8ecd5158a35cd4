//! Game record model
//!
//! One normalized unit of usage data: a title name, total minutes played,
//! and a last-played value. `last_played` starts life as epoch-seconds text
//! straight out of the source JSON and is rewritten in place by the
//! pipeline's transform step, either to hours-since-played with two
//! decimals or to the [`NEVER_PLAYED`] sentinel.

use crate::{Error, Result};

/// Sentinel marking a title with zero minutes played
pub const NEVER_PLAYED: &str = "Never played";

/// One extracted usage record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub name: String,
    /// Numeric text as extracted from the source; "0" means never played
    pub minutes_played: String,
    /// Epoch-seconds text pre-transform; hours text or sentinel post-transform
    pub last_played: String,
}

impl GameRecord {
    /// Build a record from one arity-3 field chunk (name, minutes, epoch)
    pub fn new(name: String, minutes_played: String, last_played: String) -> Self {
        Self {
            name,
            minutes_played,
            last_played,
        }
    }

    /// True once the record carries the never-played sentinel
    pub fn is_never_played(&self) -> bool {
        self.last_played == NEVER_PLAYED
    }

    /// Replace the last-played value with the sentinel
    pub fn mark_never_played(&mut self) {
        self.last_played = NEVER_PLAYED.to_string();
    }

    /// Rewrite `last_played` from epoch seconds to hours since played,
    /// formatted to two decimals relative to `now_epoch`.
    ///
    /// A non-integer epoch value is a fatal data error: the source either
    /// changed shape or the field keys are misconfigured.
    pub fn epoch_to_hours(&mut self, now_epoch: i64) -> Result<()> {
        let epoch: i64 = self.last_played.trim().parse().map_err(|_| {
            Error::Config(format!(
                "record '{}' has non-numeric last-played epoch '{}'",
                self.name, self.last_played
            ))
        })?;
        let hours = (now_epoch - epoch) as f64 / 3600.0;
        self.last_played = format!("{:.2}", hours);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_to_hours_two_decimals() {
        let now = 1_700_000_000;
        let mut record = GameRecord::new(
            "Half-Life".into(),
            "120".into(),
            (now - 7200).to_string(),
        );
        record.epoch_to_hours(now).expect("valid epoch");
        assert_eq!(record.last_played, "2.00");
    }

    #[test]
    fn test_epoch_to_hours_fractional() {
        let now = 1_700_000_000;
        let mut record =
            GameRecord::new("Portal".into(), "45".into(), (now - 5400).to_string());
        record.epoch_to_hours(now).expect("valid epoch");
        assert_eq!(record.last_played, "1.50");
    }

    #[test]
    fn test_epoch_to_hours_rejects_garbage() {
        let mut record = GameRecord::new("Broken".into(), "10".into(), "not-a-number".into());
        let result = record.epoch_to_hours(1_700_000_000);
        assert!(result.is_err(), "Non-numeric epoch should be fatal");
    }

    #[test]
    fn test_never_played_sentinel() {
        let mut record = GameRecord::new("Dusty".into(), "0".into(), "0".into());
        assert!(!record.is_never_played());
        record.mark_never_played();
        assert!(record.is_never_played());
        assert_eq!(record.last_played, NEVER_PLAYED);
    }
}
