//! Domain models that mirror the SQLite schema and get passed between the
//! store and the terminal UI. They stay light-weight data holders; parsing of
//! user-entered sets lives here too because both the UI and the store agree on
//! what a valid set looks like.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Text layout used for the `records.timestamp` column. Fixed width, so the
/// lexical order SQLite sorts by is also the chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A named activity type such as "Squat".
pub struct Exercise {
    /// Primary key assigned by SQLite.
    pub id: i64,
    /// Display name shown in lists and pickers.
    pub name: String,
    /// Free-form notes; together with `name` it must be unique.
    pub description: String,
}

/// Renders the id padded to three columns followed by the name.
impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:<3} {}", self.id, self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One logged set for an exercise at a point in time.
pub struct Record {
    /// Id of the exercise this set belongs to.
    pub exercise_id: i64,
    /// Local wall-clock time the set was stored.
    pub timestamp: NaiveDateTime,
    /// Load lifted, in whatever unit the user logs in.
    pub weight: f64,
    /// Repetitions completed.
    pub reps: u32,
}

impl Record {
    /// Timestamp trimmed to whole seconds, the way record listings show it.
    pub fn display_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// A single `WEIGHT REPS` pair entered by the user.
pub struct SetEntry {
    /// Finite and never negative.
    pub weight: f64,
    pub reps: u32,
}

/// Why a `WEIGHT REPS` line was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetEntryError {
    #[error("expected two values: WEIGHT REPS")]
    WrongArity,
    #[error("weight {0:?} is not a number")]
    InvalidWeight(String),
    #[error("weight must be zero or more")]
    NegativeWeight,
    #[error("reps {0:?} must be a whole number")]
    InvalidReps(String),
}

/// Parses `"WEIGHT REPS"` separated by any amount of whitespace.
impl FromStr for SetEntry {
    type Err = SetEntryError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let (Some(weight_raw), Some(reps_raw), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(SetEntryError::WrongArity);
        };

        let weight = weight_raw
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .ok_or_else(|| SetEntryError::InvalidWeight(weight_raw.to_string()))?;
        if weight < 0.0 {
            return Err(SetEntryError::NegativeWeight);
        }

        let reps = reps_raw
            .parse::<u32>()
            .map_err(|_| SetEntryError::InvalidReps(reps_raw.to_string()))?;

        Ok(Self { weight, reps })
    }
}

/// Returned when a batch of sets is built from nothing.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("at least one set is required")]
pub struct EmptyBatch;

/// Non-empty, ordered collection of sets destined for one exercise. Holding a
/// `SetBatch` is proof that the caller validated the input, so the store never
/// sees an empty insert request.
#[derive(Debug, Clone, PartialEq)]
pub struct SetBatch(Vec<SetEntry>);

impl SetBatch {
    /// Wrap `entries`, refusing an empty list.
    pub fn new(entries: Vec<SetEntry>) -> Result<Self, EmptyBatch> {
        if entries.is_empty() {
            Err(EmptyBatch)
        } else {
            Ok(Self(entries))
        }
    }

    /// Sets in the order they were entered.
    pub fn entries(&self) -> &[SetEntry] {
        &self.0
    }

    /// Number of sets in the batch, at least one.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("100 5", 100.0, 5)]
    #[case("102.5 3", 102.5, 3)]
    #[case("  0   12 ", 0.0, 12)]
    fn parses_weight_and_reps(#[case] line: &str, #[case] weight: f64, #[case] reps: u32) {
        assert_eq!(line.parse::<SetEntry>(), Ok(SetEntry { weight, reps }));
    }

    #[rstest]
    #[case("100", SetEntryError::WrongArity)]
    #[case("100 5 7", SetEntryError::WrongArity)]
    #[case("", SetEntryError::WrongArity)]
    #[case("heavy 5", SetEntryError::InvalidWeight("heavy".into()))]
    #[case("inf 5", SetEntryError::InvalidWeight("inf".into()))]
    #[case("-10 5", SetEntryError::NegativeWeight)]
    #[case("100 5.5", SetEntryError::InvalidReps("5.5".into()))]
    #[case("100 -1", SetEntryError::InvalidReps("-1".into()))]
    fn rejects_malformed_lines(#[case] line: &str, #[case] expected: SetEntryError) {
        assert_eq!(line.parse::<SetEntry>(), Err(expected));
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_eq!(SetBatch::new(Vec::new()), Err(EmptyBatch));
    }

    #[test]
    fn batch_keeps_entry_order() {
        let first = SetEntry { weight: 100.0, reps: 5 };
        let second = SetEntry { weight: 102.5, reps: 3 };
        let batch = SetBatch::new(vec![first, second]).unwrap();
        assert_eq!(batch.entries(), &[first, second]);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn record_time_is_shown_to_the_second() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(18, 4, 59, 123_456)
            .unwrap();
        let record = Record {
            exercise_id: 1,
            timestamp,
            weight: 60.0,
            reps: 8,
        };
        assert_eq!(record.display_time(), "2024-03-09 18:04:59");
        assert_eq!(
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "2024-03-09 18:04:59.123456"
        );
    }
}
