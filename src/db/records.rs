use chrono::format::ParseError;
use chrono::{Duration, NaiveDateTime, SubsecRound};
use rusqlite::types::Type;
use rusqlite::Error::FromSqlConversionFailure;
use rusqlite::{params, Connection};

use crate::error::{SqlResultExt, StoreError};
use crate::models::{Record, SetBatch, TIMESTAMP_FORMAT};

const SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Every set for one exercise, most recent first.
pub fn fetch_records(conn: &Connection, exercise_id: i64) -> Result<Vec<Record>, StoreError> {
    let mut stmt = conn
        .prepare(
            "SELECT excercise_id, timestamp, weight, reps
             FROM records
             WHERE excercise_id = ?1
             ORDER BY timestamp DESC",
        )
        .db_context("failed to prepare record query")?;

    let records = stmt
        .query_map(params![exercise_id], |row| {
            let raw: String = row.get(1)?;
            let timestamp = parse_timestamp(&raw)
                .map_err(|err| FromSqlConversionFailure(1, Type::Text, Box::new(err)))?;
            Ok(Record {
                exercise_id: row.get(0)?,
                timestamp,
                weight: row.get(2)?,
                reps: row.get(3)?,
            })
        })
        .db_context("failed to load records")?
        .collect::<Result<Vec<_>, _>>()
        .db_context("failed to collect records")?;

    Ok(records)
}

/// Stored stamps normally carry six fractional digits; rows written without a
/// fraction are still accepted.
fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, SECONDS_FORMAT))
}

/// Write one row per set, each stamped by `clock` at the moment it is inserted.
/// Stamps are kept at microsecond precision and strictly increasing within the
/// batch so no set in the same call can replace another. The caller owns the
/// transaction.
pub fn insert_batch<F>(
    conn: &Connection,
    exercise_id: i64,
    batch: &SetBatch,
    mut clock: F,
) -> Result<Vec<Record>, StoreError>
where
    F: FnMut() -> NaiveDateTime,
{
    let mut stmt = conn
        .prepare(
            "INSERT OR REPLACE INTO records (excercise_id, timestamp, weight, reps)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .db_context("failed to prepare record insert")?;

    let mut written: Vec<Record> = Vec::with_capacity(batch.len());
    for entry in batch.entries() {
        let mut timestamp = clock().trunc_subsecs(6);
        if let Some(previous) = written.last() {
            if timestamp <= previous.timestamp {
                timestamp = previous.timestamp + Duration::microseconds(1);
            }
        }

        stmt.execute(params![
            exercise_id,
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
            entry.weight,
            entry.reps,
        ])
        .db_context("failed to insert record")?;

        written.push(Record {
            exercise_id,
            timestamp,
            weight: entry.weight,
            reps: entry.reps,
        });
    }

    Ok(written)
}
