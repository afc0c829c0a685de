use rusqlite::{params, Connection};

use crate::error::{SqlResultExt, StoreError};
use crate::models::Exercise;

/// Retrieve every exercise in the order it was inserted.
pub fn fetch_exercises(conn: &Connection) -> Result<Vec<Exercise>, StoreError> {
    let mut stmt = conn
        .prepare("SELECT id, name, description FROM exercises ORDER BY id")
        .db_context("failed to prepare exercise query")?;

    let exercises = stmt
        .query_map([], |row| {
            Ok(Exercise {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
            })
        })
        .db_context("failed to load exercises")?
        .collect::<Result<Vec<_>, _>>()
        .db_context("failed to collect exercises")?;

    Ok(exercises)
}

/// Insert a new exercise and fail if the same name/description pair already
/// exists. Used for exercises the user adds by hand.
pub fn insert_strict(
    conn: &Connection,
    name: &str,
    description: &str,
) -> Result<Exercise, StoreError> {
    conn.execute(
        "INSERT INTO exercises (name, description) VALUES (?1, ?2)",
        params![name, description],
    )
    .db_context("failed to insert exercise")?;

    Ok(Exercise {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        description: description.to_string(),
    })
}

/// Insert an exercise unless the pair already exists. Returns whether a row
/// was written. Only the seed loader uses this policy.
pub fn insert_or_ignore(
    conn: &Connection,
    name: &str,
    description: &str,
) -> Result<bool, StoreError> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO exercises (name, description) VALUES (?1, ?2)",
            params![name, description],
        )
        .db_context("failed to insert seed exercise")?;
    Ok(inserted > 0)
}

pub fn exercise_exists(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM exercises WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )
    .db_context("failed to look up exercise")
}
