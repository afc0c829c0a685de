use rusqlite::Connection;

use crate::error::{SqlResultExt, StoreError};

/// Create both tables if they are missing. `excercise_id` is spelled the way
/// existing store files spell it.
pub fn create(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "BEGIN;
        CREATE TABLE IF NOT EXISTS exercises(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            UNIQUE(name, description)
        );
        CREATE TABLE IF NOT EXISTS records(
            excercise_id INTEGER NOT NULL,
            timestamp TEXT NOT NULL,
            weight REAL NOT NULL,
            reps INTEGER NOT NULL,
            PRIMARY KEY (excercise_id, timestamp)
        );
        COMMIT;",
    )
    .db_context("failed to create tables")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// `(name, type, notnull, pk)` for each column, in declaration order.
    fn columns(conn: &Connection, table: &str) -> Vec<(String, String, bool, i64)> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({table})"))
            .unwrap();
        stmt.query_map([], |row| {
            Ok((row.get(1)?, row.get(2)?, row.get(3)?, row.get(5)?))
        })
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
    }

    fn col(name: &str, ty: &str, not_null: bool, pk: i64) -> (String, String, bool, i64) {
        (name.to_string(), ty.to_string(), not_null, pk)
    }

    #[test]
    fn creates_exercises_table() {
        let conn = Connection::open_in_memory().unwrap();
        create(&conn).unwrap();

        assert_eq!(
            columns(&conn, "exercises"),
            vec![
                col("id", "INTEGER", false, 1),
                col("name", "TEXT", true, 0),
                col("description", "TEXT", true, 0),
            ]
        );

        conn.execute(
            "INSERT INTO exercises (name, description) VALUES ('Squat', 'legs')",
            [],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO exercises (name, description) VALUES ('Squat', 'legs')",
            [],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn creates_records_table_with_composite_key() {
        let conn = Connection::open_in_memory().unwrap();
        create(&conn).unwrap();

        assert_eq!(
            columns(&conn, "records"),
            vec![
                col("excercise_id", "INTEGER", true, 1),
                col("timestamp", "TEXT", true, 2),
                col("weight", "REAL", true, 0),
                col("reps", "INTEGER", true, 0),
            ]
        );
    }

    #[test]
    fn running_twice_is_harmless() {
        let conn = Connection::open_in_memory().unwrap();
        create(&conn).unwrap();
        conn.execute(
            "INSERT INTO exercises (name, description) VALUES ('Row', 'back')",
            [],
        )
        .unwrap();
        create(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT count(*) FROM exercises", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
