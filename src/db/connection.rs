use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use rusqlite::Connection;

use crate::error::{SqlResultExt, StoreError};
use crate::models::{Exercise, Record, SetBatch};

use super::locator::{self, Location, Probe};
use super::seed::{read_seed_file, SeedOutcome};
use super::{exercises, records, schema};

/// File name every backup is written to inside the backup directory.
const BACKUP_FILE_NAME: &str = "backup.sqlite3";

/// Exclusive handle on the on-disk store. The connection lives as long as the
/// `Store` and is released by [`Store::shutdown`], which consumes the handle so
/// nothing can be issued afterwards.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Locate the store for `location`, opening it if present or creating and
    /// initializing it if absent. A file that exists but cannot be opened is an
    /// error, never a reason to start over.
    pub fn open(location: &Location) -> Result<Self, StoreError> {
        match locator::probe(location)? {
            Probe::Present(path) => {
                let conn = locator::open_existing(&path)?;
                log::info!("opened store {}", path.display());
                Ok(Self { conn, path })
            }
            Probe::Absent => {
                let path = location.new_store_path();
                let conn = locator::create_new(&path)?;
                schema::create(&conn)?;
                log::info!("created store {}", path.display());
                Ok(Self { conn, path })
            }
        }
    }

    /// Path of the store file backing this handle.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Merge the exercises from a seed file. Pairs already present are skipped
    /// silently; a missing file is only worth a log line.
    pub fn seed_from_file(&mut self, seed_path: &Path) -> Result<SeedOutcome, StoreError> {
        let Some(entries) = read_seed_file(seed_path)? else {
            log::info!("seed file {} does not exist", seed_path.display());
            return Ok(SeedOutcome::Missing);
        };

        let tx = self
            .conn
            .transaction()
            .db_context("failed to start seed transaction")?;
        let mut inserted = 0;
        for (name, description) in &entries {
            if exercises::insert_or_ignore(&tx, name, description)? {
                inserted += 1;
            }
        }
        tx.commit().db_context("failed to commit seed exercises")?;

        let ignored = entries.len() - inserted;
        log::info!(
            "seeded {inserted} exercises from {} ({ignored} already present)",
            seed_path.display()
        );
        Ok(SeedOutcome::Applied { inserted, ignored })
    }

    pub fn list_exercises(&self) -> Result<Vec<Exercise>, StoreError> {
        exercises::fetch_exercises(&self.conn)
    }

    /// Add an exercise by hand. Unlike seeding, a duplicate name/description
    /// pair is reported as an error.
    pub fn add_exercise(&self, name: &str, description: &str) -> Result<Exercise, StoreError> {
        let exercise = exercises::insert_strict(&self.conn, name, description)?;
        log::info!("added exercise #{} {:?}", exercise.id, exercise.name);
        Ok(exercise)
    }

    pub fn records_for_exercise(&self, exercise_id: i64) -> Result<Vec<Record>, StoreError> {
        records::fetch_records(&self.conn, exercise_id)
    }

    /// Store every set of `batch` for the exercise, stamped with the local wall
    /// clock, and commit them together.
    pub fn add_records(
        &mut self,
        exercise_id: i64,
        batch: &SetBatch,
    ) -> Result<Vec<Record>, StoreError> {
        let tx = self
            .conn
            .transaction()
            .db_context("failed to start record transaction")?;
        if !exercises::exercise_exists(&tx, exercise_id)? {
            return Err(StoreError::UnknownExercise(exercise_id));
        }
        let written = records::insert_batch(&tx, exercise_id, batch, || {
            Local::now().naive_local()
        })?;
        tx.commit().db_context("failed to commit records")?;

        log::info!("logged {} sets for exercise #{exercise_id}", written.len());
        Ok(written)
    }

    /// Copy the store file wholesale into `dir`, replacing the previous backup.
    pub fn backup_to(&self, dir: &Path) -> Result<PathBuf, StoreError> {
        let target = dir.join(BACKUP_FILE_NAME);
        let backup_failed = |source| StoreError::Backup {
            target: target.clone(),
            source,
        };

        fs::create_dir_all(dir).map_err(backup_failed)?;
        fs::copy(&self.path, &target).map_err(backup_failed)?;

        log::info!("backed up {} to {}", self.path.display(), target.display());
        Ok(target)
    }

    /// Release the connection. Must be the last call made on the store.
    pub fn shutdown(self) -> Result<(), StoreError> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, source)| StoreError::Close { source })?;
        log::info!("closed store {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn backup_copies_the_store_file() {
        let tmp = tempdir().unwrap();
        let store = Store::open(&Location::new(tmp.path().join("data"))).unwrap();
        store.add_exercise("Squat", "legs").unwrap();

        let backups = tmp.path().join("backups");
        let target = store.backup_to(&backups).unwrap();
        assert_eq!(target, backups.join("backup.sqlite3"));

        let copy = Store::open(&Location::new(&backups)).unwrap();
        let names: Vec<_> = copy
            .list_exercises()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Squat"]);
    }

    #[test]
    fn unknown_exercise_writes_nothing() {
        let tmp = tempdir().unwrap();
        let mut store = Store::open(&Location::new(tmp.path())).unwrap();
        let batch = SetBatch::new(vec![crate::models::SetEntry {
            weight: 50.0,
            reps: 5,
        }])
        .unwrap();

        assert!(matches!(
            store.add_records(42, &batch),
            Err(StoreError::UnknownExercise(42))
        ));
        assert!(store.records_for_exercise(42).unwrap().is_empty());
    }

    #[test]
    fn reopening_finds_the_created_file() {
        let tmp = tempdir().unwrap();
        let location = Location::with_profile(tmp.path(), "roman");
        let store = Store::open(&location).unwrap();
        let created = store.path().to_path_buf();
        store.add_exercise("Row", "back").unwrap();
        store.shutdown().unwrap();

        let reopened = Store::open(&location).unwrap();
        assert_eq!(reopened.path(), created.as_path());
        assert_eq!(reopened.list_exercises().unwrap().len(), 1);
    }
}
