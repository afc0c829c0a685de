//! Error kinds the persistence layer anticipates. Anything that is not a
//! `StoreError` is treated as unexpected by `main` and ends the process.

use std::io;
use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to list storage directory {}", .path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "multiple store files in {}: {}; remove or rename all but one",
        .dir.display(),
        display_paths(.candidates)
    )]
    Ambiguous {
        dir: PathBuf,
        candidates: Vec<PathBuf>,
    },

    #[error("store file {} exists but is not usable", .path.display())]
    Unusable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("store file {} can only be opened read-only", .path.display())]
    ReadOnly { path: PathBuf },

    #[error("failed to create storage directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create store at {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("{operation}")]
    Database {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("exercise #{0} does not exist")]
    UnknownExercise(i64),

    #[error("failed to read seed file {}", .path.display())]
    SeedRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("seed file {} is not a JSON object of exercise descriptions", .path.display())]
    SeedFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("seed file {}: description of {name:?} must be a string", .path.display())]
    SeedValue { path: PathBuf, name: String },

    #[error("failed to back up store to {}", .target.display())]
    Backup {
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to close store")]
    Close {
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    /// True when SQLite refused a statement because of a UNIQUE or PRIMARY KEY
    /// constraint.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StoreError::Database { source, .. } => matches!(
                source.sqlite_error_code(),
                Some(ErrorCode::ConstraintViolation)
            ),
            _ => false,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Attach an operation description to a raw SQLite failure, the same way
/// `anyhow::Context` is used in the application glue.
pub(crate) trait SqlResultExt<T> {
    fn db_context(self, operation: &'static str) -> Result<T, StoreError>;
}

impl<T> SqlResultExt<T> for Result<T, rusqlite::Error> {
    fn db_context(self, operation: &'static str) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Database { operation, source })
    }
}
