use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, MAIN_DB};

use crate::error::StoreError;

/// File extensions recognised as SQLite stores when scanning a directory.
const STORE_EXTENSIONS: &[&str] = &["sqlite3", "sqlite", "db"];
/// Store file name used when no profile is configured.
const DEFAULT_STORE_STEM: &str = "db";

/// Where a store lives: a directory, optionally narrowed to one profile's file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    dir: PathBuf,
    profile: Option<String>,
}

impl Location {
    /// Profile-less location: the directory must hold at most one store file.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            profile: None,
        }
    }

    /// Location whose store file is `<profile>.sqlite3`.
    pub fn with_profile(dir: impl Into<PathBuf>, profile: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            profile: Some(profile.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Path a freshly created store is written to.
    pub fn new_store_path(&self) -> PathBuf {
        let stem = self.profile.as_deref().unwrap_or(DEFAULT_STORE_STEM);
        self.dir.join(format!("{stem}.sqlite3"))
    }

    fn accepts(&self, path: &Path) -> bool {
        let has_store_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                STORE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if !has_store_extension {
            return false;
        }

        match &self.profile {
            Some(profile) => path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem == profile),
            None => true,
        }
    }
}

/// Outcome of scanning a location for an existing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Absent,
    Present(PathBuf),
}

/// Scan the location's directory and decide whether a store already exists.
/// Several matching files are a misconfiguration and are reported rather than
/// picked from.
pub fn probe(location: &Location) -> Result<Probe, StoreError> {
    let entries = match fs::read_dir(location.dir()) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Probe::Absent),
        Err(source) => {
            return Err(StoreError::Listing {
                path: location.dir().to_path_buf(),
                source,
            })
        }
    };

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Listing {
            path: location.dir().to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && location.accepts(&path) {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Ok(Probe::Absent),
        1 => Ok(Probe::Present(candidates.remove(0))),
        _ => Err(StoreError::Ambiguous {
            dir: location.dir().to_path_buf(),
            candidates,
        }),
    }
}

/// Open an existing store read-write without creating it, and prove it is a
/// real SQLite database by reading its catalogue. SQLite quietly downgrades to
/// a read-only connection when the file cannot be written, so that case is
/// checked on the opened connection.
pub fn open_existing(path: &Path) -> Result<Connection, StoreError> {
    let unusable = |source| StoreError::Unusable {
        path: path.to_path_buf(),
        source,
    };

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(unusable)?;

    conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(unusable)?;

    ensure_writable(&conn, path)?;
    Ok(conn)
}

fn ensure_writable(conn: &Connection, path: &Path) -> Result<(), StoreError> {
    let read_only = conn.is_readonly(MAIN_DB).map_err(|source| StoreError::Unusable {
        path: path.to_path_buf(),
        source,
    })?;
    if read_only {
        return Err(StoreError::ReadOnly {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Create a brand new store file, including its parent directory.
pub fn create_new(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| StoreError::Create {
        path: path.to_path_buf(),
        source,
    })
}
