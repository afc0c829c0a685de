use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::StoreError;

/// What happened when the seed file was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// No seed file at the configured path; nothing was touched.
    Missing,
    Applied { inserted: usize, ignored: usize },
}

/// Read a seed document: a flat JSON object mapping exercise names to their
/// descriptions. `Ok(None)` means the file does not exist. Entries keep their
/// order from the document.
pub fn read_seed_file(path: &Path) -> Result<Option<Vec<(String, String)>>, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::SeedRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let document: Map<String, Value> =
        serde_json::from_str(&raw).map_err(|source| StoreError::SeedFormat {
            path: path.to_path_buf(),
            source,
        })?;

    document
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(description) => Ok((name, description)),
            _ => Err(StoreError::SeedValue {
                path: path.to_path_buf(),
                name,
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
