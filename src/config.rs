//! Where gym-logger keeps its files. Everything lives under a single root
//! directory (by default `~/.gym-logger`) so a backup of that directory is a
//! backup of the whole application state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

use crate::db::Location;

/// Folder name used beneath the user's home directory for application data.
const DATA_ROOT_NAME: &str = ".gym-logger";
const DATA_DIR_NAME: &str = "data";
const BACKUP_DIR_NAME: &str = "backups";
const SEED_FILE_NAME: &str = "exercises.json";
const LOG_FILE_NAME: &str = "gym-logger.log";

/// Resolved filesystem layout for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub seed_file: PathBuf,
    pub log_file: PathBuf,
    pub profile: Option<String>,
}

impl AppPaths {
    /// Lay out the standard directories beneath `root`.
    pub fn under(root: impl Into<PathBuf>, profile: Option<String>) -> Self {
        let root = root.into();
        let data_dir = root.join(DATA_DIR_NAME);
        Self {
            backup_dir: root.join(BACKUP_DIR_NAME),
            seed_file: data_dir.join(SEED_FILE_NAME),
            log_file: root.join(LOG_FILE_NAME),
            data_dir,
            root,
            profile,
        }
    }

    /// Build the layout from command-line overrides, falling back to the home
    /// directory when no root is given.
    pub fn resolve(
        root: Option<PathBuf>,
        profile: Option<String>,
        seed_file: Option<PathBuf>,
    ) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => default_root()?,
        };
        let profile = profile
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let mut paths = Self::under(root, profile);
        if let Some(seed_file) = seed_file {
            paths.seed_file = seed_file;
        }
        Ok(paths)
    }

    /// Create the data and backup directories if they do not exist yet.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.data_dir, &self.backup_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        Ok(())
    }

    /// Store location for the configured profile.
    pub fn store_location(&self) -> Location {
        match &self.profile {
            Some(profile) => Location::with_profile(&self.data_dir, profile.clone()),
            None => Location::new(&self.data_dir),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }
}

/// Resolve `~/.gym-logger`.
fn default_root() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_ROOT_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn layout_under_root() {
        let paths = AppPaths::under("/srv/gym", None);
        assert_eq!(paths.data_dir, PathBuf::from("/srv/gym/data"));
        assert_eq!(paths.backup_dir, PathBuf::from("/srv/gym/backups"));
        assert_eq!(paths.seed_file, PathBuf::from("/srv/gym/data/exercises.json"));
        assert_eq!(paths.log_file, PathBuf::from("/srv/gym/gym-logger.log"));
        assert_eq!(paths.store_location(), Location::new("/srv/gym/data"));
    }

    #[test]
    fn overrides_are_applied() {
        let paths = AppPaths::resolve(
            Some(PathBuf::from("/srv/gym")),
            Some("  roman ".to_string()),
            Some(PathBuf::from("/etc/seed.json")),
        )
        .unwrap();
        assert_eq!(paths.seed_file, PathBuf::from("/etc/seed.json"));
        assert_eq!(
            paths.store_location(),
            Location::with_profile("/srv/gym/data", "roman")
        );
    }

    #[test]
    fn blank_profile_means_no_profile() {
        let paths = AppPaths::resolve(Some(PathBuf::from("/x")), Some("  ".into()), None).unwrap();
        assert_eq!(paths.profile, None);
    }

    #[test]
    fn ensure_dirs_creates_layout() {
        let tmp = tempdir().unwrap();
        let paths = AppPaths::under(tmp.path().join("root"), None);
        paths.ensure_dirs().unwrap();
        assert!(paths.data_dir.is_dir());
        assert!(paths.backup_dir.is_dir());
    }
}
