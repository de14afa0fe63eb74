//! Timestamped backups taken before a persisted file is overwritten.
//!
//! Backups are best effort: a failure is logged and reported as `None`, and
//! the caller goes ahead with its write.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use tracing::{info, warn};

/// `{original-filename}_{YYYYMMDDHHMMSS}_backup`
pub fn backup_file_name(file: &Path, at: NaiveDateTime) -> Option<String> {
    let name = file.file_name()?.to_string_lossy();
    Some(format!("{}_{}_backup", name, at.format("%Y%m%d%H%M%S")))
}

/// Copy `file` into `backups_dir` stamped with the current local time.
pub fn create_backup(file: &Path, backups_dir: &Path) -> Option<PathBuf> {
    create_backup_at(file, backups_dir, Local::now().naive_local())
}

/// Copy `file` into `backups_dir` using the given timestamp.
///
/// Returns the backup path, or `None` if the source does not exist or the
/// copy failed.
pub fn create_backup_at(file: &Path, backups_dir: &Path, at: NaiveDateTime) -> Option<PathBuf> {
    if !file.exists() {
        info!("No backup needed, {} does not exist", file.display());
        return None;
    }

    let name = backup_file_name(file, at)?;
    let dest = backups_dir.join(name);

    let result = fs::create_dir_all(backups_dir).and_then(|_| fs::copy(file, &dest));
    match result {
        Ok(_) => {
            info!("Backup created at {}", dest.display());
            Some(dest)
        }
        Err(e) => {
            warn!("Failed to create backup of {}: {}", file.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(1, 1, 1)
            .unwrap()
    }

    #[test]
    fn test_backup_file_name() {
        let name = backup_file_name(Path::new("/db/123.json"), stamp()).unwrap();
        assert_eq!(name, "123.json_20230101010101_backup");
    }

    #[test]
    fn test_backup_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let result = create_backup_at(&dir.path().join("nope.json"), &dir.path().join("backups"), stamp());
        assert!(result.is_none());
        assert!(!dir.path().join("backups").exists());
    }

    #[test]
    fn test_backup_copies_contents() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("league.json");
        fs::write(&file, "[1,2,3]").unwrap();

        let backups = dir.path().join("backups");
        let dest = create_backup_at(&file, &backups, stamp()).unwrap();

        assert_eq!(dest, backups.join("league.json_20230101010101_backup"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "[1,2,3]");
        // original untouched
        assert_eq!(fs::read_to_string(&file).unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_backup_failure_is_soft() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("league.json");
        fs::write(&file, "[]").unwrap();

        // a regular file where the backups directory should be
        let blocker = dir.path().join("backups");
        fs::write(&blocker, "not a dir").unwrap();

        assert!(create_backup_at(&file, &blocker, stamp()).is_none());
    }
}
