//! On-disk layout of the data directory plus small file helpers
//!
//! Everything the tool persists lives under one root:
//! - `database/`: league documents, the player catalog and the id table
//! - `transactions/{league}/`: daily roster change logs
//! - `backups/`: timestamped copies taken before any overwrite
//! - `cache/`: league settings fetched from Sleeper
//! - `logs/`: the run log

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use crate::LeagueId;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV_VAR: &str = "SLEEPER_FFL_DATA_DIR";

/// Cached downloads older than this are refreshed.
pub const STALE_AFTER: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Resolved locations of every file the tool reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Explicit root, then `SLEEPER_FFL_DATA_DIR`, then the platform data dir.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        if let Some(root) = explicit {
            return Self::new(root);
        }
        if let Ok(root) = std::env::var(DATA_DIR_ENV_VAR) {
            if !root.trim().is_empty() {
                return Self::new(root);
            }
        }
        let base = dirs::data_dir().unwrap_or_else(|| {
            let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.push(".local");
            home.push("share");
            home
        });
        Self::new(base.join("sleeper-ffl"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn database_dir(&self) -> PathBuf {
        self.root.join("database")
    }

    /// `database/{league-id}.json`
    pub fn league_database(&self, league_id: &LeagueId) -> PathBuf {
        self.database_dir().join(format!("{}.json", league_id))
    }

    /// Sleeper's full NFL player map.
    pub fn player_catalog(&self) -> PathBuf {
        self.database_dir().join("player_data.json")
    }

    /// Sleeper id ↔ stats-site id crosswalk.
    pub fn id_table(&self) -> PathBuf {
        self.database_dir().join("player_id_table.csv")
    }

    pub fn transactions_dir(&self, league_id: &LeagueId) -> PathBuf {
        self.root.join("transactions").join(league_id.as_str())
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.root.join("backups")
    }

    /// `cache/league-settings_{league-id}.json`
    pub fn league_settings(&self, league_id: &LeagueId) -> PathBuf {
        self.root
            .join("cache")
            .join(format!("league-settings_{}.json", league_id))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Default CSV export target next to the league document.
    pub fn csv_export(&self, league_id: &LeagueId) -> PathBuf {
        self.database_dir().join(format!("{}.csv", league_id))
    }
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Write to a sibling temp file then rename over `path`, so readers never
/// observe a half-written file.
pub fn write_string_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    write_string(&tmp, contents)?;
    fs::rename(&tmp, path)
}

/// True when `path` is missing or was last modified more than `max_age` ago.
pub fn is_stale(path: &Path, max_age: Duration) -> bool {
    let Ok(meta) = fs::metadata(path) else {
        return true;
    };
    let Ok(modified) = meta.modified() else {
        return true;
    };
    SystemTime::now()
        .duration_since(modified)
        .map(|age| age > max_age)
        .unwrap_or(false)
}
