//! Logging setup

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "sleeper-ffl.log";

/// Move an existing log to `<name>.1`, replacing any older rotation.
pub fn rotate_log(path: &Path) -> std::io::Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut rotated = path.as_os_str().to_owned();
    rotated.push(".1");
    let rotated = PathBuf::from(rotated);
    fs::rename(path, &rotated)?;
    Ok(Some(rotated))
}

/// Console logging to stderr, plus a plain-text log file when `log_file`
/// is given. `RUST_LOG` overrides the default level.
pub fn initialize_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            rotate_log(path).with_context(|| format!("rotating {}", path.display()))?;
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("installing the tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rotate_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);

        assert_eq!(rotate_log(&path).unwrap(), None);

        fs::write(&path, "first run").unwrap();
        let rotated = rotate_log(&path).unwrap().unwrap();
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(&rotated).unwrap(), "first run");
        assert!(rotated.to_string_lossy().ends_with("sleeper-ffl.log.1"));

        fs::write(&path, "second run").unwrap();
        rotate_log(&path).unwrap();
        assert_eq!(fs::read_to_string(&rotated).unwrap(), "second run");
    }
}
