//! Loading and saving league documents and transaction logs.

use chrono::NaiveDate;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::{
    cli::types::LeagueId,
    core::{create_backup, write_string, write_string_atomic},
    database::models::{LeagueDocument, TransactionRecord},
    FflError, Result,
};

/// Read a league document; a missing file is [`FflError::DatabaseNotFound`].
/// Any other read failure (permissions, invalid UTF-8) is [`FflError::Io`],
/// so an unreadable file is never mistaken for an empty league.
pub fn load_document(path: &Path) -> Result<LeagueDocument> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(FflError::DatabaseNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&contents)?)
}

/// Like [`load_document`] but an absent file is an empty league.
pub fn load_document_or_default(path: &Path) -> Result<LeagueDocument> {
    match load_document(path) {
        Err(FflError::DatabaseNotFound { .. }) => Ok(LeagueDocument::default()),
        other => other,
    }
}

/// Back up the current file (best effort), then replace it atomically.
pub fn save_document(path: &Path, doc: &LeagueDocument, backups_dir: &Path) -> Result<()> {
    create_backup(path, backups_dir);

    let json = serde_json::to_string_pretty(doc)?;
    write_string_atomic(path, &json)?;
    info!(
        "Saved {} teams / {} players to {}",
        doc.teams.len(),
        doc.player_count(),
        path.display()
    );
    Ok(())
}

/// `{YYYYMMDD}_{league-id}_transactions.json`
pub fn transaction_log_name(league_id: &LeagueId, date: NaiveDate) -> String {
    format!("{}_{}_transactions.json", date.format("%Y%m%d"), league_id)
}

/// Write the day's transaction log. A second run on the same day replaces
/// the earlier file.
pub fn write_transaction_log(
    dir: &Path,
    league_id: &LeagueId,
    date: NaiveDate,
    records: &[TransactionRecord],
) -> Result<PathBuf> {
    let path = dir.join(transaction_log_name(league_id, date));
    write_string(&path, &serde_json::to_string_pretty(records)?)?;
    info!("Wrote {} transactions to {}", records.len(), path.display());
    Ok(path)
}
