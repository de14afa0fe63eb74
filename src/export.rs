//! Flat CSV export of a league document.
//!
//! One row per player, season and game log row. Identity columns come
//! first, then every stat column seen anywhere in the document in the order
//! it was first met, then the computed points.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use crate::database::models::LeagueDocument;
use crate::{FflError, Result};

const IDENTITY_COLUMNS: [&str; 8] = [
    "player_name",
    "display_name",
    "team_name",
    "position",
    "sleeper_player_id",
    "height",
    "weight",
    "year",
];

const POINTS_COLUMN: &str = "fantasy_points";

/// Stat columns across the whole document, first-seen order.
fn stat_columns(doc: &LeagueDocument) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();

    let tables = doc
        .teams
        .iter()
        .flat_map(|t| &t.players)
        .flat_map(|e| e.record.yearly_stats.values());
    for stats in tables {
        for name in stats.columns.keys() {
            if seen.insert(name.as_str()) {
                columns.push(name.clone());
            }
        }
    }
    columns
}

/// Write the document as CSV; returns the number of data rows.
pub fn write_csv<W: Write>(doc: &LeagueDocument, writer: W) -> Result<usize> {
    let columns = stat_columns(doc);
    if columns.is_empty() {
        return Err(FflError::NoData);
    }

    let mut wtr = csv::Writer::from_writer(writer);
    let header = IDENTITY_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(columns.iter().cloned())
        .chain(std::iter::once(POINTS_COLUMN.to_string()));
    wtr.write_record(header)?;

    let mut rows = 0;
    for team in &doc.teams {
        for entry in &team.players {
            let info = &entry.record.info;
            for (season, stats) in &entry.record.yearly_stats {
                let row_ids: HashSet<u32> = stats
                    .columns
                    .values()
                    .flat_map(|column| column.keys().copied())
                    .collect();
                let mut row_ids: Vec<u32> = row_ids.into_iter().collect();
                row_ids.sort_unstable();

                for row in row_ids {
                    let mut record = vec![
                        entry.name.clone(),
                        team.display_name.clone(),
                        team.team_name.clone(),
                        info.positions_label(),
                        entry.player_id.to_string(),
                        info.height.clone().unwrap_or_default(),
                        info.weight.clone().unwrap_or_default(),
                        season.to_string(),
                    ];
                    record.extend(columns.iter().map(|name| {
                        stats
                            .columns
                            .get(name)
                            .and_then(|column| column.get(&row))
                            .map(ToString::to_string)
                            .unwrap_or_default()
                    }));
                    record.push(
                        stats
                            .fantasy_points
                            .as_ref()
                            .and_then(|points| points.get(&row))
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                    );
                    wtr.write_record(&record)?;
                    rows += 1;
                }
            }
        }
    }

    wtr.flush()?;
    Ok(rows)
}

/// [`write_csv`] into a file, creating parent directories.
pub fn export_csv(doc: &LeagueDocument, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(doc, file)
}
