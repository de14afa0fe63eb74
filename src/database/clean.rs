//! Renames legacy placeholder column keys in stored documents.

use tracing::{info, warn};

use crate::database::models::LeagueDocument;
use crate::pfr::columns::strip_placeholder;

/// Rename every `Unnamed...` column to its real stat name. A placeholder
/// whose target name already exists is left in place. Returns the number
/// of columns renamed.
pub fn clean_placeholder_columns(doc: &mut LeagueDocument) -> usize {
    let mut renamed = 0;

    for team in &mut doc.teams {
        for entry in &mut team.players {
            for (season, stats) in entry.record.yearly_stats.iter_mut() {
                let placeholders: Vec<String> = stats
                    .columns
                    .keys()
                    .filter(|name| strip_placeholder(name) != name.as_str())
                    .cloned()
                    .collect();

                for old in placeholders {
                    let new = strip_placeholder(&old).to_string();
                    if stats.columns.contains_key(&new) {
                        warn!("{} {}: {} already has {}, skipping", entry.name, season, old, new);
                        continue;
                    }
                    if let Some(column) = stats.columns.remove(&old) {
                        stats.columns.insert(new, column);
                        renamed += 1;
                    }
                }
            }
        }
    }

    info!("Renamed {} placeholder columns", renamed);
    renamed
}
