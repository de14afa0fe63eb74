//! Sleeper id → stats-site id resolution.
//!
//! Lookup order:
//! 1. hard-coded overrides for players whose id breaks the naming pattern
//! 2. the crosswalk CSV (`sleeper_id`, `pfr_id`, `name`, ...)
//! 3. guessed ids `Last[..4] + First[..2] + 00..09`, each confirmed by
//!    matching the birth date on the candidate's overview page

use serde::Deserialize;
use std::{
    collections::HashMap,
    io::Read,
    path::Path,
    time::Duration,
};
use tracing::{error, info, warn};

use crate::{
    cli::types::{PfrId, PlayerId},
    core::{cache::STALE_AFTER, is_stale, write_string, DataPaths},
    pfr::fetcher::{FetchOutcome, StatsFetcher},
    sleeper::types::PlayerInfo,
    FflError, Result,
};

/// Public crosswalk of player ids across fantasy and stats sites.
pub const ID_TABLE_URL: &str =
    "https://raw.githubusercontent.com/dynastyprocess/data/master/files/db_playerids.csv";

/// Number of two-digit suffixes tried when guessing (`00` through `09`).
pub const GUESS_SUFFIXES: u32 = 10;

/// Players whose stats-site id cannot be derived from their current name.
const ID_OVERRIDES: &[(&str, &str)] = &[
    // Josh Allen (QB) changed his listed name
    ("5840", "AlleJo03"),
];

#[derive(Debug, Deserialize)]
struct IdRow {
    #[serde(default)]
    sleeper_id: Option<String>,
    #[serde(default)]
    pfr_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// One crosswalk row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdEntry {
    pub pfr_id: Option<PfrId>,
    pub name: Option<String>,
}

/// Clean a cell from the crosswalk. Ids written by dataframe tools come out
/// as `5840.0`, and missing values as `NA`/`nan`.
fn clean_cell(raw: Option<String>) -> Option<String> {
    let s = raw?.trim().to_string();
    if s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan") {
        return None;
    }
    match s.strip_suffix(".0") {
        Some(int) if !int.is_empty() && int.chars().all(|c| c.is_ascii_digit()) => {
            Some(int.to_string())
        }
        _ => Some(s),
    }
}

/// The crosswalk keyed by Sleeper id.
#[derive(Debug, Clone, Default)]
pub struct IdTable {
    by_sleeper: HashMap<PlayerId, IdEntry>,
}

impl IdTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut by_sleeper = HashMap::new();

        for row in rdr.deserialize::<IdRow>() {
            let row = row?;
            let Some(sleeper_id) = clean_cell(row.sleeper_id) else {
                continue;
            };
            by_sleeper.insert(
                PlayerId::new(sleeper_id),
                IdEntry {
                    pfr_id: clean_cell(row.pfr_id).map(PfrId::new),
                    name: clean_cell(row.name),
                },
            );
        }

        Ok(Self { by_sleeper })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&IdEntry> {
        self.by_sleeper.get(player_id)
    }

    pub fn len(&self) -> usize {
        self.by_sleeper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sleeper.is_empty()
    }
}

/// Load the crosswalk, downloading it when missing, older than a week, or
/// `refresh` is set.
pub async fn load_or_fetch_id_table(
    client: &reqwest::Client,
    paths: &DataPaths,
    url: &str,
    refresh: bool,
) -> Result<IdTable> {
    let path = paths.id_table();

    if refresh || is_stale(&path, STALE_AFTER) {
        info!("Player ID table missing or stale, downloading {}", url);
        let body = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        write_string(&path, &body)?;
    }

    let table = IdTable::load(&path)?;
    info!("Loaded {} player id mappings", table.len());
    Ok(table)
}

/// How a player's stats-site id was (or can be) found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Known(PfrId),
    /// Candidates to probe in order.
    Guess(Vec<PfrId>),
    /// No mapping and not enough name data to guess.
    Unresolvable,
}

fn take_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// `Last[..4] + First[..2] + NN` for `NN` in `00..=09`.
pub fn guess_candidates(first_name: &str, last_name: &str) -> Vec<PfrId> {
    let stem = format!("{}{}", take_chars(last_name, 4), take_chars(first_name, 2));
    (0..GUESS_SUFFIXES)
        .map(|i| PfrId::new(format!("{}{:02}", stem, i)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct IdMapper {
    table: IdTable,
    overrides: HashMap<PlayerId, PfrId>,
}

impl IdMapper {
    pub fn new(table: IdTable) -> Self {
        let overrides = ID_OVERRIDES
            .iter()
            .map(|(sleeper, pfr)| (PlayerId::from(*sleeper), PfrId::new(*pfr)))
            .collect();
        Self { table, overrides }
    }

    pub fn table(&self) -> &IdTable {
        &self.table
    }

    /// Resolve without touching the network.
    pub fn resolve(&self, player: &PlayerInfo) -> Resolution {
        if let Some(pfr_id) = self.overrides.get(&player.player_id) {
            info!("Using id override {} for {}", pfr_id, player.player_id);
            return Resolution::Known(pfr_id.clone());
        }

        if let Some(pfr_id) = self
            .table
            .get(&player.player_id)
            .and_then(|entry| entry.pfr_id.clone())
        {
            return Resolution::Known(pfr_id);
        }

        match (&player.first_name, &player.last_name) {
            (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => {
                warn!(
                    "{} has no stats-site id in the id table, guessing",
                    player.player_id
                );
                Resolution::Guess(guess_candidates(first, last))
            }
            _ => Resolution::Unresolvable,
        }
    }

    /// Resolve, probing guessed ids against the stats site when needed.
    ///
    /// `stored` is an id a previous run already confirmed; it is used before
    /// any guess is probed, but an override or table mapping still wins.
    /// `Ok(None)` means the player keeps going without external stats.
    /// A 429 during probing is returned as [`FflError::RateLimited`].
    pub async fn external_id(
        &self,
        fetcher: &StatsFetcher,
        player: &PlayerInfo,
        stored: Option<PfrId>,
        probe_pace: Duration,
    ) -> Result<Option<PfrId>> {
        match self.resolve(player) {
            Resolution::Known(pfr_id) => Ok(Some(pfr_id)),
            _ if stored.is_some() => {
                info!("Reusing stored stats-site id for {}", player.display_name());
                Ok(stored)
            }
            Resolution::Unresolvable => {
                error!(
                    "Cannot derive a stats-site id for {} ({})",
                    player.display_name(),
                    player.player_id
                );
                Ok(None)
            }
            Resolution::Guess(candidates) => {
                probe_candidates(fetcher, player, &candidates, probe_pace).await
            }
        }
    }
}

/// Try each candidate in order; the first whose page shows the player's
/// birth date wins.
pub async fn probe_candidates(
    fetcher: &StatsFetcher,
    player: &PlayerInfo,
    candidates: &[PfrId],
    probe_pace: Duration,
) -> Result<Option<PfrId>> {
    let Some(birth_date) = player.birth_date.as_deref().filter(|d| !d.is_empty()) else {
        error!(
            "{} has no birth date to confirm a guessed id, skipping stats",
            player.display_name()
        );
        return Ok(None);
    };

    for candidate in candidates {
        match fetcher.birth_date(candidate).await? {
            FetchOutcome::Fetched(Some(found)) if found == birth_date => {
                info!("Matched {} to {}", player.display_name(), candidate);
                return Ok(Some(candidate.clone()));
            }
            FetchOutcome::Fetched(found) => {
                warn!(
                    "{} birth date {:?} does not match {}, trying next",
                    candidate, found, birth_date
                );
            }
            FetchOutcome::RateLimited => {
                return Err(FflError::RateLimited {
                    url: fetcher.player_page_url(candidate),
                });
            }
            FetchOutcome::NotFound | FetchOutcome::Failed { .. } => {
                warn!("{} is not a valid player page, trying next", candidate);
            }
        }
        tokio::time::sleep(probe_pace).await;
    }

    error!(
        "No stats-site id found for {} after {} guesses",
        player.display_name(),
        candidates.len()
    );
    Ok(None)
}

#[cfg(test)]
mod tests;
