//! Building and refreshing league documents from Sleeper rosters plus
//! stats-site game logs.
//!
//! Everything runs one request at a time with a pause between game log
//! fetches. The document is mutated in place after each season is fetched,
//! so dropping the build future (e.g. on Ctrl-C) leaves every player merged
//! so far intact.

use std::time::Duration;
use tracing::{info, warn};

use crate::{
    cli::types::{OwnerId, PfrId, PlayerId, Season},
    database::models::{LeagueDocument, RosterEntry},
    pfr::{
        fetcher::{stop_on_rate_limit, FetchConfig, FetchOutcome, StatsFetcher},
        ids::IdMapper,
    },
    sleeper::types::{PlayerCatalog, PlayerInfo, Roster, User},
    Result,
};


/// Which seasons to fetch for each player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSelection {
    Explicit(Vec<Season>),
    /// Every season listed on the player's overview page.
    Career,
}

/// A team's current player ids, without stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSnapshot {
    pub owner_id: OwnerId,
    pub display_name: String,
    pub team_name: String,
    pub player_ids: Vec<PlayerId>,
}

/// Pair rosters with their owners and keep only players Sleeper knows.
/// Rosters without a matching user are skipped.
pub fn roster_snapshot(rosters: &[Roster], users: &[User], catalog: &PlayerCatalog) -> Vec<RosterSnapshot> {
    let mut snapshot = Vec::new();

    for roster in rosters {
        let Some(owner_id) = &roster.owner_id else {
            warn!("Roster {} has no owner, skipping", roster.roster_id);
            continue;
        };
        let Some(user) = users.iter().find(|u| &u.user_id == owner_id) else {
            warn!("No league user for owner {}, skipping", owner_id);
            continue;
        };

        let player_ids = roster
            .player_ids()
            .iter()
            .filter(|id| {
                let known = catalog.contains_key(*id);
                if !known {
                    warn!("Player {} not in the player catalog, skipping", id);
                }
                known
            })
            .cloned()
            .collect();

        snapshot.push(RosterSnapshot {
            owner_id: owner_id.clone(),
            display_name: user.display_name.clone(),
            team_name: user.team_name(),
            player_ids,
        });
    }

    snapshot
}

/// Counters for a build or refresh pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub players: usize,
    pub seasons_fetched: usize,
    pub seasons_failed: usize,
    pub unresolved: Vec<PlayerId>,
}

pub struct SnapshotBuilder<'a> {
    fetcher: &'a StatsFetcher,
    mapper: &'a IdMapper,
    catalog: &'a PlayerCatalog,
    config: FetchConfig,
}

fn entry_mut<'d>(doc: &'d mut LeagueDocument, owner_id: &OwnerId, player_id: &PlayerId) -> Option<&'d mut RosterEntry> {
    doc.team_mut(owner_id)?.find_mut(player_id)
}

impl<'a> SnapshotBuilder<'a> {
    pub fn new(
        fetcher: &'a StatsFetcher,
        mapper: &'a IdMapper,
        catalog: &'a PlayerCatalog,
        config: FetchConfig,
    ) -> Self {
        Self {
            fetcher,
            mapper,
            catalog,
            config,
        }
    }

    /// Merge every team and player of `snapshot` into `doc`, fetching stats
    /// for the selected years.
    pub async fn build(
        &self,
        snapshot: &[RosterSnapshot],
        years: &YearSelection,
        doc: &mut LeagueDocument,
        report: &mut BuildReport,
    ) -> Result<()> {
        for team in snapshot {
            info!("Building roster for {} ({})", team.display_name, team.team_name);
            doc.upsert_team(&team.owner_id, &team.display_name, &team.team_name);

            for player_id in &team.player_ids {
                let Some(info) = self.catalog.get(player_id) else {
                    continue;
                };
                self.merge_player(&team.owner_id, info, years, doc, report)
                    .await?;
            }
        }
        Ok(())
    }

    /// Re-fetch the selected years for every player already in `doc`.
    pub async fn refresh_stats(
        &self,
        years: &YearSelection,
        doc: &mut LeagueDocument,
        report: &mut BuildReport,
    ) -> Result<()> {
        let targets: Vec<(OwnerId, PlayerInfo)> = doc
            .teams
            .iter()
            .flat_map(|team| {
                team.players.iter().map(|entry| {
                    let info = self
                        .catalog
                        .get(&entry.player_id)
                        .cloned()
                        .unwrap_or_else(|| entry.record.info.clone());
                    (team.owner_id.clone(), info)
                })
            })
            .collect();

        for (owner_id, info) in &targets {
            self.merge_player(owner_id, info, years, doc, report).await?;
        }
        Ok(())
    }

    /// Add or refresh one player on one team.
    pub async fn merge_player(
        &self,
        owner_id: &OwnerId,
        info: &PlayerInfo,
        years: &YearSelection,
        doc: &mut LeagueDocument,
        report: &mut BuildReport,
    ) -> Result<()> {
        let Some(team) = doc.team_mut(owner_id) else {
            return Ok(());
        };

        // The player is on the roster whether or not stats turn up.
        let entry = team.entry_mut(info);
        entry.name = info.display_name();
        entry.record.info = info.clone();
        let known_external = entry.record.external_id.clone();
        report.players += 1;

        let Some(pfr_id) = self
            .mapper
            .external_id(self.fetcher, info, known_external, self.config.probe_pace)
            .await?
        else {
            report.unresolved.push(info.player_id.clone());
            return Ok(());
        };
        if let Some(entry) = entry_mut(doc, owner_id, &info.player_id) {
            entry.record.external_id = Some(pfr_id.clone());
        }

        let seasons = match years {
            YearSelection::Explicit(seasons) => seasons.clone(),
            YearSelection::Career => self.career_years(&pfr_id).await?,
        };

        for season in seasons {
            let url = self.fetcher.gamelog_url(&pfr_id, season);
            match stop_on_rate_limit(self.fetcher.gamelog(&pfr_id, season).await?, url)? {
                FetchOutcome::Fetched(table) => {
                    if let Some(entry) = entry_mut(doc, owner_id, &info.player_id) {
                        if entry.record.upsert_season(season, table) {
                            info!("Updating stats for {} for {}", entry.name, season);
                        } else {
                            info!("Appending stats for {} for {}", entry.name, season);
                        }
                    }
                    report.seasons_fetched += 1;
                }
                _ => {
                    warn!("No {} game log for {} ({})", season, info.display_name(), pfr_id);
                    report.seasons_failed += 1;
                }
            }
            self.pause(self.config.pace).await;
        }

        Ok(())
    }

    async fn career_years(&self, pfr_id: &PfrId) -> Result<Vec<Season>> {
        let url = self.fetcher.player_page_url(pfr_id);
        let outcome = stop_on_rate_limit(self.fetcher.years_of_service(pfr_id).await?, url)?;
        match outcome.fetched() {
            Some(years) => {
                info!("Years of service for {}: {:?}", pfr_id, years);
                Ok(years)
            }
            None => {
                warn!("Could not read years of service for {}", pfr_id);
                Ok(Vec::new())
            }
        }
    }

    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
