//! League document data structures
//!
//! On disk a league document is a JSON array of teams:
//!
//! ```text
//! [ { "owner_id", "display_name", "team_name",
//!     "players": [ { "name", "player_id",
//!                    "record": { "info": {...}, "external_id",
//!                                "yearly_stats": { "2023": { "columns", "fantasy_points", ... } } } } ] } ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::cli::types::{OwnerId, PfrId, PlayerId, Season};
use crate::pfr::table::WeeklyStatTable;
use crate::sleeper::types::PlayerInfo;

/// Per-week fantasy points keyed by game log row index.
pub type WeeklyPoints = BTreeMap<u32, f64>;

/// One season of game logs plus the scores computed from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    #[serde(default)]
    pub columns: WeeklyStatTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fantasy_points: Option<WeeklyPoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fantasy_points_total: Option<f64>,
}

impl SeasonStats {
    pub fn new(columns: WeeklyStatTable) -> Self {
        Self {
            columns,
            fantasy_points: None,
            fantasy_points_total: None,
        }
    }
}

/// Biographic info plus every season of stats gathered for a player.
///
/// Seasons are kept in a `BTreeMap`, so they always serialize in
/// chronological order after `info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub info: PlayerInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<PfrId>,
    #[serde(default)]
    pub yearly_stats: BTreeMap<Season, SeasonStats>,
}

impl PlayerRecord {
    pub fn new(info: PlayerInfo) -> Self {
        Self {
            info,
            external_id: None,
            yearly_stats: BTreeMap::new(),
        }
    }

    /// Replace the season's table if present, otherwise add it. Returns true
    /// when an existing season was replaced. Scores for that season are
    /// dropped since they no longer match the table.
    pub fn upsert_season(&mut self, season: Season, columns: WeeklyStatTable) -> bool {
        self.yearly_stats
            .insert(season, SeasonStats::new(columns))
            .is_some()
    }
}

/// A player on a team, keyed by name + Sleeper id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub player_id: PlayerId,
    pub record: PlayerRecord,
}

impl RosterEntry {
    pub fn new(info: PlayerInfo) -> Self {
        Self {
            name: info.display_name(),
            player_id: info.player_id.clone(),
            record: PlayerRecord::new(info),
        }
    }

    /// `{name}_{player_id}`; distinct for players who share a name.
    pub fn key(&self) -> String {
        format!("{}_{}", self.name, self.player_id)
    }
}

/// One franchise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub owner_id: OwnerId,
    pub display_name: String,
    pub team_name: String,
    #[serde(default)]
    pub players: Vec<RosterEntry>,
}

impl TeamRoster {
    pub fn new(owner_id: OwnerId, display_name: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            owner_id,
            display_name: display_name.into(),
            team_name: team_name.into(),
            players: Vec::new(),
        }
    }

    pub fn player_ids(&self) -> HashSet<&PlayerId> {
        self.players.iter().map(|p| &p.player_id).collect()
    }

    pub fn find(&self, player_id: &PlayerId) -> Option<&RosterEntry> {
        self.players.iter().find(|p| &p.player_id == player_id)
    }

    pub fn find_mut(&mut self, player_id: &PlayerId) -> Option<&mut RosterEntry> {
        self.players.iter_mut().find(|p| &p.player_id == player_id)
    }

    /// Existing entry for the player, or a new one built from `info`.
    /// Keeps each player id at most once per team.
    pub fn entry_mut(&mut self, info: &PlayerInfo) -> &mut RosterEntry {
        let idx = match self.players.iter().position(|p| p.player_id == info.player_id) {
            Some(idx) => idx,
            None => {
                self.players.push(RosterEntry::new(info.clone()));
                self.players.len() - 1
            }
        };
        &mut self.players[idx]
    }

    /// Remove a player by id; returns the removed entry.
    pub fn remove(&mut self, player_id: &PlayerId) -> Option<RosterEntry> {
        let idx = self.players.iter().position(|p| &p.player_id == player_id)?;
        Some(self.players.remove(idx))
    }
}

/// The whole persisted league file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueDocument {
    pub teams: Vec<TeamRoster>,
}

impl LeagueDocument {
    pub fn new(teams: Vec<TeamRoster>) -> Self {
        Self { teams }
    }

    pub fn team(&self, owner_id: &OwnerId) -> Option<&TeamRoster> {
        self.teams.iter().find(|t| &t.owner_id == owner_id)
    }

    pub fn team_mut(&mut self, owner_id: &OwnerId) -> Option<&mut TeamRoster> {
        self.teams.iter_mut().find(|t| &t.owner_id == owner_id)
    }

    /// Find the team by owner, refreshing its names, or append a new one.
    pub fn upsert_team(&mut self, owner_id: &OwnerId, display_name: &str, team_name: &str) -> &mut TeamRoster {
        let idx = match self.teams.iter().position(|t| &t.owner_id == owner_id) {
            Some(idx) => {
                let team = &mut self.teams[idx];
                team.display_name = display_name.to_string();
                team.team_name = team_name.to_string();
                idx
            }
            None => {
                self.teams
                    .push(TeamRoster::new(owner_id.clone(), display_name, team_name));
                self.teams.len() - 1
            }
        };
        &mut self.teams[idx]
    }

    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|t| t.players.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Add,
    Remove,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Add => write!(f, "add"),
            TransactionKind::Remove => write!(f, "remove"),
        }
    }
}

/// One roster move found by reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub owner_id: OwnerId,
    pub display_name: String,
    pub player_id: PlayerId,
    pub player_name: String,
    pub player_position: String,
    pub transaction: TransactionKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pfr::table::{StatColumn, StatValue};
    use serde_json::json;

    fn table(value: i64) -> WeeklyStatTable {
        let mut column = StatColumn::new();
        column.insert(0, StatValue::Int(value));
        let mut t = WeeklyStatTable::new();
        t.insert("Passing_Yds".to_string(), column);
        t
    }

    #[test]
    fn test_upsert_season_replaces_by_year() {
        let mut record = PlayerRecord::new(PlayerInfo::new("1", "Al", "Smith"));

        assert!(!record.upsert_season(Season::new(2023), table(100)));
        record.yearly_stats.get_mut(&Season::new(2023)).unwrap().fantasy_points =
            Some([(0, 4.0)].into_iter().collect());

        assert!(record.upsert_season(Season::new(2023), table(250)));
        let stats = &record.yearly_stats[&Season::new(2023)];
        assert_eq!(stats.columns["Passing_Yds"][&0], StatValue::Int(250));
        assert!(stats.fantasy_points.is_none());
        assert_eq!(record.yearly_stats.len(), 1);
    }

    #[test]
    fn test_seasons_serialize_chronologically() {
        let mut record = PlayerRecord::new(PlayerInfo::new("1", "Al", "Smith"));
        record.upsert_season(Season::new(2023), table(1));
        record.upsert_season(Season::new(2019), table(2));
        record.upsert_season(Season::new(2021), table(3));

        let json = serde_json::to_string(&record).unwrap();
        let info_at = json.find("\"info\"").unwrap();
        let y2019 = json.find("\"2019\"").unwrap();
        let y2021 = json.find("\"2021\"").unwrap();
        let y2023 = json.find("\"2023\"").unwrap();
        assert!(info_at < y2019 && y2019 < y2021 && y2021 < y2023);
    }

    #[test]
    fn test_entry_key_distinguishes_same_name() {
        let a = RosterEntry::new(PlayerInfo::new("100", "Mike", "Williams"));
        let b = RosterEntry::new(PlayerInfo::new("200", "Mike", "Williams"));
        assert_eq!(a.name, b.name);
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), "Mike Williams_100");
    }

    #[test]
    fn test_entry_mut_keeps_ids_unique() {
        let mut team = TeamRoster::new(OwnerId::new("o1"), "blarggy", "Goats");
        let info = PlayerInfo::new("1", "Al", "Smith");

        team.entry_mut(&info);
        team.entry_mut(&info);
        assert_eq!(team.players.len(), 1);

        assert!(team.remove(&PlayerId::new("1")).is_some());
        assert!(team.remove(&PlayerId::new("1")).is_none());
    }

    #[test]
    fn test_upsert_team_refreshes_names() {
        let mut doc = LeagueDocument::default();
        doc.upsert_team(&OwnerId::new("o1"), "old", "Old Name");
        doc.upsert_team(&OwnerId::new("o1"), "new", "New Name");

        assert_eq!(doc.teams.len(), 1);
        assert_eq!(doc.teams[0].team_name, "New Name");
    }

    #[test]
    fn test_document_is_a_json_array() {
        let doc: LeagueDocument = serde_json::from_value(json!([
            {
                "owner_id": "o1",
                "display_name": "blarggy",
                "team_name": "Goats",
                "players": [
                    {
                        "name": "Al Smith",
                        "player_id": "1",
                        "record": { "info": { "player_id": "1" }, "yearly_stats": {} }
                    }
                ]
            }
        ]))
        .unwrap();

        assert_eq!(doc.player_count(), 1);
        let back = serde_json::to_value(&doc).unwrap();
        assert!(back.is_array());
    }

    #[test]
    fn test_transaction_kind_json() {
        assert_eq!(serde_json::to_value(TransactionKind::Add).unwrap(), json!("add"));
        assert_eq!(serde_json::to_value(TransactionKind::Remove).unwrap(), json!("remove"));
    }
}
