use crate::cli::types::{LeagueId, OwnerId, PlayerId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

#[cfg(test)]
mod tests;

/// Sleeper sends some "string" fields as bare numbers depending on the
/// endpoint and player age of the record; accept both.
fn de_opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// League metadata from `/league/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct League {
    pub league_id: LeagueId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub season: Option<String>,
    /// Points per unit keyed by Sleeper's scoring key (`pass_yd`, `rec`, ...).
    #[serde(default)]
    pub scoring_settings: BTreeMap<String, f64>,
}

/// One franchise's roster from `/league/{id}/rosters`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Roster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<OwnerId>,
    #[serde(default)]
    pub players: Option<Vec<PlayerId>>,
}

impl Roster {
    pub fn player_ids(&self) -> &[PlayerId] {
        self.players.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub team_name: Option<String>,
}

/// League member from `/league/{id}/users`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub user_id: OwnerId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub metadata: Option<UserMetadata>,
}

impl User {
    /// Custom team name, or the manager's display name when none is set.
    pub fn team_name(&self) -> String {
        self.metadata
            .as_ref()
            .and_then(|m| m.team_name.clone())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.display_name.clone())
    }
}

/// Player metadata from `/players/nfl`.
///
/// Only the fields the pipeline reads are typed; everything else Sleeper
/// sends is kept in `extra` so the stored document stays complete.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerInfo {
    pub player_id: PlayerId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub fantasy_positions: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub height: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string_or_number")]
    pub weight: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerInfo {
    /// Minimal record, mostly for tests and placeholder entries.
    pub fn new(player_id: impl Into<PlayerId>, first_name: &str, last_name: &str) -> Self {
        Self {
            player_id: player_id.into(),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
            full_name: None,
            position: None,
            fantasy_positions: None,
            height: None,
            weight: None,
            birth_date: None,
            team: None,
            extra: Map::new(),
        }
    }

    /// "First Last", falling back to `full_name` or the id.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => self
                .full_name
                .clone()
                .unwrap_or_else(|| self.player_id.to_string()),
        }
    }

    /// Positions joined with spaces (`"WR RB"`), else the primary position.
    pub fn positions_label(&self) -> String {
        match &self.fantasy_positions {
            Some(positions) if !positions.is_empty() => positions.join(" "),
            _ => self.position.clone().unwrap_or_default(),
        }
    }
}

/// Sleeper's player map keyed by player id.
pub type PlayerCatalog = HashMap<PlayerId, PlayerInfo>;
