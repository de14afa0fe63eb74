//! Roster diffing between the stored document and a fresh snapshot.
//!
//! Players are compared by Sleeper id only, so two players sharing a name
//! are never confused. Teams that appear only in the stored document are
//! left alone.

use std::collections::HashSet;
use tracing::info;

use crate::{
    cli::types::{OwnerId, PlayerId},
    database::{
        models::{LeagueDocument, RosterEntry, TransactionKind, TransactionRecord},
        snapshot::RosterSnapshot,
    },
    sleeper::types::{PlayerCatalog, PlayerInfo},
};

/// Added and removed ids for one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamChanges {
    pub owner_id: OwnerId,
    pub display_name: String,
    pub added: Vec<PlayerId>,
    pub removed: Vec<PlayerId>,
}

impl TeamChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    pub teams: Vec<TeamChanges>,
    pub transactions: Vec<TransactionRecord>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Every added id with its owner, in snapshot order.
    pub fn added(&self) -> impl Iterator<Item = (&OwnerId, &PlayerId)> {
        self.teams
            .iter()
            .flat_map(|t| t.added.iter().map(move |id| (&t.owner_id, id)))
    }
}

fn record(
    team: &RosterSnapshot,
    player_id: &PlayerId,
    info: Option<&PlayerInfo>,
    old_entry: Option<&RosterEntry>,
    kind: TransactionKind,
) -> TransactionRecord {
    let info = info.or(old_entry.map(|e| &e.record.info));
    let player_name = match (info, old_entry) {
        (Some(info), _) => info.display_name(),
        (None, Some(entry)) => entry.name.clone(),
        (None, None) => player_id.to_string(),
    };

    TransactionRecord {
        owner_id: team.owner_id.clone(),
        display_name: team.display_name.clone(),
        player_id: player_id.clone(),
        player_name,
        player_position: info.map(PlayerInfo::positions_label).unwrap_or_default(),
        transaction: kind,
    }
}

/// Compare `doc` with `snapshot` team by team.
pub fn reconcile(doc: &LeagueDocument, snapshot: &[RosterSnapshot], catalog: &PlayerCatalog) -> Reconciliation {
    let mut result = Reconciliation::default();

    for team in snapshot {
        let old_team = doc.team(&team.owner_id);
        let new_ids: HashSet<&PlayerId> = team.player_ids.iter().collect();
        let old_ids: HashSet<&PlayerId> = old_team.map(|t| t.player_ids()).unwrap_or_default();

        let mut changes = TeamChanges {
            owner_id: team.owner_id.clone(),
            display_name: team.display_name.clone(),
            added: Vec::new(),
            removed: Vec::new(),
        };

        if let Some(old_team) = old_team {
            for entry in old_team.players.iter().filter(|e| !new_ids.contains(&e.player_id)) {
                result.transactions.push(record(
                    team,
                    &entry.player_id,
                    catalog.get(&entry.player_id),
                    Some(entry),
                    TransactionKind::Remove,
                ));
                changes.removed.push(entry.player_id.clone());
            }
        }

        for player_id in team.player_ids.iter().filter(|id| !old_ids.contains(id)) {
            result.transactions.push(record(
                team,
                player_id,
                catalog.get(player_id),
                None,
                TransactionKind::Add,
            ));
            changes.added.push(player_id.clone());
        }

        info!(
            "{}: {} added, {} removed",
            team.display_name,
            changes.added.len(),
            changes.removed.len()
        );
        result.teams.push(changes);
    }

    result
}

/// Apply `changes` to `doc`: drop removed entries and insert added players
/// with metadata only. Team names are refreshed from the snapshot.
pub fn apply_changes(
    doc: &mut LeagueDocument,
    snapshot: &[RosterSnapshot],
    changes: &Reconciliation,
    catalog: &PlayerCatalog,
) {
    for team in snapshot {
        doc.upsert_team(&team.owner_id, &team.display_name, &team.team_name);
    }

    for team_changes in &changes.teams {
        let Some(team) = doc.team_mut(&team_changes.owner_id) else {
            continue;
        };
        for player_id in &team_changes.removed {
            if let Some(entry) = team.remove(player_id) {
                info!("Removed {} from {}", entry.name, team.team_name);
            }
        }
        for player_id in &team_changes.added {
            let info = catalog
                .get(player_id)
                .cloned()
                .unwrap_or_else(|| placeholder(player_id));
            let entry = team.entry_mut(&info);
            info!("Added {} to {}", entry.name, team_changes.display_name);
        }
    }
}

fn placeholder(player_id: &PlayerId) -> PlayerInfo {
    let mut info = PlayerInfo::new(player_id.clone(), "", "");
    info.first_name = None;
    info.last_name = None;
    info
}
