//! Reconciliation and scoring over persisted league documents

use sleeper_ffl::{
    database::*,
    pfr::table::{StatColumn, StatValue, WeeklyStatTable},
    scoring::{score_document, ScoringWeightTable, StatKind},
    sleeper::types::PlayerCatalog,
    OwnerId, PlayerId, PlayerInfo, Season,
};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn player(id: &str, first: &str, last: &str, position: &str) -> PlayerInfo {
    let mut info = PlayerInfo::new(id, first, last);
    info.position = Some(position.to_string());
    info
}

fn catalog(players: &[PlayerInfo]) -> PlayerCatalog {
    players
        .iter()
        .map(|p| (p.player_id.clone(), p.clone()))
        .collect()
}

fn snapshot(owner: &str, name: &str, ids: &[&str]) -> RosterSnapshot {
    RosterSnapshot {
        owner_id: OwnerId::new(owner),
        display_name: name.to_string(),
        team_name: format!("{name} FC"),
        player_ids: ids.iter().map(|id| PlayerId::new(*id)).collect(),
    }
}

fn team(owner: &str, name: &str, players: &[&PlayerInfo]) -> TeamRoster {
    let mut team = TeamRoster::new(OwnerId::new(owner), name, format!("{name} FC"));
    for info in players {
        team.entry_mut(info);
    }
    team
}

fn column(values: &[i64]) -> StatColumn {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as u32, StatValue::Int(*v)))
        .collect()
}

#[test]
fn test_same_name_players_reconciled_by_id() {
    let wr = player("100", "Mike", "Williams", "WR");
    let te = player("200", "Mike", "Williams", "TE");
    let other = player("300", "Al", "Smith", "RB");
    let catalog = catalog(&[wr.clone(), te.clone(), other.clone()]);

    let doc = LeagueDocument::new(vec![
        team("a", "alpha", &[&wr, &other]),
        team("b", "beta", &[&te]),
    ]);
    // team A drops its Mike Williams, team B keeps the other one
    let current = vec![snapshot("a", "alpha", &["300"]), snapshot("b", "beta", &["200"])];

    let changes = reconcile(&doc, &current, &catalog);

    assert_eq!(changes.transactions.len(), 1);
    let removal = &changes.transactions[0];
    assert_eq!(removal.transaction, TransactionKind::Remove);
    assert_eq!(removal.owner_id, OwnerId::new("a"));
    assert_eq!(removal.player_id, PlayerId::new("100"));
    assert_eq!(removal.player_position, "WR");

    let beta = changes
        .teams
        .iter()
        .find(|t| t.owner_id == OwnerId::new("b"))
        .unwrap();
    assert!(beta.is_empty());

    let mut doc = doc;
    apply_changes(&mut doc, &current, &changes, &catalog);
    assert!(doc.team(&OwnerId::new("a")).unwrap().find(&PlayerId::new("100")).is_none());
    assert!(doc.team(&OwnerId::new("b")).unwrap().find(&PlayerId::new("200")).is_some());
}

#[test]
fn test_reconcile_after_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("database").join("42.json");
    let backups = dir.path().join("backups");

    let a = player("1", "Al", "Smith", "RB");
    let b = player("2", "Bo", "Jones", "WR");
    let catalog = catalog(&[a.clone(), b.clone()]);

    save_document(&path, &LeagueDocument::new(vec![team("o1", "owner", &[&a])]), &backups).unwrap();
    let doc = load_document(&path).unwrap();

    let changes = reconcile(&doc, &[snapshot("o1", "owner", &["1", "2"])], &catalog);
    let added: Vec<_> = changes.added().map(|(_, id)| id.clone()).collect();
    assert_eq!(added, vec![PlayerId::new("2")]);

    // nothing changes when rosters match the stored document
    let unchanged = reconcile(&doc, &[snapshot("o1", "owner", &["1"])], &catalog);
    assert!(unchanged.is_empty());
}

#[test]
fn test_scoring_survives_save_and_rescore() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("42.json");
    let backups = dir.path().join("backups");

    let mut table = WeeklyStatTable::new();
    table.insert("Rushing_Yds".to_string(), column(&[87, 120]));
    table.insert("Rushing_TD".to_string(), column(&[1, 0]));
    table.insert("Unnamed: 7_level_0_Sk".to_string(), column(&[0, 2]));

    let info = player("1", "Al", "Smith", "RB");
    let mut roster = TeamRoster::new(OwnerId::new("o1"), "owner", "Goats");
    roster
        .entry_mut(&info)
        .record
        .upsert_season(Season::new(2023), table);
    let mut doc = LeagueDocument::new(vec![roster]);

    let weights = ScoringWeightTable::new(BTreeMap::from([
        (StatKind::RushYards, 0.1),
        (StatKind::RushTd, 6.0),
        (StatKind::Sacks, 1.0),
    ]));

    let summary = score_document(&mut doc, &weights);
    assert_eq!(summary.seasons, 1);
    save_document(&path, &doc, &backups).unwrap();

    let mut reloaded = load_document(&path).unwrap();
    score_document(&mut reloaded, &weights);
    assert_eq!(reloaded, doc);

    let stats = &reloaded.teams[0].players[0].record.yearly_stats[&Season::new(2023)];
    let points = stats.fantasy_points.as_ref().unwrap();
    assert!((points[&0] - 14.7).abs() < 1e-9);
    assert!((points[&1] - 14.0).abs() < 1e-9);
    assert!((stats.fantasy_points_total.unwrap() - 28.7).abs() < 1e-9);
}
