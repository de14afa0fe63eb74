//! Deserialization tests against trimmed Sleeper payloads

use super::*;
use serde_json::json;

#[test]
fn test_league_deserialize() {
    let league: League = serde_json::from_value(json!({
        "league_id": "1075600889420845056",
        "name": "TLOOJ",
        "season": "2023",
        "status": "in_season",
        "scoring_settings": { "pass_yd": 0.04, "pass_td": 4.0, "rec": 1.0 }
    }))
    .unwrap();

    assert_eq!(league.league_id.as_str(), "1075600889420845056");
    assert_eq!(league.season.as_deref(), Some("2023"));
    assert_eq!(league.scoring_settings.get("pass_yd"), Some(&0.04));
    assert_eq!(league.scoring_settings.len(), 3);
}

#[test]
fn test_roster_with_null_players() {
    let roster: Roster = serde_json::from_value(json!({
        "roster_id": 3,
        "owner_id": null,
        "players": null
    }))
    .unwrap();

    assert!(roster.owner_id.is_none());
    assert!(roster.player_ids().is_empty());
}

#[test]
fn test_roster_player_ids() {
    let roster: Roster = serde_json::from_value(json!({
        "roster_id": 1,
        "owner_id": "7001",
        "players": ["4046", "DET"]
    }))
    .unwrap();

    assert_eq!(roster.owner_id, Some(OwnerId::new("7001")));
    assert_eq!(roster.player_ids(), &[PlayerId::new("4046"), PlayerId::new("DET")]);
}

#[test]
fn test_user_team_name_fallback() {
    let named: User = serde_json::from_value(json!({
        "user_id": "1",
        "display_name": "blarggy",
        "metadata": { "team_name": "Gridiron Goats" }
    }))
    .unwrap();
    assert_eq!(named.team_name(), "Gridiron Goats");

    let unnamed: User = serde_json::from_value(json!({
        "user_id": "2",
        "display_name": "joe",
        "metadata": null
    }))
    .unwrap();
    assert_eq!(unnamed.team_name(), "joe");

    let blank: User = serde_json::from_value(json!({
        "user_id": "3",
        "display_name": "kim",
        "metadata": { "team_name": "  " }
    }))
    .unwrap();
    assert_eq!(blank.team_name(), "kim");
}

#[test]
fn test_player_info_keeps_unknown_fields() {
    let info: PlayerInfo = serde_json::from_value(json!({
        "player_id": "4046",
        "first_name": "Patrick",
        "last_name": "Mahomes",
        "position": "QB",
        "fantasy_positions": ["QB"],
        "height": "74",
        "weight": 225,
        "birth_date": "1995-09-17",
        "team": "KC",
        "years_exp": 7
    }))
    .unwrap();

    assert_eq!(info.display_name(), "Patrick Mahomes");
    assert_eq!(info.weight.as_deref(), Some("225"));
    assert_eq!(info.positions_label(), "QB");
    assert_eq!(info.extra.get("years_exp"), Some(&json!(7)));

    let back = serde_json::to_value(&info).unwrap();
    assert_eq!(back["years_exp"], json!(7));
    assert_eq!(back["player_id"], json!("4046"));
}

#[test]
fn test_player_info_defense_display_name() {
    let info: PlayerInfo = serde_json::from_value(json!({
        "player_id": "DET",
        "full_name": null,
        "position": "DEF"
    }))
    .unwrap();

    assert_eq!(info.display_name(), "DET");
    assert_eq!(info.positions_label(), "DEF");
}
