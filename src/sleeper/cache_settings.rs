//! On-disk caches of Sleeper league settings and the player catalog.

use tracing::{info, warn};

use crate::core::{cache::STALE_AFTER, is_stale, try_read_to_string, write_string, DataPaths};
use crate::sleeper::{
    http::SleeperClient,
    types::{League, PlayerCatalog},
};
use crate::{cli::types::LeagueId, Result};

/// Try to load league settings from the cache first. If missing or
/// `refresh == true`, fetch `/league/{id}` and re-write the cache.
pub async fn load_or_fetch_league(
    client: &SleeperClient,
    paths: &DataPaths,
    league_id: &LeagueId,
    refresh: bool,
) -> Result<League> {
    let path = paths.league_settings(league_id);

    if !refresh {
        if let Some(s) = try_read_to_string(&path) {
            if let Ok(league) = serde_json::from_str::<League>(&s) {
                return Ok(league);
            }
            warn!("Ignoring unreadable league cache at {}", path.display());
        }
    }

    let league = client.get_league(league_id).await?;

    if let Ok(json_str) = serde_json::to_string_pretty(&league) {
        if let Err(e) = write_string(&path, &json_str) {
            warn!("Could not cache league settings at {}: {}", path.display(), e);
        }
    }

    Ok(league)
}

/// Load Sleeper's player catalog from disk, re-downloading it when the file
/// is missing, older than a week, unreadable, or `refresh` is set.
pub async fn load_or_fetch_player_catalog(
    client: &SleeperClient,
    paths: &DataPaths,
    refresh: bool,
) -> Result<PlayerCatalog> {
    let path = paths.player_catalog();

    if !refresh && !is_stale(&path, STALE_AFTER) {
        if let Some(s) = try_read_to_string(&path) {
            match serde_json::from_str::<PlayerCatalog>(&s) {
                Ok(catalog) => return Ok(catalog),
                Err(e) => warn!("Player catalog at {} is corrupt: {}", path.display(), e),
            }
        }
    } else if !refresh {
        info!("Player catalog missing or older than a week, refreshing");
    }

    let catalog = client.get_all_players().await?;
    write_string(&path, &serde_json::to_string(&catalog)?)?;
    info!("Player catalog written to {}", path.display());

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::PlayerId;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[tokio::test]
    async fn test_league_cache_hit_skips_network() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());
        let league_id = LeagueId::new("55");
        write_string(
            &paths.league_settings(&league_id),
            r#"{"league_id":"55","name":"From Disk","scoring_settings":{}}"#,
        )
        .unwrap();

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = SleeperClient::with_base_url(mock_server.uri()).unwrap();
        let league = load_or_fetch_league(&client, &paths, &league_id, false)
            .await
            .unwrap();
        assert_eq!(league.name, "From Disk");
    }

    #[tokio::test]
    async fn test_league_refresh_rewrites_cache() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());
        let league_id = LeagueId::new("55");

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/55"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "league_id": "55",
                "name": "From API",
                "scoring_settings": { "pass_yd": 0.04 }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SleeperClient::with_base_url(mock_server.uri()).unwrap();
        let league = load_or_fetch_league(&client, &paths, &league_id, true)
            .await
            .unwrap();
        assert_eq!(league.name, "From API");

        let cached = try_read_to_string(&paths.league_settings(&league_id)).unwrap();
        assert!(cached.contains("From API"));
    }

    #[tokio::test]
    async fn test_league_cache_without_league_payload_is_refetched() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());
        let league_id = LeagueId::new("55");
        write_string(&paths.league_settings(&league_id), r#"{"pass_td":6.0}"#).unwrap();

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/55"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "league_id": "55",
                "name": "From API",
                "scoring_settings": { "pass_td": 4.0 }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SleeperClient::with_base_url(mock_server.uri()).unwrap();
        let league = load_or_fetch_league(&client, &paths, &league_id, false)
            .await
            .unwrap();
        assert_eq!(league.scoring_settings["pass_td"], 4.0);
    }

    #[tokio::test]
    async fn test_player_catalog_downloaded_when_missing() {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::new(dir.path());

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/players/nfl"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "4046": { "player_id": "4046", "first_name": "Patrick", "last_name": "Mahomes" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SleeperClient::with_base_url(mock_server.uri()).unwrap();
        let catalog = load_or_fetch_player_catalog(&client, &paths, false)
            .await
            .unwrap();
        assert!(catalog.contains_key(&PlayerId::new("4046")));
        assert!(paths.player_catalog().exists());

        // second load comes from disk
        let again = load_or_fetch_player_catalog(&client, &paths, false)
            .await
            .unwrap();
        assert_eq!(again.len(), 1);
    }
}
