//! Read-only client for the Sleeper v1 API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    cli::types::LeagueId,
    pfr::fetcher::USER_AGENT,
    sleeper::types::{League, PlayerCatalog, Roster, User},
    Result,
};


/// Base path for the Sleeper v1 API.
pub const SLEEPER_BASE_URL: &str = "https://api.sleeper.app/v1";

#[derive(Debug, Clone)]
pub struct SleeperClient {
    client: Client,
    base_url: String,
}

impl SleeperClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(SLEEPER_BASE_URL)
    }

    /// Point the client somewhere else (a mock server in tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let res = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?;

        Ok(res)
    }

    /// League settings, including the scoring table.
    pub async fn get_league(&self, league_id: &LeagueId) -> Result<League> {
        self.get_json(&format!("/league/{}", league_id)).await
    }

    pub async fn get_rosters(&self, league_id: &LeagueId) -> Result<Vec<Roster>> {
        self.get_json(&format!("/league/{}/rosters", league_id)).await
    }

    pub async fn get_users(&self, league_id: &LeagueId) -> Result<Vec<User>> {
        self.get_json(&format!("/league/{}/users", league_id)).await
    }

    /// Every NFL player Sleeper knows about (several megabytes; Sleeper asks
    /// callers to fetch it at most once a day).
    pub async fn get_all_players(&self) -> Result<PlayerCatalog> {
        info!("Downloading the Sleeper NFL player catalog");
        let catalog: PlayerCatalog = self.get_json("/players/nfl").await?;
        info!("Player catalog has {} entries", catalog.len());
        Ok(catalog)
    }
}
