//! Blocking-style, strictly sequential fetches from the stats site.
//!
//! Status handling:
//! - 503 / 504: retried up to `RetryPolicy::max_attempts` with a fixed delay,
//!   then reported as [`FetchOutcome::Failed`]
//! - 404: [`FetchOutcome::NotFound`], no retry
//! - 429: [`FetchOutcome::RateLimited`], no retry; callers stop the run
//! - any other error status: [`FetchOutcome::Failed`], no retry

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{error, info, warn};

use crate::{
    cli::types::{PfrId, Season},
    pfr::table::{parse_birth_date, parse_first_table, season_years, WeeklyStatTable},
    FflError, Result,
};


/// Production stats site.
pub const PFR_BASE_URL: &str = "https://www.pro-football-reference.com";

pub const USER_AGENT: &str = concat!("sleeper-ffl/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

/// Pacing and retry knobs for a run against the stats site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchConfig {
    pub retry: RetryPolicy,
    /// Pause after every game log fetch.
    pub pace: Duration,
    /// Pause after every failed identifier probe.
    pub probe_pace: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            pace: Duration::from_secs(5),
            probe_pace: Duration::from_secs(1),
        }
    }
}

impl FetchConfig {
    /// No waiting at all; for tests.
    pub fn immediate() -> Self {
        Self {
            retry: RetryPolicy {
                max_attempts: 5,
                delay: Duration::ZERO,
            },
            pace: Duration::ZERO,
            probe_pace: Duration::ZERO,
        }
    }
}

/// Result of one logical fetch. Only transport errors are `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fetched(T),
    /// 404: the id is not valid (for that year).
    NotFound,
    /// 429: stop issuing requests for this run.
    RateLimited,
    /// Retries exhausted or an unexpected status.
    Failed { status: Option<u16> },
}

impl<T> FetchOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Fetched(t) => FetchOutcome::Fetched(f(t)),
            FetchOutcome::NotFound => FetchOutcome::NotFound,
            FetchOutcome::RateLimited => FetchOutcome::RateLimited,
            FetchOutcome::Failed { status } => FetchOutcome::Failed { status },
        }
    }

    pub fn fetched(self) -> Option<T> {
        match self {
            FetchOutcome::Fetched(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatsFetcher {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl StatsFetcher {
    pub fn new(retry: RetryPolicy) -> Result<Self> {
        Self::with_base_url(PFR_BASE_URL, retry)
    }

    pub fn with_base_url(base_url: impl Into<String>, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
        })
    }

    /// The configured HTTP client, for other downloads in the same run.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// `/players/{bucket}/{id}.htm`
    pub fn player_page_url(&self, pfr_id: &PfrId) -> String {
        format!("{}/players/{}/{}.htm", self.base_url, pfr_id.bucket(), pfr_id)
    }

    /// `/players/{bucket}/{id}/gamelog/{year}/`
    pub fn gamelog_url(&self, pfr_id: &PfrId, season: Season) -> String {
        format!(
            "{}/players/{}/{}/gamelog/{}/",
            self.base_url,
            pfr_id.bucket(),
            pfr_id,
            season
        )
    }

    /// GET `url` and return the body, applying the retry rules above.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchOutcome<String>> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last_status = None;

        for attempt in 1..=attempts {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(FetchOutcome::Fetched(response.text().await?));
            }

            last_status = Some(status.as_u16());
            match status {
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                    warn!(
                        "HTTP {} from {}. Retrying {}/{}",
                        status.as_u16(),
                        url,
                        attempt,
                        attempts
                    );
                    if attempt < attempts {
                        tokio::time::sleep(self.retry.delay).await;
                    }
                }
                StatusCode::NOT_FOUND => {
                    warn!("HTTP 404 from {}, not a valid page", url);
                    return Ok(FetchOutcome::NotFound);
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    error!("HTTP 429 from {}, too many requests", url);
                    return Ok(FetchOutcome::RateLimited);
                }
                _ => break,
            }
        }

        error!(
            "Failed to retrieve {} (last status {:?})",
            url, last_status
        );
        Ok(FetchOutcome::Failed {
            status: last_status,
        })
    }

    /// One season's game log, normalized. A page without a table gives an
    /// empty table.
    pub async fn gamelog(
        &self,
        pfr_id: &PfrId,
        season: Season,
    ) -> Result<FetchOutcome<WeeklyStatTable>> {
        let url = self.gamelog_url(pfr_id, season);
        info!("Getting gamelogs for {}", url);

        let outcome = self.fetch_page(&url).await?.map(|html| {
            let table = parse_first_table(&html);
            if table.is_empty() {
                warn!("{} contains no tables", url);
            }
            table
        });
        Ok(outcome)
    }

    /// Seasons the player has a row for on their overview page.
    pub async fn years_of_service(&self, pfr_id: &PfrId) -> Result<FetchOutcome<Vec<Season>>> {
        let url = self.player_page_url(pfr_id);
        info!("Getting years of service for {}", url);

        let outcome = self
            .fetch_page(&url)
            .await?
            .map(|html| season_years(&parse_first_table(&html)));
        Ok(outcome)
    }

    /// Birth date on the player's overview page, used to confirm a guessed id.
    pub async fn birth_date(&self, pfr_id: &PfrId) -> Result<FetchOutcome<Option<String>>> {
        let url = self.player_page_url(pfr_id);
        info!("Getting birth date for {}", url);

        let outcome = self.fetch_page(&url).await?.map(|html| parse_birth_date(&html));
        Ok(outcome)
    }
}

/// Turn a rate-limit outcome into the run-stopping error.
pub fn stop_on_rate_limit<T>(outcome: FetchOutcome<T>, url: String) -> Result<FetchOutcome<T>> {
    match outcome {
        FetchOutcome::RateLimited => Err(FflError::RateLimited { url }),
        other => Ok(other),
    }
}
