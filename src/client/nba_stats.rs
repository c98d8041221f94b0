//! api-sports NBA client
//!
//! Schedule fallback when SofaScore yields nothing. Requires an API key;
//! without one every call reports no data.

use crate::client::StatSource;
use crate::error::Result;
use crate::types::ScheduledGame;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Clone)]
pub struct NbaStatsClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GamesResponse {
    response: Vec<ApiGame>,
}

#[derive(Debug, Deserialize)]
struct ApiGame {
    teams: ApiTeams,
}

#[derive(Debug, Deserialize)]
struct ApiTeams {
    home: ApiTeam,
    visitors: ApiTeam,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    name: String,
}

impl NbaStatsClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl StatSource for NbaStatsClient {
    fn name(&self) -> &'static str {
        "nba_api"
    }

    async fn todays_schedule(&self) -> Result<Option<Vec<ScheduledGame>>> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let today = chrono::Utc::now().date_naive().to_string();
        let url = format!("{}/games", self.base_url);
        let resp: GamesResponse = self
            .http
            .get(&url)
            .query(&[("date", today.as_str())])
            .header("x-rapidapi-key", key)
            .header("x-rapidapi-host", "v2.nba.api-sports.io")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let games: Vec<ScheduledGame> = resp
            .response
            .into_iter()
            .map(|g| ScheduledGame {
                home: g.teams.home.name,
                away: g.teams.visitors.name,
                start_time: None,
            })
            .collect();

        if games.is_empty() {
            Ok(None)
        } else {
            Ok(Some(games))
        }
    }
}
