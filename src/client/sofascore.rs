//! SofaScore API client
//!
//! Schedule feed, fallback player lookup, and the per-player statistics
//! passthrough. SofaScore serves browsers, so requests carry a browser
//! user agent.

use crate::client::StatSource;
use crate::error::Result;
use crate::types::{Player, ScheduledGame};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Clone)]
pub struct SofaScoreClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ScheduledEvents {
    events: Vec<SofaEvent>,
}

#[derive(Debug, Deserialize)]
struct SofaEvent {
    tournament: Option<SofaTournament>,
    #[serde(rename = "homeTeam")]
    home_team: SofaTeam,
    #[serde(rename = "awayTeam")]
    away_team: SofaTeam,
    #[serde(rename = "startTimestamp")]
    start_timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SofaTournament {
    #[serde(rename = "uniqueTournament")]
    unique_tournament: Option<SofaNamed>,
}

#[derive(Debug, Deserialize)]
struct SofaNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SofaTeam {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PlayerStatistics {
    statistics: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "type")]
    kind: String,
    entity: Option<SearchEntity>,
}

#[derive(Debug, Deserialize)]
struct SearchEntity {
    id: Option<u64>,
    name: Option<String>,
    position: Option<String>,
    team: Option<SofaTeam>,
    sport: Option<SofaNamed>,
}

impl SofaScoreClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl StatSource for SofaScoreClient {
    fn name(&self) -> &'static str {
        "sofascore"
    }

    async fn search_player(&self, name: &str) -> Result<Option<Player>> {
        let url = format!("{}/search/all", self.base_url);
        let results: SearchResults = self
            .http
            .get(&url)
            .query(&[("q", name)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Take the first basketball player hit
        let player = results.results.into_iter().find_map(|r| {
            if r.kind != "player" {
                return None;
            }
            let entity = r.entity?;
            let is_basketball = entity
                .sport
                .as_ref()
                .map(|s| s.name == "Basketball")
                .unwrap_or(false);
            if !is_basketball {
                return None;
            }
            Some(Player {
                id: entity.id.map(|id| id.to_string()).unwrap_or_default(),
                name: entity.name.unwrap_or_else(|| name.to_string()),
                team: entity.team.map(|t| t.name),
                position: entity.position,
                recent_games: Vec::new(),
            })
        });

        Ok(player)
    }

    async fn player_statistics(&self, player_id: &str) -> Result<Option<serde_json::Value>> {
        let url = format!("{}/player/{}/statistics", self.base_url, player_id);
        let stats: PlayerStatistics = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(stats.statistics)
    }

    async fn todays_schedule(&self) -> Result<Option<Vec<ScheduledGame>>> {
        let today = chrono::Utc::now().date_naive();
        let url = format!(
            "{}/sport/basketball/scheduled-events/{}",
            self.base_url, today
        );
        let scheduled: ScheduledEvents =
            self.http.get(&url).send().await?.error_for_status()?.json().await?;

        let games: Vec<ScheduledGame> = scheduled
            .events
            .into_iter()
            .filter(|e| {
                e.tournament
                    .as_ref()
                    .and_then(|t| t.unique_tournament.as_ref())
                    .map(|t| t.name == "NBA")
                    .unwrap_or(false)
            })
            .map(|e| ScheduledGame {
                home: e.home_team.name,
                away: e.away_team.name,
                start_time: e
                    .start_timestamp
                    .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)),
            })
            .collect();

        debug!(count = games.len(), "sofascore NBA games today");
        if games.is_empty() {
            Ok(None)
        } else {
            Ok(Some(games))
        }
    }
}
