//! BallDontLie API client
//!
//! Primary stat provider: player search, season averages, and per-game
//! stat lines.

use crate::client::StatSource;
use crate::error::Result;
use crate::types::{GameRecord, Player, ScheduledGame, SeasonAverages};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Clone)]
pub struct BallDontLieClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct BdlPage<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct BdlPlayer {
    id: u64,
    first_name: String,
    last_name: String,
    position: Option<String>,
    team: Option<BdlTeam>,
}

#[derive(Debug, Deserialize)]
struct BdlTeam {
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct BdlSeasonAverage {
    pts: f64,
    reb: f64,
    ast: f64,
    games_played: u32,
}

#[derive(Debug, Deserialize)]
struct BdlStat {
    pts: Option<f64>,
    reb: Option<f64>,
    ast: Option<f64>,
    fg3m: Option<f64>,
    game: Option<BdlGame>,
}

#[derive(Debug, Deserialize)]
struct BdlGame {
    date: Option<String>,
    home_team: Option<BdlTeam>,
    visitor_team: Option<BdlTeam>,
}

impl BallDontLieClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl StatSource for BallDontLieClient {
    fn name(&self) -> &'static str {
        "balldontlie"
    }

    async fn search_player(&self, name: &str) -> Result<Option<Player>> {
        let url = format!("{}/players", self.base_url);
        let page: BdlPage<BdlPlayer> = self
            .http
            .get(&url)
            .query(&[("search", name)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(page.data.into_iter().next().map(|p| Player {
            id: p.id.to_string(),
            name: format!("{} {}", p.first_name, p.last_name),
            team: p.team.map(|t| t.full_name),
            position: p.position.filter(|s| !s.is_empty()),
            recent_games: Vec::new(),
        }))
    }

    async fn season_averages(&self, player_id: &str) -> Result<Option<SeasonAverages>> {
        let url = format!("{}/season_averages", self.base_url);
        let page: BdlPage<BdlSeasonAverage> = self
            .http
            .get(&url)
            .query(&[("player_ids[]", player_id)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(page.data.into_iter().next().map(|avg| SeasonAverages {
            points: avg.pts,
            rebounds: avg.reb,
            assists: avg.ast,
            games_played: avg.games_played,
        }))
    }

    async fn recent_games(
        &self,
        player_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Vec<GameRecord>>> {
        let url = format!("{}/stats", self.base_url);
        let page: BdlPage<BdlStat> = self
            .http
            .get(&url)
            .query(&[
                ("player_ids[]", player_id),
                ("start_date", &start.to_string()),
                ("end_date", &end.to_string()),
                ("per_page", "100"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut records: Vec<GameRecord> = page
            .data
            .into_iter()
            .map(|s| GameRecord {
                date: s
                    .game
                    .as_ref()
                    .and_then(|g| g.date.as_deref())
                    .and_then(|d| d.get(..10))
                    .and_then(|d| d.parse().ok()),
                points: s.pts.unwrap_or(0.0),
                rebounds: s.reb.unwrap_or(0.0),
                assists: s.ast.unwrap_or(0.0),
                threes: s.fg3m.unwrap_or(0.0),
            })
            .collect();

        // API returns ascending; callers expect most-recent-first
        records.sort_by(|a, b| b.date.cmp(&a.date));
        debug!(count = records.len(), player_id, "balldontlie game log fetched");

        if records.is_empty() {
            Ok(None)
        } else {
            Ok(Some(records))
        }
    }

    async fn todays_schedule(&self) -> Result<Option<Vec<ScheduledGame>>> {
        let today = chrono::Utc::now().date_naive().to_string();
        let url = format!("{}/games", self.base_url);
        let page: BdlPage<BdlGame> = self
            .http
            .get(&url)
            .query(&[("dates[]", today.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let games: Vec<ScheduledGame> = page
            .data
            .into_iter()
            .filter_map(|g| {
                Some(ScheduledGame {
                    home: g.home_team?.full_name,
                    away: g.visitor_team?.full_name,
                    start_time: None,
                })
            })
            .collect();

        if games.is_empty() {
            Ok(None)
        } else {
            Ok(Some(games))
        }
    }
}
