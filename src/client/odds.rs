//! The Odds API client
//!
//! Flattens bookmaker player-prop markets into `PlayerProp` records with
//! American odds.

use crate::client::OddsProvider;
use crate::error::Result;
use crate::types::{OddsValue, PlayerProp};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const PROP_MARKETS: &str = "player_points,player_rebounds,player_assists";

#[derive(Clone)]
pub struct OddsApiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OddsEvent {
    home_team: String,
    away_team: String,
    #[serde(default)]
    bookmakers: Vec<Bookmaker>,
}

#[derive(Debug, Deserialize)]
struct Bookmaker {
    title: String,
    #[serde(default)]
    markets: Vec<PropMarket>,
}

#[derive(Debug, Deserialize)]
struct PropMarket {
    key: String,
    #[serde(default)]
    outcomes: Vec<PropOutcome>,
}

#[derive(Debug, Deserialize)]
struct PropOutcome {
    /// Player name for player-prop markets
    description: Option<String>,
    point: Option<f64>,
    price: Option<f64>,
}

impl OddsApiClient {
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

    fn flatten(events: Vec<OddsEvent>) -> Vec<PlayerProp> {
        let mut props = Vec::new();
        for event in events {
            let game = format!("{} vs {}", event.home_team, event.away_team);
            // First bookmaker only, matching the upstream's ordering
            let Some(bookmaker) = event.bookmakers.into_iter().next() else {
                continue;
            };
            for market in bookmaker.markets {
                let market_name = market.key.trim_start_matches("player_").to_string();
                for outcome in market.outcomes {
                    let (Some(player_name), Some(point), Some(price)) =
                        (outcome.description, outcome.point, outcome.price)
                    else {
                        continue;
                    };
                    props.push(PlayerProp {
                        player_name,
                        market: market_name.clone(),
                        line: point,
                        odds: OddsValue::Num(price),
                        game: game.clone(),
                        bookmaker: bookmaker.title.clone(),
                    });
                }
            }
        }
        props
    }
}

#[async_trait]
impl OddsProvider for OddsApiClient {
    async fn player_props(&self) -> Result<Option<Vec<PlayerProp>>> {
        let Some(key) = self.api_key.as_deref() else {
            debug!("odds api key not configured, skipping");
            return Ok(None);
        };

        let url = format!("{}/sports/basketball_nba/events", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("apiKey", key),
                ("markets", PROP_MARKETS),
                ("regions", "us"),
                ("oddsFormat", "american"),
            ])
            .send()
            .await?
            .error_for_status()?;

        if let Some(remaining) = resp.headers().get("x-requests-remaining") {
            debug!(remaining = ?remaining, "odds api quota");
        }

        let events: Vec<OddsEvent> = resp.json().await?;
        let props = Self::flatten(events);
        if props.is_empty() {
            Ok(None)
        } else {
            Ok(Some(props))
        }
    }
}
