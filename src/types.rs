//! Core types shared across the engine

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Stat categories we score props against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Points,
    Rebounds,
    Assists,
    Threes,
}

impl StatKey {
    /// Parse an odds-feed market key like `points` or `player_points`
    pub fn from_market(market: &str) -> Option<Self> {
        match market.trim_start_matches("player_") {
            "points" => Some(Self::Points),
            "rebounds" => Some(Self::Rebounds),
            "assists" => Some(Self::Assists),
            "threes" => Some(Self::Threes),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Rebounds => "rebounds",
            Self::Assists => "assists",
            Self::Threes => "threes",
        }
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed game's box-score line for a player, as produced by a
/// stat source. Sequences of these are ordered most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: Option<NaiveDate>,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub threes: f64,
}

impl GameRecord {
    pub fn stat(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Points => self.points,
            StatKey::Rebounds => self.rebounds,
            StatKey::Assists => self.assists,
            StatKey::Threes => self.threes,
        }
    }
}

/// Per-game season averages reported by a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAverages {
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub games_played: u32,
}

/// A player identity plus whatever game history a source supplied.
/// Owned by the aggregator for the duration of one aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    #[serde(default)]
    pub recent_games: Vec<GameRecord>,
}

impl Player {
    /// Mean of `stat` over the first `window` recent games
    pub fn average_stat(&self, stat: StatKey, window: usize) -> f64 {
        let games = self.sample(window);
        if games.is_empty() {
            return 0.0;
        }
        games.iter().map(|g| g.stat(stat)).sum::<f64>() / games.len() as f64
    }

    /// Games in the sample where `stat` met or exceeded `threshold`.
    /// Ties count as hits.
    pub fn hit_count(&self, stat: StatKey, threshold: f64, window: usize) -> u32 {
        self.sample(window)
            .iter()
            .filter(|g| g.stat(stat) >= threshold)
            .count() as u32
    }

    /// Population standard deviation of `stat` over the sample
    pub fn deviation(&self, stat: StatKey, window: usize) -> f64 {
        let games = self.sample(window);
        if games.len() < 2 {
            return 0.0;
        }
        let values: Vec<f64> = games.iter().map(|g| g.stat(stat)).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }

    fn sample(&self, window: usize) -> &[GameRecord] {
        let n = window.min(self.recent_games.len());
        &self.recent_games[..n]
    }
}

/// One scheduled game from a schedule feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub home: String,
    pub away: String,
    pub start_time: Option<DateTime<Utc>>,
}

/// American odds as they come off the wire: a signed number, or a signed
/// string like `"+125"` or `"-110"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OddsValue {
    Num(f64),
    Text(String),
}

impl OddsValue {
    /// Parse to a numeric American odds value. A leading `+` is stripped,
    /// `-` retained. Returns None for anything that is not a finite number.
    pub fn american(&self) -> Option<f64> {
        let parsed = match self {
            Self::Num(n) => Some(*n),
            Self::Text(s) => {
                let trimmed = s.trim();
                let normalized = trimmed.strip_prefix('+').unwrap_or(trimmed);
                normalized.parse::<f64>().ok()
            }
        };
        parsed.filter(|n| n.is_finite())
    }
}

impl std::fmt::Display for OddsValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A player prop offered by an odds feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProp {
    pub player_name: String,
    pub market: String,
    pub line: f64,
    pub odds: OddsValue,
    pub game: String,
    pub bookmaker: String,
}

/// Risk color derived from hit counts (plus the moonshot display variant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Green,
    Orange,
    Red,
    Moonshot,
}

impl RiskColor {
    /// Parse a stored color string. Unknown values map to the neutral
    /// orange, matching the display fallback.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "green" => Self::Green,
            "red" => Self::Red,
            "moonshot" => Self::Moonshot,
            _ => Self::Orange,
        }
    }
}

/// An assembled parlay leg, ready for rendering and persistence.
/// Never mutated by the core after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub player_name: String,
    pub market: String,
    pub line: f64,
    pub odds: OddsValue,
    /// Integer confidence in [0, 100]
    pub confidence: u8,
    pub color: RiskColor,
    pub hit_count: u32,
    pub window_size: u32,
    pub playing_today: bool,
}
