//! Configuration loading and threshold tables
//!
//! The window-to-range mappings that drive classification and risk colors
//! live here as data, keyed by window size, and are validated at startup so
//! a new window size cannot silently miss a table.

use crate::error::{BotError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Window sizes the engine supports, in games
pub const SUPPORTED_WINDOWS: [u32; 3] = [5, 10, 15];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub parlay: ParlayConfig,
}

impl Config {
    /// Load from a TOML file, falling back to defaults when the file does
    /// not exist. API keys come from the environment.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("PARLAY").separator("__"))
            .build()
            .map_err(|e| BotError::Config(e.to_string()))?;

        let mut cfg: Config = settings
            .try_deserialize()
            .map_err(|e| BotError::Config(e.to_string()))?;

        if cfg.sources.odds_api_key.is_none() {
            cfg.sources.odds_api_key = std::env::var("ODDS_API_KEY").ok();
        }

        cfg.thresholds.validate()?;
        Ok(cfg)
    }
}

/// Upstream endpoints and per-call limits
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_balldontlie_url")]
    pub balldontlie_url: String,
    #[serde(default = "default_sofascore_url")]
    pub sofascore_url: String,
    #[serde(default = "default_nba_url")]
    pub nba_url: String,
    #[serde(default = "default_statmuse_url")]
    pub statmuse_url: String,
    #[serde(default = "default_odds_url")]
    pub odds_url: String,
    #[serde(default)]
    pub odds_api_key: Option<String>,
    /// HTTP client timeout (connection + whole request)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Per-source budget during aggregation; a slower source is skipped,
    /// not awaited
    #[serde(default = "default_source_timeout")]
    pub source_timeout_secs: u64,
}

fn default_balldontlie_url() -> String {
    "https://www.balldontlie.io/api/v1".to_string()
}
fn default_sofascore_url() -> String {
    "https://api.sofascore.com/api/v1".to_string()
}
fn default_nba_url() -> String {
    "https://v2.nba.api-sports.io".to_string()
}
fn default_statmuse_url() -> String {
    "https://www.statmuse.com/nba".to_string()
}
fn default_odds_url() -> String {
    "https://api.the-odds-api.com/v4".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_source_timeout() -> u64 {
    5
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            balldontlie_url: default_balldontlie_url(),
            sofascore_url: default_sofascore_url(),
            nba_url: default_nba_url(),
            statmuse_url: default_statmuse_url(),
            odds_url: default_odds_url(),
            odds_api_key: None,
            request_timeout_secs: default_request_timeout(),
            source_timeout_secs: default_source_timeout(),
        }
    }
}

/// Parlay assembly settings
#[derive(Debug, Clone, Deserialize)]
pub struct ParlayConfig {
    #[serde(default = "default_legs")]
    pub default_legs: usize,
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Names always considered as candidates when the odds feed is thin
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: Vec<String>,
}

fn default_legs() -> usize {
    3
}
fn default_data_file() -> String {
    "data/parlays.json".to_string()
}
fn default_candidate_pool() -> Vec<String> {
    [
        "Stephen Curry",
        "LeBron James",
        "Giannis Antetokounmpo",
        "Kevin Durant",
        "Luka Doncic",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for ParlayConfig {
    fn default() -> Self {
        Self {
            default_legs: default_legs(),
            data_file: default_data_file(),
            candidate_pool: default_candidate_pool(),
        }
    }
}

/// All hit-count thresholds for one window size. Ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WindowThresholds {
    /// Statistically uninformative hit counts, rejected in every mode
    pub global_bad: (u32, u32),
    pub safe: (u32, u32),
    pub normal: (u32, u32),
    /// Minimum hits for moonshot eligibility
    pub moonshot_min: u32,
    /// Color cutoffs: hits >= green_min is green, >= orange_min orange,
    /// else red
    pub green_min: u32,
    pub orange_min: u32,
}

/// Threshold tables keyed by window size (TOML keys are strings, so the
/// map key is "5" / "10" / "15")
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdConfig {
    #[serde(flatten)]
    pub windows: BTreeMap<String, WindowThresholds>,
}

fn default_windows() -> BTreeMap<String, WindowThresholds> {
    let mut map = BTreeMap::new();
    map.insert(
        "5".to_string(),
        WindowThresholds {
            global_bad: (1, 2),
            safe: (4, 5),
            normal: (3, 5),
            moonshot_min: 3,
            green_min: 4,
            orange_min: 2,
        },
    );
    map.insert(
        "10".to_string(),
        WindowThresholds {
            global_bad: (1, 5),
            safe: (8, 10),
            normal: (6, 10),
            moonshot_min: 6,
            green_min: 7,
            orange_min: 4,
        },
    );
    map.insert(
        "15".to_string(),
        WindowThresholds {
            global_bad: (1, 6),
            safe: (13, 15),
            normal: (8, 15),
            moonshot_min: 8,
            green_min: 11,
            orange_min: 6,
        },
    );
    map
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            windows: default_windows(),
        }
    }
}

impl ThresholdConfig {
    /// Look up the table entry for a window size in games
    pub fn for_games(&self, games: u32) -> Option<&WindowThresholds> {
        self.windows.get(&games.to_string())
    }

    /// Every supported window must have a coherent entry. Called once at
    /// startup.
    pub fn validate(&self) -> Result<()> {
        for window in SUPPORTED_WINDOWS {
            let entry = self.for_games(window).ok_or_else(|| {
                BotError::Config(format!("missing threshold entry for window {}", window))
            })?;
            for (name, (lo, hi)) in [
                ("global_bad", entry.global_bad),
                ("safe", entry.safe),
                ("normal", entry.normal),
            ] {
                if lo > hi || hi > window {
                    return Err(BotError::Config(format!(
                        "window {}: {} range [{}, {}] is out of bounds",
                        window, name, lo, hi
                    )));
                }
            }
            if entry.moonshot_min > window || entry.green_min > window {
                return Err(BotError::Config(format!(
                    "window {}: minimum above window size",
                    window
                )));
            }
            if entry.orange_min > entry.green_min {
                return Err(BotError::Config(format!(
                    "window {}: orange_min exceeds green_min",
                    window
                )));
            }
        }
        Ok(())
    }
}
