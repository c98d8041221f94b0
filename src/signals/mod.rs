//! Trend scoring over a sliding window of recent games
//!
//! Turns a player's recent-game record and a betting line into a hit count,
//! volatility measure, risk color, and confidence score.

pub mod color;

#[cfg(test)]
mod tests;

pub use color::ColorMapper;

use crate::config::ThresholdConfig;
use crate::types::{Player, RiskColor, StatKey};
use serde::{Deserialize, Serialize};

/// Named sampling window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    Last5,
    Last10,
    Last15,
}

impl Window {
    pub fn games(&self) -> u32 {
        match self {
            Self::Last5 => 5,
            Self::Last10 => 10,
            Self::Last15 => 15,
        }
    }

    /// Parse a window name. Unsupported names resolve to the medium
    /// window, the documented safe default.
    pub fn from_name(name: &str) -> Self {
        match name {
            "last_5" | "5" => Self::Last5,
            "last_15" | "15" => Self::Last15,
            _ => Self::Last10,
        }
    }

    /// Map a game count to a supported window, if it is one
    pub fn from_games(games: u32) -> Option<Self> {
        match games {
            5 => Some(Self::Last5),
            10 => Some(Self::Last10),
            15 => Some(Self::Last15),
            _ => None,
        }
    }
}

/// Result of scoring one player/stat/line tuple over a window.
/// Derived per call, never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub hit_count: u32,
    /// Effective sample size: min(requested window, available games)
    pub window_size: u32,
    pub average: f64,
    /// Population standard deviation of the sampled stat
    pub deviation: f64,
    pub color: RiskColor,
    /// Integer confidence in [0, 100]
    pub confidence: u8,
    pub hit_rate: f64,
}

/// Scores recent-game trends against a threshold
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    thresholds: ThresholdConfig,
}

impl TrendAnalyzer {
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self { thresholds }
    }

    /// Score `stat` against `threshold` over the player's most recent
    /// games. When fewer games than the requested window are available the
    /// effective sample size shrinks to what exists, so `hit_rate` stays
    /// within [0, 1].
    pub fn analyze(
        &self,
        player: &Player,
        stat: StatKey,
        threshold: f64,
        window: Window,
    ) -> TrendResult {
        let requested = window.games();
        let window_size = requested.min(player.recent_games.len() as u32);
        if window_size == 0 {
            return TrendResult {
                hit_count: 0,
                window_size: 0,
                average: 0.0,
                deviation: 0.0,
                color: RiskColor::Red,
                confidence: 0,
                hit_rate: 0.0,
            };
        }

        let sample = window_size as usize;
        let hit_count = player.hit_count(stat, threshold, sample);
        let average = player.average_stat(stat, sample);
        let deviation = player.deviation(stat, sample);
        let color = self.determine_color(hit_count, window);
        let confidence =
            self.confidence_score(hit_count, window_size, deviation, average, threshold);

        TrendResult {
            hit_count,
            window_size,
            average,
            deviation,
            color,
            confidence,
            hit_rate: hit_count as f64 / window_size as f64,
        }
    }

    /// Color from hit count and the window's table entry. A window with no
    /// table entry maps to `Red`, the most conservative bucket.
    fn determine_color(&self, hit_count: u32, window: Window) -> RiskColor {
        let Some(entry) = self.thresholds.for_games(window.games()) else {
            return RiskColor::Red;
        };
        if hit_count >= entry.green_min {
            RiskColor::Green
        } else if hit_count >= entry.orange_min {
            RiskColor::Orange
        } else {
            RiskColor::Red
        }
    }

    /// Volatility-aware confidence score.
    ///
    /// Starts from the hit rate, subtracts a capped volatility penalty
    /// (normalized deviation x 20), then adjusts for the cushion between
    /// the average and the line: +5 when the average clears the line by
    /// more than 15%, -10 when it sits more than 5% below. Clamped to
    /// [0, 100].
    ///
    /// When the sample average is zero the deviation/average ratio is
    /// undefined; the normalized deviation is taken as 1, the maximum
    /// penalty, since a zero average holds no support for the pick.
    fn confidence_score(
        &self,
        hit_count: u32,
        window_size: u32,
        deviation: f64,
        average: f64,
        threshold: f64,
    ) -> u8 {
        let mut score = (hit_count as f64 / window_size as f64) * 100.0;

        let normalized_deviation = if average > 0.0 {
            (deviation / average).min(1.0)
        } else {
            1.0
        };
        score -= normalized_deviation * 20.0;

        if threshold > 0.0 {
            let cushion = ((average - threshold) / threshold) * 100.0;
            if cushion > 15.0 {
                score += 5.0;
            } else if cushion < -5.0 {
                score -= 10.0;
            }
        }

        score.clamp(0.0, 100.0).round() as u8
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new(ThresholdConfig::default())
    }
}
