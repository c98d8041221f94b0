//! Rule-based pick classification
//!
//! Applies table-driven hit-count thresholds to assign a risk tier
//! (REJECT / SAFE / NORMAL / MOONSHOT) with a human-readable reason.
//! Every input degrades to a well-defined classification; nothing here
//! returns an error.

use crate::config::ThresholdConfig;
use crate::types::OddsValue;
use serde::{Deserialize, Serialize};

/// Classification outcome labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PickTier {
    Reject,
    Safe,
    Normal,
    Moonshot,
}

impl std::fmt::Display for PickTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Reject => "REJECT",
            Self::Safe => "SAFE",
            Self::Normal => "NORMAL",
            Self::Moonshot => "MOONSHOT",
        };
        f.write_str(s)
    }
}

/// Input tuple for classification
#[derive(Debug, Clone, PartialEq)]
pub struct PickInput {
    pub hits: u32,
    pub games: u32,
    pub window: u32,
    pub odds: Option<OddsValue>,
}

/// Classification result. Computed fresh per input tuple; stateless and
/// idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: PickTier,
    pub reason: String,
    /// Integer confidence in [0, 100]; descriptive metadata about label
    /// strength, distinct from the trend engine's volatility-aware score
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Safe,
    Normal,
    Moonshot,
}

impl Mode {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "safe" => Some(Self::Safe),
            "normal" => Some(Self::Normal),
            "moonshot" => Some(Self::Moonshot),
            _ => None,
        }
    }
}

/// Classifies picks against the configured threshold tables
#[derive(Debug, Clone)]
pub struct PickClassifier {
    thresholds: ThresholdConfig,
}

impl PickClassifier {
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self { thresholds }
    }

    /// Classify one pick under the requested mode.
    ///
    /// Ordering: window validation, then the global-bad gate (applies in
    /// every mode), then mode rules. A failed moonshot eligibility check
    /// falls back to normal-mode rules exactly once.
    pub fn classify(&self, input: &PickInput, mode: &str) -> Classification {
        let confidence = Self::compute_confidence(input.hits, input.games);

        let entry = match self.thresholds.for_games(input.window) {
            Some(entry) => entry,
            None => {
                return Classification {
                    label: PickTier::Reject,
                    reason: format!(
                        "Invalid sample window {}. Allowed: 5, 10, 15.",
                        input.window
                    ),
                    confidence,
                }
            }
        };

        if self.is_global_bad(input.hits, input.window) {
            return Classification {
                label: PickTier::Reject,
                reason: "Global bad pick (blocked in all modes)".to_string(),
                confidence,
            };
        }

        let mut mode = match Mode::parse(mode) {
            Some(m) => m,
            None => {
                return Classification {
                    label: PickTier::Reject,
                    reason: format!("Unknown mode \"{}\"", mode),
                    confidence,
                }
            }
        };

        let mut fell_back = false;
        if mode == Mode::Moonshot {
            if self.moonshot_eligible(input.hits, input.window, input.odds.as_ref()) {
                return Classification {
                    label: PickTier::Moonshot,
                    reason: "Eligible for moonshot: recent capability + odds >= +100"
                        .to_string(),
                    confidence,
                };
            }
            // Mode reassignment happens once, not recursively
            fell_back = true;
            mode = Mode::Normal;
        }

        let in_safe = in_range(input.hits, entry.safe);
        let in_normal = in_range(input.hits, entry.normal);

        let safe_mode = mode == Mode::Safe;
        let (label, reason) = if in_safe {
            (PickTier::Safe, "Meets SAFE thresholds for this window")
        } else if in_normal && safe_mode {
            (PickTier::Normal, "Below SAFE threshold; within NORMAL range")
        } else if in_normal {
            (PickTier::Normal, "Within NORMAL thresholds for this window")
        } else if safe_mode {
            (PickTier::Reject, "Below NORMAL threshold; rejected in SAFE mode")
        } else {
            (PickTier::Reject, "Below NORMAL threshold; rejected")
        };

        let reason = if fell_back {
            format!("Not eligible for moonshot; falling back to normal rules. {}", reason)
        } else {
            reason.to_string()
        };

        Classification {
            label,
            reason,
            confidence,
        }
    }

    /// Hit counts in the window's global-bad range are rejected in every
    /// mode. Unsupported windows are not global-bad; they fail window
    /// validation instead.
    pub fn is_global_bad(&self, hits: u32, window: u32) -> bool {
        self.thresholds
            .for_games(window)
            .map(|entry| in_range(hits, entry.global_bad))
            .unwrap_or(false)
    }

    /// Moonshot requires passing the global-bad gate, the window's minimum
    /// hit count, and parsed American odds of +100 or better. Odds that do
    /// not parse to a finite number disqualify eligibility.
    pub fn moonshot_eligible(&self, hits: u32, window: u32, odds: Option<&OddsValue>) -> bool {
        if self.is_global_bad(hits, window) {
            return false;
        }
        let Some(entry) = self.thresholds.for_games(window) else {
            return false;
        };
        if hits < entry.moonshot_min {
            return false;
        }
        match odds.and_then(|o| o.american()) {
            Some(value) => value >= 100.0,
            None => false,
        }
    }

    /// Sample-size-adjusted confidence: hit rate with a +5 bump for large
    /// samples and a -5 penalty for small ones, clamped to [0, 100].
    /// Intentionally separate from the trend engine's volatility-aware
    /// score.
    pub fn compute_confidence(hits: u32, games: u32) -> u8 {
        if games == 0 {
            return 0;
        }
        let mut base = (hits as f64 / games as f64) * 100.0;
        if games >= 15 {
            base += 5.0;
        } else if games <= 5 {
            base -= 5.0;
        }
        base.clamp(0.0, 100.0).round() as u8
    }
}

impl Default for PickClassifier {
    fn default() -> Self {
        Self::new(ThresholdConfig::default())
    }
}

fn in_range(hits: u32, (lo, hi): (u32, u32)) -> bool {
    hits >= lo && hits <= hi
}
