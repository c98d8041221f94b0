//! NBA Parlay Pick Engine
//!
//! Scores historical per-game performance against betting lines and
//! classifies picks into risk tiers for parlay assembly.
//!
//! ## Architecture
//!
//! ```text
//! StatSources (BallDontLie/SofaScore/NBA) → Aggregator → TrendAnalyzer
//!                                               ↓              ↓
//!                         Odds feed → ranking/selection ← (confidence, color)
//!                                               ↓
//!                                     PickClassifier → parlay picks → storage
//! ```

pub mod aggregator;
pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod signals;
pub mod storage;
pub mod types;

#[cfg(test)]
mod types_tests;
