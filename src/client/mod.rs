//! Upstream data source clients
//!
//! Each provider implements a subset of the `StatSource` contract. Every
//! method returns `Ok(None)` when the provider has nothing for the request;
//! transport and parse failures surface as errors that the aggregator
//! converts into "no contribution" for that source.

pub mod balldontlie;
pub mod nba_stats;
pub mod odds;
pub mod sofascore;
pub mod statmuse;

pub use balldontlie::BallDontLieClient;
pub use nba_stats::NbaStatsClient;
pub use odds::OddsApiClient;
pub use sofascore::SofaScoreClient;
pub use statmuse::StatMuseClient;

use crate::error::Result;
use crate::types::{GameRecord, Player, PlayerProp, ScheduledGame, SeasonAverages};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Contract every stat provider satisfies. Providers that cannot answer a
/// query return `Ok(None)`; the default implementations below let a
/// provider implement only what its upstream offers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatSource: Send + Sync {
    /// Source name used in logs and the aggregated sources map
    fn name(&self) -> &'static str;

    /// Look up a player identity by name
    async fn search_player(&self, _name: &str) -> Result<Option<Player>> {
        Ok(None)
    }

    /// Per-game stat lines within a date range, most recent first
    async fn recent_games(
        &self,
        _player_id: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Option<Vec<GameRecord>>> {
        Ok(None)
    }

    /// Current-season per-game averages
    async fn season_averages(&self, _player_id: &str) -> Result<Option<SeasonAverages>> {
        Ok(None)
    }

    /// Provider-specific statistics payload for a player id, passed
    /// through untyped for downstream explanation
    async fn player_statistics(&self, _player_id: &str) -> Result<Option<serde_json::Value>> {
        Ok(None)
    }

    /// Today's scheduled games
    async fn todays_schedule(&self) -> Result<Option<Vec<ScheduledGame>>> {
        Ok(None)
    }
}

/// Line/odds feed contract, separate from the stat providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsProvider: Send + Sync {
    /// Flattened player props with American odds. `Ok(None)` when the
    /// feed is unavailable (e.g. no API key configured).
    async fn player_props(&self) -> Result<Option<Vec<PlayerProp>>>;
}
