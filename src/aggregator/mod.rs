//! Multi-source data assembly
//!
//! `DataManager` queries stat sources in priority order per player, merges
//! whatever succeeds, derives a working line when the odds feed has none,
//! and scores the result with the trend analyzer. Every source call is
//! independently guarded: a failure or timeout skips that source's
//! contribution and never aborts the player or the batch.


use crate::client::{OddsProvider, StatMuseClient, StatSource};
use crate::config::Config;
use crate::error::Result;
use crate::signals::{TrendAnalyzer, TrendResult, Window};
use crate::storage::{ParlayMeta, ParlayStore};
use crate::types::{
    OddsValue, Pick, Player, PlayerProp, RiskColor, ScheduledGame, SeasonAverages, StatKey,
};
use chrono::Utc;
use futures_util::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Confidence assigned when no usable game record exists. Observable as a
/// fallback through the absence of trend data.
pub const NEUTRAL_CONFIDENCE: u8 = 50;

/// Fixed default line when neither the odds feed nor season averages
/// supply one
pub const DEFAULT_LINE: f64 = 20.5;

/// Minimum recent games before the trend analyzer is consulted
pub const MIN_TREND_GAMES: usize = 5;

/// How far back to ask sources for game logs
const GAME_LOG_DAYS: i64 = 60;

/// Everything assembled for one player in one aggregation pass
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedInfo {
    pub player_name: String,
    /// Source name -> raw contribution, for downstream explanation
    pub sources: BTreeMap<String, serde_json::Value>,
    /// Integer confidence in [0, 100]
    pub confidence: u8,
    pub playing_today: bool,
    pub team: Option<String>,
    pub season_averages: Option<SeasonAverages>,
    /// None means the confidence is the neutral fallback, not a trend
    /// score
    pub trend: Option<TrendResult>,
    /// The line the trend was scored against (derived when no feed line
    /// exists)
    pub line: f64,
    /// Matched odds-feed prop, when one exists
    pub prop: Option<PlayerProp>,
}

/// A player identity plus the season averages found alongside it
#[derive(Debug, Clone)]
pub struct EnrichedPlayer {
    pub identity: Player,
    pub season_averages: Option<SeasonAverages>,
    /// Name of the source that supplied the identity
    pub source: &'static str,
}

/// Assembles per-player records from the configured sources and builds
/// ranked parlays from them.
pub struct DataManager {
    stat_sources: Vec<Arc<dyn StatSource>>,
    odds: Arc<dyn OddsProvider>,
    statmuse: Option<StatMuseClient>,
    analyzer: TrendAnalyzer,
    candidate_pool: Vec<String>,
    source_timeout: Duration,
    store: ParlayStore,
}

impl DataManager {
    /// Wire up the real providers from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        use crate::client::{BallDontLieClient, NbaStatsClient, OddsApiClient, SofaScoreClient};

        let s = &config.sources;
        let timeout = s.request_timeout_secs;
        let nba_key = std::env::var("NBA_API_KEY").ok();

        let stat_sources: Vec<Arc<dyn StatSource>> = vec![
            Arc::new(BallDontLieClient::new(&s.balldontlie_url, timeout)?),
            Arc::new(SofaScoreClient::new(&s.sofascore_url, timeout)?),
            Arc::new(NbaStatsClient::new(&s.nba_url, nba_key, timeout)?),
        ];
        let odds = Arc::new(OddsApiClient::new(
            &s.odds_url,
            s.odds_api_key.clone(),
            timeout,
        )?);
        let statmuse = StatMuseClient::new(&s.statmuse_url, timeout).ok();

        Ok(Self {
            stat_sources,
            odds,
            statmuse,
            analyzer: TrendAnalyzer::new(config.thresholds.clone()),
            candidate_pool: config.parlay.candidate_pool.clone(),
            source_timeout: Duration::from_secs(s.source_timeout_secs),
            store: ParlayStore::new(&config.parlay.data_file),
        })
    }

    /// Construct with explicit sources, used by tests and alternative
    /// wirings
    pub fn with_sources(
        stat_sources: Vec<Arc<dyn StatSource>>,
        odds: Arc<dyn OddsProvider>,
        analyzer: TrendAnalyzer,
        candidate_pool: Vec<String>,
        store: ParlayStore,
    ) -> Self {
        Self {
            stat_sources,
            odds,
            statmuse: None,
            analyzer,
            candidate_pool,
            source_timeout: Duration::from_secs(5),
            store,
        }
    }

    /// Await a source call with the per-source budget, converting failure
    /// or timeout into "no contribution"
    async fn guarded<T, F>(&self, source: &str, call: F) -> Option<T>
    where
        F: Future<Output = Result<Option<T>>>,
    {
        match tokio::time::timeout(self.source_timeout, call).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                warn!(source, error = %e, "source call failed, skipping");
                None
            }
            Err(_) => {
                warn!(source, "source call timed out, skipping");
                None
            }
        }
    }

    /// Walk the stat sources in priority order, adopting the first
    /// identity found and filling season averages, game logs, and team
    /// from later sources only where earlier ones left gaps.
    pub async fn enrich_player(&self, name: &str) -> Option<EnrichedPlayer> {
        let mut enriched: Option<EnrichedPlayer> = None;

        for source in &self.stat_sources {
            let source_name = source.name();
            let complete = enriched.as_ref().is_some_and(|e| {
                e.season_averages.is_some() && !e.identity.recent_games.is_empty()
            });
            if complete {
                break;
            }

            let Some(found) = self.guarded(source_name, source.search_player(name)).await
            else {
                continue;
            };
            let player_id = found.id.clone();

            match &mut enriched {
                None => {
                    enriched = Some(EnrichedPlayer {
                        identity: found,
                        season_averages: None,
                        source: source_name,
                    });
                }
                Some(e) => {
                    if e.identity.team.is_none() {
                        e.identity.team = found.team;
                    }
                    if e.identity.position.is_none() {
                        e.identity.position = found.position;
                    }
                }
            }
            let e = enriched.as_mut().expect("just populated");

            if player_id.is_empty() {
                continue;
            }
            if e.season_averages.is_none() {
                e.season_averages = self
                    .guarded(source_name, source.season_averages(&player_id))
                    .await;
            }
            if e.identity.recent_games.is_empty() {
                let end = Utc::now().date_naive();
                let start = end - chrono::Duration::days(GAME_LOG_DAYS);
                if let Some(games) = self
                    .guarded(source_name, source.recent_games(&player_id, start, end))
                    .await
                {
                    e.identity.recent_games = games;
                }
            }
        }

        enriched
    }

    /// Assemble everything the sources know about one player and score it.
    ///
    /// With at least `MIN_TREND_GAMES` recent games the confidence comes
    /// from the trend analyzer over the medium window; otherwise it is the
    /// neutral fallback and `trend` stays `None`.
    pub async fn aggregate_player(&self, name: &str) -> AggregatedInfo {
        let props = self.guarded("odds", self.odds.player_props()).await;
        self.aggregate_with_props(name, props.as_deref()).await
    }

    /// Aggregation against an already-fetched prop list, so a batch pass
    /// hits the odds feed once
    pub async fn aggregate_with_props(
        &self,
        name: &str,
        props: Option<&[PlayerProp]>,
    ) -> AggregatedInfo {
        let mut info = AggregatedInfo {
            player_name: name.to_string(),
            sources: BTreeMap::new(),
            confidence: NEUTRAL_CONFIDENCE,
            playing_today: false,
            team: None,
            season_averages: None,
            trend: None,
            line: DEFAULT_LINE,
            prop: None,
        };

        let enriched = self.enrich_player(name).await;
        if let Some(e) = &enriched {
            info.team = e.identity.team.clone();
            info.season_averages = e.season_averages.clone();
            if let Ok(value) = serde_json::to_value(&e.identity) {
                info.sources.insert(e.source.to_string(), value);
            }
        }

        // SofaScore keeps a per-player statistics payload under its own id
        // namespace; attach it whenever that id can be resolved
        if let Some(sofa) = self.stat_sources.iter().find(|s| s.name() == "sofascore") {
            let sofa_id = match &enriched {
                Some(e) if e.source == "sofascore" && !e.identity.id.is_empty() => {
                    Some(e.identity.id.clone())
                }
                _ => self
                    .guarded("sofascore", sofa.search_player(name))
                    .await
                    .map(|p| p.id)
                    .filter(|id| !id.is_empty()),
            };
            if let Some(id) = sofa_id {
                if let Some(stats) = self
                    .guarded("sofascore", sofa.player_statistics(&id))
                    .await
                {
                    info.sources.insert("sofascore_stats".to_string(), stats);
                }
            }
        }

        if let Some(statmuse) = &self.statmuse {
            if let Some(url) = self
                .guarded("statmuse", statmuse.career_stats_url(name))
                .await
            {
                info.sources
                    .insert("statmuse".to_string(), serde_json::json!({ "url": url }));
            }
        }

        if let Some(props) = props {
            if let Some(matched) = match_prop(props, name) {
                if let Ok(value) = serde_json::to_value(matched) {
                    info.sources.insert("odds".to_string(), value);
                }
                info.playing_today = true;
                info.prop = Some(matched.clone());
            }
        }

        // Crude line heuristic: feed line if matched, else season scoring
        // average plus one, else the fixed default
        info.line = info
            .prop
            .as_ref()
            .map(|p| p.line)
            .or_else(|| {
                info.season_averages
                    .as_ref()
                    .map(|avg| (avg.points + 1.0).round())
            })
            .unwrap_or(DEFAULT_LINE);

        match enriched {
            Some(e) if e.identity.recent_games.len() >= MIN_TREND_GAMES => {
                let trend =
                    self.analyzer
                        .analyze(&e.identity, StatKey::Points, info.line, Window::Last10);
                info!(
                    player = name,
                    confidence = trend.confidence,
                    hits = trend.hit_count,
                    window = trend.window_size,
                    "trend confidence computed"
                );
                info.confidence = trend.confidence;
                info.trend = Some(trend);
            }
            _ => {
                debug!(player = name, "insufficient game data, neutral confidence");
            }
        }

        info
    }

    /// Today's schedule via the source priority chain; empty when nothing
    /// answers
    pub async fn todays_games(&self) -> Vec<ScheduledGame> {
        for source in &self.stat_sources {
            let name = source.name();
            if let Some(games) = self.guarded(name, source.todays_schedule()).await {
                if !games.is_empty() {
                    info!(source = name, count = games.len(), "schedule fetched");
                    return games;
                }
            }
        }
        warn!("no source produced a schedule today");
        Vec::new()
    }

    /// Prop discovery with a strictly ordered fallback chain: inferred
    /// props from schedule + enrichment first, then the odds feed, then
    /// the built-in fixture set. A later stage runs only when the earlier
    /// one produced nothing usable.
    pub async fn player_props(&self) -> Vec<PlayerProp> {
        let schedule = self.todays_games().await;
        if !schedule.is_empty() {
            let props = self.inferred_props(&schedule).await;
            if !props.is_empty() {
                info!(count = props.len(), "built inferred props from schedule");
                return props;
            }
        }

        if let Some(props) = self.guarded("odds", self.odds.player_props()).await {
            if !props.is_empty() {
                info!(count = props.len(), "got props from odds feed");
                return props;
            }
        }

        warn!("no live prop data, using fixture props");
        fixture_props()
    }

    async fn inferred_props(&self, schedule: &[ScheduledGame]) -> Vec<PlayerProp> {
        let teams_playing: Vec<String> = schedule
            .iter()
            .flat_map(|g| [g.home.to_lowercase(), g.away.to_lowercase()])
            .collect();

        let mut props = Vec::new();
        for name in &self.candidate_pool {
            let Some(e) = self.enrich_player(name).await else {
                continue;
            };
            let Some(team) = e.identity.team.as_ref().map(|t| t.to_lowercase()) else {
                continue;
            };
            let playing = teams_playing
                .iter()
                .any(|t| t.contains(&team) || team.contains(t));
            if !playing {
                continue;
            }

            let line = e
                .season_averages
                .as_ref()
                .map(|avg| (avg.points + 1.0).round())
                .unwrap_or(DEFAULT_LINE);

            let reference = match &self.statmuse {
                Some(statmuse) => {
                    self.guarded("statmuse", statmuse.career_stats_url(name)).await
                }
                None => None,
            };

            props.push(PlayerProp {
                player_name: e.identity.name,
                market: StatKey::Points.to_string(),
                line,
                odds: OddsValue::Num(-110.0),
                game: "TBD (inferred)".to_string(),
                bookmaker: reference.unwrap_or_else(|| "inferred".to_string()),
            });
        }
        props
    }

    /// Build a ranked parlay: aggregate every candidate concurrently, sort
    /// playing-today first then confidence descending (stable on ties),
    /// and take the top `legs`.
    pub async fn generate_parlay(&self, legs: usize, mode: &str) -> Result<Vec<Pick>> {
        let props = self.guarded("odds", self.odds.player_props()).await;

        // Candidates from the odds feed first, then the configured pool,
        // deduplicated preserving first-seen order
        let mut candidates: Vec<String> = Vec::new();
        if let Some(props) = &props {
            for prop in props {
                if !candidates.contains(&prop.player_name) {
                    candidates.push(prop.player_name.clone());
                }
            }
        }
        for name in &self.candidate_pool {
            if !candidates.contains(name) {
                candidates.push(name.clone());
            }
        }

        // Subjects are independent; fan out and rank only after all have
        // settled
        let mut aggregated: Vec<AggregatedInfo> = join_all(
            candidates
                .iter()
                .map(|name| self.aggregate_with_props(name, props.as_deref())),
        )
        .await;

        aggregated.sort_by(|a, b| {
            b.playing_today
                .cmp(&a.playing_today)
                .then(b.confidence.cmp(&a.confidence))
        });

        let picks: Vec<Pick> = aggregated.into_iter().take(legs).map(build_pick).collect();

        let meta = ParlayMeta {
            legs,
            mode: mode.to_string(),
            generated_at: Utc::now(),
        };
        if let Err(e) = self.store.record(&picks, meta) {
            warn!(error = %e, "failed to persist generated parlay");
        }

        Ok(picks)
    }
}

fn build_pick(info: AggregatedInfo) -> Pick {
    let (market, odds) = match &info.prop {
        Some(prop) => (prop.market.clone(), prop.odds.clone()),
        None => (StatKey::Points.to_string(), OddsValue::Num(-110.0)),
    };
    let (color, hit_count, window_size) = match &info.trend {
        Some(trend) => (trend.color, trend.hit_count, trend.window_size),
        None => (RiskColor::Orange, 0, 0),
    };
    Pick {
        player_name: info.player_name,
        market,
        line: info.line,
        odds,
        confidence: info.confidence,
        color,
        hit_count,
        window_size,
        playing_today: info.playing_today,
    }
}

/// Match a player against the odds feed by name, case-insensitive; a
/// feed entry containing the player's first name counts, matching the
/// loose matching the feed's naming requires
fn match_prop<'a>(props: &'a [PlayerProp], name: &str) -> Option<&'a PlayerProp> {
    let lower = name.to_lowercase();
    let first = lower.split_whitespace().next().unwrap_or(&lower).to_string();
    props.iter().find(|p| {
        let feed_name = p.player_name.to_lowercase();
        feed_name == lower || feed_name.contains(&first)
    })
}

fn fixture_props() -> Vec<PlayerProp> {
    [
        ("Stephen Curry", 28.5, -110.0, "Golden State Warriors vs Los Angeles Lakers"),
        ("LeBron James", 25.5, -115.0, "Los Angeles Lakers vs Golden State Warriors"),
        ("Giannis Antetokounmpo", 34.5, -120.0, "Milwaukee Bucks vs Brooklyn Nets"),
    ]
    .into_iter()
    .map(|(name, line, odds, game)| PlayerProp {
        player_name: name.to_string(),
        market: StatKey::Points.to_string(),
        line,
        odds: OddsValue::Num(odds),
        game: game.to_string(),
        bookmaker: "Fixture".to_string(),
    })
    .collect()
}
