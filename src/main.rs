//! NBA parlay pick engine CLI
//!
//! Thin front-end over the library: generates parlays, inspects player
//! aggregation, classifies hypothetical picks, and lists history.

use clap::{Parser, Subcommand};
use parlay_bot::{
    aggregator::DataManager,
    classifier::{PickClassifier, PickInput},
    config::Config,
    signals::ColorMapper,
    storage::{ParlayResult, ParlayStore},
    types::OddsValue,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "parlay-bot")]
#[command(about = "Trend-scored NBA parlay pick generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a parlay of top-ranked picks
    Generate {
        /// Number of legs
        #[arg(short, long)]
        legs: Option<usize>,
        /// Pick mode: safe, normal, or moonshot
        #[arg(short, long, default_value = "normal")]
        mode: String,
    },
    /// Aggregate everything the sources know about one player
    Aggregate {
        /// Player name
        player: String,
    },
    /// Classify a hits/games/window/odds tuple
    Classify {
        #[arg(long)]
        hits: u32,
        #[arg(long)]
        games: u32,
        #[arg(long)]
        window: u32,
        /// American odds, e.g. -110 or +125
        #[arg(long, allow_hyphen_values = true)]
        odds: Option<String>,
        #[arg(long, default_value = "normal")]
        mode: String,
    },
    /// Show today's scheduled games
    Games,
    /// Show discoverable player props
    Props,
    /// Show recorded parlay history
    History,
    /// Grade a recorded parlay
    Grade {
        /// Parlay id
        id: String,
        /// Outcome: win or loss
        result: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Generate { legs, mode } => {
            let legs = legs.unwrap_or(config.parlay.default_legs);
            let manager = DataManager::from_config(&config)?;
            let picks = manager.generate_parlay(legs, &mode).await?;

            println!("Parlay ({} legs, {} mode):", picks.len(), mode);
            for pick in &picks {
                println!(
                    "  {} {} over {} @ {} | {}% {} | {}",
                    pick.player_name,
                    pick.market,
                    pick.line,
                    pick.odds,
                    pick.confidence,
                    ColorMapper::display_string(pick.color, pick.hit_count, pick.window_size),
                    if pick.playing_today { "playing today" } else { "not confirmed today" },
                );
            }
        }
        Commands::Aggregate { player } => {
            let manager = DataManager::from_config(&config)?;
            let info = manager.aggregate_player(&player).await;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Classify {
            hits,
            games,
            window,
            odds,
            mode,
        } => {
            let classifier = PickClassifier::new(config.thresholds.clone());
            let input = PickInput {
                hits,
                games,
                window,
                odds: odds.map(OddsValue::Text),
            };
            let result = classifier.classify(&input, &mode);
            println!("{} ({}%): {}", result.label, result.confidence, result.reason);
        }
        Commands::Games => {
            let manager = DataManager::from_config(&config)?;
            let games = manager.todays_games().await;
            if games.is_empty() {
                println!("No games found today");
            }
            for game in games {
                println!("  {} vs {}", game.home, game.away);
            }
        }
        Commands::Props => {
            let manager = DataManager::from_config(&config)?;
            for prop in manager.player_props().await {
                println!(
                    "  {} {} {} @ {} ({}, {})",
                    prop.player_name, prop.market, prop.line, prop.odds, prop.game, prop.bookmaker
                );
            }
        }
        Commands::History => {
            let store = ParlayStore::new(&config.parlay.data_file);
            let history = store.history();
            if history.is_empty() {
                println!("No parlays recorded yet");
            }
            for entry in history {
                let outcome = match entry.result {
                    Some(ParlayResult::Win) => "win",
                    Some(ParlayResult::Loss) => "loss",
                    None => "ungraded",
                };
                println!(
                    "  {} [{}] {} legs, {} mode ({})",
                    entry.id,
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.picks.len(),
                    entry.meta.mode,
                    outcome,
                );
            }
        }
        Commands::Grade { id, result } => {
            let outcome = match result.as_str() {
                "win" => ParlayResult::Win,
                "loss" => ParlayResult::Loss,
                other => anyhow::bail!("unknown result {:?}, expected win or loss", other),
            };
            let store = ParlayStore::new(&config.parlay.data_file);
            if store.grade(&id, outcome)? {
                println!("Graded {} as {}", id, result);
            } else {
                println!("No parlay with id {}", id);
            }
        }
    }

    Ok(())
}
