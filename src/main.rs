use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swiss_pairing::api::{build_router, state::AppState};
use swiss_pairing::config::AppConfig;
use swiss_pairing::pairing::PairingStrategy;
use swiss_pairing::standings::win_rate;
use swiss_pairing::storage::{StorageConfig, TournamentStore};
use swiss_pairing::PlayerId;

#[derive(Parser)]
#[command(name = "swiss-pairing")]
#[command(about = "Swiss-system tournament manager")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new player
    Register {
        /// Player's full name (need not be unique)
        name: String,
    },

    /// Record the outcome of a match
    Report {
        /// Id of the winning player
        #[arg(long)]
        winner: PlayerId,

        /// Id of the losing player
        #[arg(long)]
        loser: PlayerId,
    },

    /// Show the current standings
    Standings,

    /// Compute pairings for the next round
    Pairings {
        /// Pairing strategy: "backtracking" or "greedy"
        #[arg(long)]
        strategy: Option<PairingStrategy>,
    },

    /// Show the number of registered players
    Count,

    /// Remove all match records
    DeleteMatches,

    /// Remove all registered players
    DeletePlayers,

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting swiss-pairing v{}", env!("CARGO_PKG_VERSION"));

    let store = TournamentStore::new(StorageConfig::new(config.data_dir.clone()));

    match cli.command {
        Commands::Register { name } => {
            let player = store.register_player(&name)?;
            println!("Registered {} with id {}", player.name, player.id);
        }
        Commands::Report { winner, loser } => {
            store.report_match(winner, loser)?;
            println!("Recorded: {} beat {}", winner, loser);
        }
        Commands::Standings => {
            let standings = store.player_standings()?;
            println!(
                "{:>4}  {:>5}  {:<24} {:>4} {:>6} {:>7} {:>6}",
                "Rank", "Id", "Name", "Wins", "Losses", "Matches", "Win %"
            );
            for (rank, s) in standings.iter().enumerate() {
                println!(
                    "{:>4}  {:>5}  {:<24} {:>4} {:>6} {:>7} {:>5.1}%",
                    rank + 1,
                    s.id,
                    s.name,
                    s.wins,
                    s.losses(),
                    s.matches,
                    win_rate(s) * 100.0
                );
            }
        }
        Commands::Pairings { strategy } => {
            let mut pairing = config.pairing.clone();
            if let Some(strategy) = strategy {
                pairing.strategy = strategy;
            }

            let round = store
                .swiss_pairings(&pairing)
                .context("Failed to compute pairings")?;

            println!("\n=== Next Round ({}) ===", pairing.strategy);
            for (table, p) in round.pairings.iter().enumerate() {
                println!(
                    "Table {:>3}: {} ({}) vs {} ({})",
                    table + 1,
                    p.name1,
                    p.id1,
                    p.name2,
                    p.id2
                );
            }
            if let Some(bye) = &round.bye {
                println!("Bye:       {} ({})", bye.name, bye.id);
            }
            if round.rematches > 0 {
                println!("\nWarning: {} rematch(es) could not be avoided", round.rematches);
            }
        }
        Commands::Count => {
            println!("{}", store.count_players()?);
        }
        Commands::DeleteMatches => {
            let removed = store.delete_matches()?;
            println!("Deleted {} matches", removed);
        }
        Commands::DeletePlayers => {
            let removed = store.delete_players()?;
            println!("Deleted {} players", removed);
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState {
                store: Arc::new(tokio::sync::RwLock::new(store)),
                pairing: Arc::new(config.pairing.clone()),
                cors_origin: config.server.cors_origin.clone(),
            };
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
