use anyhow::Context;
use backend::api;
use clap::Parser;
use community_chess::core::{GameConfig, ResetScope, SelectionPolicy};
use community_chess::game::{GameSession, RoundScheduler};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "backend", about = "Community chess game server")]
struct Args {
    /// Port the HTTP API listens on
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Config file; defaults to the user config directory
    #[arg(long, env = "COMMUNITY_CHESS_CONFIG")]
    config: Option<PathBuf>,

    /// Round length in seconds, overriding the config file
    #[arg(long, env = "TURN_LENGTH")]
    turn_length: Option<u64>,

    /// Winner selection: `most_votes` or `probability`
    #[arg(long, env = "SELECTION_POLICY")]
    policy: Option<SelectionPolicy>,

    /// What a reset throws away: `position_and_votes` or `position`
    #[arg(long, env = "RESET_SCOPE")]
    reset_scope: Option<ResetScope>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = GameConfig::load_or_default(args.config.as_deref())
        .context("Failed to load game config")?;
    if let Some(turn_length) = args.turn_length {
        config.turn_length_secs = turn_length;
    }
    if let Some(policy) = args.policy {
        config.selection_policy = policy;
    }
    if let Some(scope) = args.reset_scope {
        config.reset_scope = scope;
    }
    config.validate().context("Invalid game config")?;

    let session = Arc::new(GameSession::new(config));
    let scheduler = RoundScheduler::spawn(Arc::clone(&session));

    let app = api::router(session);
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("[API] Listening on {}", addr);

    tokio::select! {
        served = axum::serve(listener, app) => {
            served.context("HTTP server failed")?;
        }
        stopped = scheduler.join() => {
            if let Err(e) = &stopped {
                error!("[SCHEDULER] Round scheduler stopped: {}", e);
            }
            stopped.context("Round scheduler stopped")?;
        }
    }

    Ok(())
}
