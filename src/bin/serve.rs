//! Headless server: one game, driven entirely over TCP.

use mini_tetris::adapter::{run_server, GameConfig, ServerConfig, SharedGame};
use mini_tetris::core::{rng::clock_seed, Game};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    let seed = GameConfig::try_from_env()?.seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, "new game");
    let game = SharedGame::new(Game::new(seed));

    tokio::select! {
        res = run_server(config, game, None) => res,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            Ok(())
        }
    }
}
