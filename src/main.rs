//! Terminal runner (default binary).
//!
//! Draws the board with the framebuffer renderer and maps keys to actions.
//! With `MINI_TETRIS_ADAPTER=1` the TCP adapter runs alongside and drives the
//! same game.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use mini_tetris::adapter::{AdapterRuntime, GameConfig, ServerConfig, SharedGame};
use mini_tetris::core::{rng::clock_seed, Game};
use mini_tetris::input::{handle_key_event, should_quit, KeyCommand};
use mini_tetris::term::{GameView, TerminalRenderer, Viewport};
use mini_tetris::types::Action;

/// Upper bound on how long a frame may be stale (remote moves).
const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    init_logging();

    let config = GameConfig::try_from_env()?;
    let seed = config.seed.unwrap_or_else(clock_seed);
    let game = SharedGame::new(Game::new(seed));
    tracing::info!(seed, gravity_ms = ?config.gravity_ms, serve = config.serve, "starting");

    let adapter = if config.serve {
        let adapter = AdapterRuntime::start(ServerConfig::try_from_env()?, game.clone())?;
        tracing::info!(addr = %adapter.local_addr(), "adapter enabled");
        Some(adapter)
    } else {
        None
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &game, config.gravity_ms.map(Duration::from_millis));

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(adapter) = adapter {
        adapter.shutdown();
    }
    result
}

/// Logs go to stderr and only when `RUST_LOG` is set; the screen belongs to
/// the game.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .init();
    }
}

fn run(term: &mut TerminalRenderer, game: &SharedGame, gravity: Option<Duration>) -> Result<()> {
    let view = GameView::default();
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_drop = Instant::now();

    loop {
        let snap = game.blocking_snapshot();
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&snap, Viewport::new(w, h));
        term.draw(&fb)?;

        let timeout = match gravity {
            Some(g) => g.saturating_sub(last_drop.elapsed()).min(frame),
            None => frame,
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(KeyCommand::Action(action)) => {
                            let done = game.blocking_dispatch(Some(action));
                            if action == Action::Down {
                                last_drop = Instant::now();
                            }
                            tracing::debug!(
                                action = action.as_str(),
                                outcome = done.outcome.map(|o| o.as_str()),
                                "key"
                            );
                        }
                        Some(KeyCommand::Restart) => {
                            let snap = game.blocking_reset();
                            last_drop = Instant::now();
                            tracing::info!(seed = snap.seed, "restart");
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if let Some(g) = gravity {
            if last_drop.elapsed() >= g {
                game.blocking_dispatch(Some(Action::Down));
                last_drop = Instant::now();
            }
        }
    }
}
