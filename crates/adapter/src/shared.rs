//! One game, many callers.
//!
//! Every operation takes the lock, so moves from the terminal loop and from
//! any number of TCP clients are applied one at a time, in arrival order.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::{Game, GameSnapshot, Outcome};
use crate::types::Action;

/// Result of one dispatched action, taken under the same lock
#[derive(Debug, Clone)]
pub struct Dispatched {
    /// `None` when no action was given (unknown name)
    pub outcome: Option<Outcome>,
    pub snapshot: GameSnapshot,
}

#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<Game>>,
}

impl SharedGame {
    pub fn new(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    /// Apply `action` (if any) and snapshot the result atomically.
    pub async fn dispatch(&self, action: Option<Action>) -> Dispatched {
        let mut game = self.inner.lock().await;
        apply_locked(&mut game, action)
    }

    /// Blocking variant for sync callers. Must not be called from inside an
    /// async context.
    pub fn blocking_dispatch(&self, action: Option<Action>) -> Dispatched {
        let mut game = self.inner.blocking_lock();
        apply_locked(&mut game, action)
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub fn blocking_snapshot(&self) -> GameSnapshot {
        self.inner.blocking_lock().snapshot()
    }

    pub async fn reset(&self) -> GameSnapshot {
        let mut game = self.inner.lock().await;
        game.reset();
        game.snapshot()
    }

    pub fn blocking_reset(&self) -> GameSnapshot {
        let mut game = self.inner.blocking_lock();
        game.reset();
        game.snapshot()
    }
}

impl Default for SharedGame {
    fn default() -> Self {
        Self::new(Game::new_game())
    }
}

fn apply_locked(game: &mut Game, action: Option<Action>) -> Dispatched {
    let outcome = action.map(|a| game.apply(a));
    Dispatched {
        outcome,
        snapshot: game.snapshot(),
    }
}
