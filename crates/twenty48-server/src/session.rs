use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};
use twenty48_engine::engine::{Game, GameState, Move};

/// Holder for the one live game.
///
/// Cloning yields another handle to the same slot. Every operation holds the
/// slot lock for its full duration, so overlapping requests are serialized.
#[derive(Clone)]
pub struct Session {
    inner: Arc<Mutex<Slot>>,
    lock_finished: bool,
}

struct Slot {
    game: Option<Game>,
    /// Process-wide generator; each new game draws its own seed from it.
    seeder: StdRng,
}

impl Session {
    pub fn new(seed: Option<u64>, lock_finished: bool) -> Self {
        let seeder = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            inner: Arc::new(Mutex::new(Slot { game: None, seeder })),
            lock_finished,
        }
    }

    /// Discard the current game (if any) and start a fresh one.
    pub fn new_game(&self) -> GameState {
        let mut slot = self.inner.lock();
        let game = fresh_game(&mut slot.seeder);
        let state = game.state();
        slot.game = Some(game);
        state
    }

    /// Snapshot of the current game, creating one on first access.
    pub fn current(&self) -> GameState {
        let mut slot = self.inner.lock();
        let Slot { game, seeder } = &mut *slot;
        game.get_or_insert_with(|| fresh_game(seeder)).state()
    }

    /// Apply `direction` to the current game (creating one on first access)
    /// and return the resulting snapshot, changed or not.
    pub fn submit_move(&self, direction: Move) -> GameState {
        let mut slot = self.inner.lock();
        let Slot { game, seeder } = &mut *slot;
        let game = game.get_or_insert_with(|| fresh_game(seeder));

        if self.lock_finished && game.is_finished() {
            debug!(%direction, "game finished; move ignored");
            return game.state();
        }

        let (was_won, was_over) = (game.has_won(), game.is_game_over());
        let changed = game.make_move(direction);
        debug!(%direction, changed, score = game.score(), "applied move");
        if game.has_won() && !was_won {
            info!(score = game.score(), "reached 2048");
        }
        if game.is_game_over() && !was_over {
            info!(
                score = game.score(),
                highest_tile = game.board().highest_tile(),
                "game over"
            );
        }
        game.state()
    }

    #[cfg(test)]
    pub(crate) fn install(&self, game: Game) {
        self.inner.lock().game = Some(game);
    }
}

fn fresh_game(seeder: &mut StdRng) -> Game {
    let seed = seeder.next_u64();
    debug!(seed, "starting new game");
    Game::with_seed(seed)
}
