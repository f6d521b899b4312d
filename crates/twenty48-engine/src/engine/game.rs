use rand::rngs::StdRng;
use rand::SeedableRng;

use super::ops;
use super::state::{Board, GameState, Move, Score, WIN_TILE};

/// A live game: board, score and status flags plus the game's own RNG.
///
/// The RNG is seeded once when the game is created and reused for every
/// spawn, so a seeded game replays identically for the same move sequence.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    score: Score,
    game_over: bool,
    won: bool,
    rng: StdRng,
}

impl Game {
    /// Fresh game seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Fresh game with a deterministic tile sequence.
    ///
    /// ```
    /// use twenty48_engine::engine::Game;
    /// let a = Game::with_seed(42);
    /// let b = Game::with_seed(42);
    /// assert_eq!(a.state(), b.state());
    /// assert_eq!(a.board().count_empty(), 14);
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Empty board, zero score, then two spawned tiles.
    pub fn from_rng(rng: StdRng) -> Self {
        let mut game = Self::from_parts(Board::EMPTY, 0, rng);
        game.spawn_tile();
        game.spawn_tile();
        game
    }

    /// Resume from an arbitrary position. Status flags start cleared and are
    /// only evaluated after the next changing move (or an explicit
    /// [`Game::check_status`]).
    pub fn from_parts(board: Board, score: Score, rng: StdRng) -> Self {
        Self {
            board,
            score,
            game_over: false,
            won: false,
            rng,
        }
    }

    #[inline]
    pub fn board(&self) -> Board {
        self.board
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[inline]
    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Either terminal flag is set.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.won || self.game_over
    }

    /// Place a 2 or 4 on a random empty cell. No-op on a full board.
    pub fn spawn_tile(&mut self) -> Option<(usize, usize)> {
        ops::insert_random_tile(&mut self.board, &mut self.rng)
    }

    /// Slide/merge in `direction`. If the board changed, add the merge score,
    /// spawn a tile and re-evaluate status. Returns whether the board changed.
    ///
    /// Terminal flags do not block further moves.
    pub fn make_move(&mut self, direction: Move) -> bool {
        let (moved, gained) = ops::shift(self.board, direction);
        if moved == self.board {
            return false;
        }
        self.board = moved;
        self.score += gained;
        self.spawn_tile();
        self.check_status();
        true
    }

    /// Set `won` if a 2048 tile is present; otherwise set `game_over` if the
    /// board is full with no adjacent equal pair. Flags are never cleared.
    pub fn check_status(&mut self) {
        if self.board.contains_tile(WIN_TILE) {
            self.won = true;
            return;
        }
        if ops::is_game_over(&self.board) {
            self.game_over = true;
        }
    }

    /// Serializable snapshot of the current position.
    pub fn state(&self) -> GameState {
        GameState {
            board: self.board,
            score: self.score,
            game_over: self.game_over,
            won: self.won,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
