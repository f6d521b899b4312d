//! Engine module: 4x4 2048 board, slide/merge ops, tile spawns and
//! win/loss detection. Public API stays small and ergonomic.
//!
//! - `Board` is the plain 4x4 grid of tile values with useful methods.
//! - `Game` owns a board, score, status flags and a per-game RNG.
//! - `GameState` is the serializable snapshot handed to callers.
//! - Free functions mirror the methods when convenient (e.g., `shift`).

mod game;
mod ops;
pub mod state;

pub use game::Game;
pub use state::{Board, GameState, Move, ParseMoveError, Score, Tile, SIZE, WIN_TILE};

pub use ops::{is_game_over, shift};
