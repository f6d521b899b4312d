//! 2048 board engine.
//!
//! ```
//! use twenty48_engine::engine::{Game, Move};
//!
//! let mut game = Game::with_seed(7);
//! if game.make_move(Move::Left) {
//!     assert!(game.board().count_empty() <= 14);
//! }
//! assert!(!game.state().won);
//! ```

pub mod engine;
