use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::ops;
use serde::Serialize;

pub const SIZE: usize = 4;

/// Tile value that wins the game.
pub const WIN_TILE: Tile = 2048;

pub type Tile = u32;
pub type Score = u64;
pub(crate) type Line = [Tile; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Wire name of the direction (`"up"`, `"down"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction {0:?}")]
pub struct ParseMoveError(pub String);

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Exact, case-sensitive match on the four lowercase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Move::Up),
            "down" => Ok(Move::Down),
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            other => Err(ParseMoveError(other.to_string())),
        }
    }
}

/// 4x4 grid of tile values, row-major, `0` for an empty cell.
///
/// Serializes as a nested array (`[[2, 0, 0, 0], ...]`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Board(pub(crate) [Line; SIZE]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    #[inline]
    pub fn from_rows(rows: [[Tile; SIZE]; SIZE]) -> Self {
        Board(rows)
    }

    #[inline]
    pub fn rows(&self) -> &[[Tile; SIZE]; SIZE] {
        &self.0
    }

    #[inline]
    pub fn into_rows(self) -> [[Tile; SIZE]; SIZE] {
        self.0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Tile) {
        self.0[row][col] = value;
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert),
    /// along with the score gained from merges.
    ///
    /// ```
    /// use twenty48_engine::engine::{Board, Move};
    /// let b = Board::from_rows([[0, 2, 0, 2], [0; 4], [0; 4], [0; 4]]);
    /// let (moved, score) = b.shift(Move::Left);
    /// assert_eq!(moved.rows()[0], [4, 0, 0, 0]);
    /// assert_eq!(score, 4);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> (Self, Score) {
        ops::shift(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty cell,
    /// using the provided RNG. A full board is returned unchanged.
    ///
    /// ```
    /// use twenty48_engine::engine::Board;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        ops::insert_random_tile(&mut self, rng);
        self
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> usize {
        self.tiles().filter(|&t| t == 0).count()
    }

    /// `(row, col)` of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for (r, row) in self.0.iter().enumerate() {
            for (c, &tile) in row.iter().enumerate() {
                if tile == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    /// Return the highest tile value on the board (0 for an empty board).
    #[inline]
    pub fn highest_tile(&self) -> Tile {
        self.tiles().max().unwrap_or(0)
    }

    #[inline]
    pub fn contains_tile(&self, value: Tile) -> bool {
        self.tiles().any(|t| t == value)
    }

    /// True if an empty cell exists or two horizontally or vertically adjacent
    /// cells are equal.
    #[inline]
    pub fn has_possible_moves(&self) -> bool {
        self.count_empty() > 0 || ops::has_adjacent_pair(self)
    }

    /// True if the board is full and no adjacent pair can merge.
    ///
    /// ```
    /// use twenty48_engine::engine::Board;
    /// assert!(!Board::EMPTY.is_game_over());
    /// ```
    #[inline]
    pub fn is_game_over(&self) -> bool {
        ops::is_game_over(self)
    }

    /// Reverse every row (left <-> right).
    pub fn mirror_horizontal(mut self) -> Self {
        for row in self.0.iter_mut() {
            row.reverse();
        }
        self
    }

    /// Reverse the row order (top <-> bottom).
    pub fn mirror_vertical(mut self) -> Self {
        self.0.reverse();
        self
    }

    pub fn transpose(self) -> Self {
        let mut out = Board::EMPTY;
        for r in 0..SIZE {
            for c in 0..SIZE {
                out.0[c][r] = self.0[r][c];
            }
        }
        out
    }

    /// Iterate over tile values in row-major order.
    #[inline]
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.0.iter().flat_map(|row| row.iter().copied())
    }

    /// Convenience: collect tile values into a `Vec<Tile>`.
    #[inline]
    pub fn to_vec(&self) -> Vec<Tile> {
        self.tiles().collect()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for (idx, row) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f, "-------------------------------")?;
            }
            let cells: Vec<String> = row.iter().map(ops::format_val).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl From<[[Tile; SIZE]; SIZE]> for Board {
    fn from(rows: [[Tile; SIZE]; SIZE]) -> Self {
        Board::from_rows(rows)
    }
}

impl From<Board> for [[Tile; SIZE]; SIZE] {
    fn from(b: Board) -> Self {
        b.into_rows()
    }
}

/// Serializable snapshot of a game, the shape every API call returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub score: Score,
    pub game_over: bool,
    pub won: bool,
}
