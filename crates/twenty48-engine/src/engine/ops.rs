use rand::Rng;

use super::state::{Board, Line, Move, Score, Tile, SIZE};

/// Slide/merge tiles in the given direction. No randomness.
///
/// Returns the new board and the sum of the values produced by merges.
pub fn shift(board: Board, direction: Move) -> (Board, Score) {
    let mut out = board;
    let mut score = 0;
    for idx in 0..SIZE {
        let mut line = extract_line(&board, direction, idx);
        score += compact_line(&mut line);
        write_line(&mut out, direction, idx, line);
    }
    (out, score)
}

/// Read line `idx` ordered from the target edge outward, so that index 0
/// is the cell every tile in the line slides toward.
pub(crate) fn extract_line(board: &Board, direction: Move, idx: usize) -> Line {
    let mut line = [0; SIZE];
    for (pos, slot) in line.iter_mut().enumerate() {
        let (r, c) = cell_at(direction, idx, pos);
        *slot = board.0[r][c];
    }
    line
}

fn write_line(board: &mut Board, direction: Move, idx: usize, line: Line) {
    for (pos, &tile) in line.iter().enumerate() {
        let (r, c) = cell_at(direction, idx, pos);
        board.0[r][c] = tile;
    }
}

#[inline]
fn cell_at(direction: Move, idx: usize, pos: usize) -> (usize, usize) {
    let far = SIZE - 1 - pos;
    match direction {
        Move::Left => (idx, pos),
        Move::Right => (idx, far),
        Move::Up => (pos, idx),
        Move::Down => (far, idx),
    }
}

/// Compact one line toward index 0 and return the merge score.
///
/// Cells are visited from index 1 outward. Each tile slides through the
/// empty cells ahead of it, then merges into its neighbour if the values
/// match and that neighbour has not already absorbed a merge this move.
pub(crate) fn compact_line(line: &mut Line) -> Score {
    let mut merged = [false; SIZE];
    let mut score = 0;
    for j in 1..SIZE {
        if line[j] == 0 {
            continue;
        }
        let mut k = j;
        while k > 0 && line[k - 1] == 0 {
            line.swap(k - 1, k);
            k -= 1;
        }
        if k > 0 && line[k - 1] == line[k] && !merged[k - 1] {
            line[k - 1] *= 2;
            line[k] = 0;
            score += Score::from(line[k - 1]);
            merged[k - 1] = true;
        }
    }
    score
}

/// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
///
/// Returns the cell that was filled, or `None` if the board was full.
pub(crate) fn insert_random_tile<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
) -> Option<(usize, usize)> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }
    let (r, c) = empty[rng.gen_range(0..empty.len())];
    board.0[r][c] = generate_random_tile(rng);
    Some((r, c))
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

/// True if any two horizontally or vertically adjacent cells hold the same value.
pub(crate) fn has_adjacent_pair(board: &Board) -> bool {
    let g = &board.0;
    for r in 0..SIZE {
        for c in 0..SIZE - 1 {
            if g[r][c] == g[r][c + 1] {
                return true;
            }
        }
    }
    for c in 0..SIZE {
        for r in 0..SIZE - 1 {
            if g[r][c] == g[r + 1][c] {
                return true;
            }
        }
    }
    false
}

/// Full board with no adjacent equal pair: no move in any direction can change it.
pub fn is_game_over(board: &Board) -> bool {
    !board.has_possible_moves()
}

pub(crate) fn format_val(val: &Tile) -> String {
    match val {
        0 => String::from("       "),
        &x => {
            let mut x = x.to_string();
            while x.len() < 7 {
                match x.len() {
                    6 => x = format!(" {}", x),
                    _ => x = format!(" {} ", x),
                }
            }
            x
        }
    }
}
