//! Win detection for N×N boards.

use crate::board::Board;
use crate::types::{Cell, Coord, Mark};
use tracing::instrument;

/// Every line that wins when filled by one mark.
///
/// For a board of side `n` this is `n` rows, `n` columns and the two
/// diagonals, `2n + 2` lines in total.
pub fn winning_lines(size: usize) -> Vec<Vec<Coord>> {
    let mut lines = Vec::with_capacity(2 * size + 2);
    for i in 0..size {
        lines.push((0..size).map(|col| Coord::new(i, col)).collect());
        lines.push((0..size).map(|row| Coord::new(row, i)).collect());
    }
    lines.push((0..size).map(|i| Coord::new(i, i)).collect());
    lines.push((0..size).map(|i| Coord::new(i, size - 1 - i)).collect());
    lines
}

/// True iff any row, column or diagonal is filled entirely by `mark`.
#[instrument(skip(board), fields(size = board.size()))]
pub fn has_won(board: &Board, mark: Mark) -> bool {
    winning_lines(board.size()).iter().any(|line| {
        line.iter()
            .all(|coord| board.get(*coord) == Some(Cell::Marked(mark)))
    })
}
