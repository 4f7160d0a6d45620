//! Draw detection.

use super::win::has_won;
use crate::board::Board;
use crate::types::Mark;
use tracing::instrument;

/// True iff the board is full and neither mark has a winning line.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && !has_won(board, Mark::X) && !has_won(board, Mark::O)
}
