//! Board builders for unit tests.
//!
//! Boards are written one string per row, one character per cell.

use crate::board::Board;

/// Splits each line into single-character wire symbols.
pub(crate) fn rows(lines: &[&str]) -> Vec<Vec<String>> {
    lines
        .iter()
        .map(|l| l.chars().map(|c| c.to_string()).collect())
        .collect()
}

/// Parses `lines` into a board, panicking on malformed input.
pub(crate) fn board(lines: &[&str]) -> Board {
    Board::from_rows(&rows(lines)).unwrap()
}
