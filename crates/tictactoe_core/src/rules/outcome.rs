//! Terminal classification of a board.

use super::draw::is_draw;
use super::win::has_won;
use crate::board::Board;
use crate::types::Mark;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Final classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalOutcome {
    /// A mark owns a complete line.
    Winner(Mark),
    /// The board is full and nobody won.
    Draw,
    /// Moves remain and nobody has won yet.
    Ongoing,
}

impl TerminalOutcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            TerminalOutcome::Winner(mark) => Some(*mark),
            TerminalOutcome::Draw | TerminalOutcome::Ongoing => None,
        }
    }

    /// True unless the match can continue.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminalOutcome::Ongoing)
    }
}

impl std::fmt::Display for TerminalOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalOutcome::Winner(mark) => write!(f, "Player {} wins", mark),
            TerminalOutcome::Draw => write!(f, "Draw"),
            TerminalOutcome::Ongoing => write!(f, "Ongoing"),
        }
    }
}

/// Classifies `board`. A winner takes precedence over a full board.
#[instrument(skip(board), fields(size = board.size()))]
pub fn terminal_outcome(board: &Board) -> TerminalOutcome {
    if has_won(board, Mark::X) {
        TerminalOutcome::Winner(Mark::X)
    } else if has_won(board, Mark::O) {
        TerminalOutcome::Winner(Mark::O)
    } else if is_draw(board) {
        TerminalOutcome::Draw
    } else {
        TerminalOutcome::Ongoing
    }
}
