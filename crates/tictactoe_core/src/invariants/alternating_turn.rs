//! Alternating turn invariant: the mark counts decide whose turn it is.

use super::Invariant;
use crate::game::Match;
use crate::types::{Cell, Mark};

/// Invariant: X moves when both marks have been placed equally often,
/// O moves when X is one ahead. No other count difference is reachable.
pub struct AlternatingTurnInvariant;

impl Invariant<Match> for AlternatingTurnInvariant {
    fn holds(game: &Match) -> bool {
        let count = |mark: Mark| {
            game.board()
                .cells()
                .filter(|(_, cell)| *cell == Cell::Marked(mark))
                .count()
        };
        let (xs, os) = (count(Mark::X), count(Mark::O));

        match game.turn() {
            Mark::X => xs == os,
            Mark::O => xs == os + 1,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}
