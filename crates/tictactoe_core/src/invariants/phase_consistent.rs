//! Phase consistency: the phase agrees with role bindings and the board.

use super::Invariant;
use crate::game::{Match, Phase};
use crate::rules::terminal_outcome;

/// Invariant: `AwaitingJoin` has no O, `InProgress` has an O, and
/// neither has a terminal outcome; `Ended` has one.
///
/// X may open before anyone joins, so `AwaitingJoin` allows marks.
pub struct PhaseConsistentInvariant;

impl Invariant<Match> for PhaseConsistentInvariant {
    fn holds(game: &Match) -> bool {
        let outcome = terminal_outcome(game.board());
        match game.phase() {
            Phase::AwaitingJoin => game.roles().o().is_none() && !outcome.is_terminal(),
            Phase::InProgress => game.roles().o().is_some() && !outcome.is_terminal(),
            Phase::Ended => outcome.is_terminal(),
        }
    }

    fn description() -> &'static str {
        "Phase agrees with role bindings and board outcome"
    }
}
