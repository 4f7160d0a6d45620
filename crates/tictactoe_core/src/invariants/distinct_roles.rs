//! Role X and role O are never the same player.

use super::Invariant;
use crate::game::Match;

/// Invariant: the joiner is never the creator.
pub struct DistinctRolesInvariant;

impl Invariant<Match> for DistinctRolesInvariant {
    fn holds(game: &Match) -> bool {
        game.roles().o().as_ref() != Some(game.roles().x())
    }

    fn description() -> &'static str {
        "Role X and role O are bound to different players"
    }
}
