//! Move legality checks.
//!
//! A move arrives as a whole candidate board. It is legal when it
//! differs from the stored board by exactly one newly filled cell,
//! that cell carries the mark whose turn it is, and the requester is
//! the player bound to that mark. The validator reads nothing but its
//! arguments.

use crate::board::Board;
use crate::game::Roles;
use crate::types::{Cell, Coord, Mark, PlayerId};
use tracing::{debug, instrument};

/// Why a candidate board was not accepted as the next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RejectReason {
    /// Candidate does not differ from the stored board by exactly one
    /// newly placed mark.
    #[display("Board does not differ by exactly one newly placed mark")]
    NotASingleMove,

    /// The placed mark is not the one whose turn it is.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Mark),

    /// The requester is not the player bound to the placed mark.
    #[display("Requester is not the player holding {}", _0)]
    WrongPlayer(Mark),
}

impl std::error::Error for RejectReason {}

/// The mark placed by an accepted move and where it went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedMark {
    /// Mark that was placed.
    pub mark: Mark,
    /// Where it was placed.
    pub at: Coord,
}

/// Checks that `candidate` is a legal single-move successor of `previous`.
///
/// Both boards must have the same size; the caller rejects mismatched
/// shapes before calling this.
#[instrument(skip_all, fields(requester = %requester, turn = %turn))]
pub fn validate(
    previous: &Board,
    candidate: &Board,
    requester: &PlayerId,
    turn: Mark,
    roles: &Roles,
) -> Result<PlacedMark, RejectReason> {
    let empty_before = previous.count_empty();
    let empty_after = candidate.count_empty();
    debug!(empty_before, empty_after, "Comparing empty counts");
    if empty_before == 0 || empty_after != empty_before - 1 {
        return Err(RejectReason::NotASingleMove);
    }

    let changed = previous.diff(candidate);
    let [at] = changed.as_slice() else {
        debug!(changed = changed.len(), "Expected exactly one changed cell");
        return Err(RejectReason::NotASingleMove);
    };

    let mark = match (previous.get(*at), candidate.get(*at)) {
        (Some(Cell::Empty), Some(Cell::Marked(mark))) => mark,
        _ => return Err(RejectReason::NotASingleMove),
    };
    debug!(%mark, at = %at, "Found placed mark");

    if mark != turn {
        return Err(RejectReason::WrongTurn(mark));
    }

    if roles.player_for(mark) != Some(requester) {
        return Err(RejectReason::WrongPlayer(mark));
    }

    Ok(PlacedMark { mark, at: *at })
}
