//! The match aggregate: roles, turn, board and phase.

use crate::board::Board;
use crate::types::{GameId, Mark, PlayerId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Lifecycle phase of a live match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Phase {
    /// Created, waiting for an opponent to join as O.
    AwaitingJoin,
    /// Both roles bound; moves are accepted.
    InProgress,
    /// A winner or a draw has been reached.
    Ended,
}

/// Binding of player identities to marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Roles {
    /// Creator, always X.
    x: PlayerId,
    /// Joiner, unset until someone joins.
    o: Option<PlayerId>,
}

impl Roles {
    /// Roles with only the creator bound.
    pub fn new(x: PlayerId) -> Self {
        Self { x, o: None }
    }

    /// Roles with both marks bound.
    pub fn with_opponent(x: PlayerId, o: PlayerId) -> Self {
        Self { x, o: Some(o) }
    }

    /// The player bound to `mark`, if any.
    pub fn player_for(&self, mark: Mark) -> Option<&PlayerId> {
        match mark {
            Mark::X => Some(&self.x),
            Mark::O => self.o.as_ref(),
        }
    }

    /// The mark bound to `player`, if any.
    pub fn mark_of(&self, player: &PlayerId) -> Option<Mark> {
        if &self.x == player {
            Some(Mark::X)
        } else if self.o.as_ref() == Some(player) {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub(crate) fn bind_o(&mut self, player: PlayerId) -> Option<PlayerId> {
        self.o.replace(player)
    }
}

/// One tic-tac-toe match.
///
/// Only [`MatchStateMachine`](crate::MatchStateMachine) builds or
/// mutates matches; everything else sees them through getters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Match {
    /// Match identifier handed to the joiner.
    id: GameId,
    /// Authoritative board.
    board: Board,
    /// Player role bindings.
    roles: Roles,
    /// Mark expected to move next.
    turn: Mark,
    /// Lifecycle phase.
    phase: Phase,
}

impl Match {
    /// Fresh match created by `creator`: empty board, X to move.
    #[instrument(skip(board), fields(size = board.size()))]
    pub(crate) fn new(id: GameId, creator: PlayerId, board: Board) -> Self {
        Self {
            id,
            board,
            roles: Roles::new(creator),
            turn: Mark::X,
            phase: Phase::AwaitingJoin,
        }
    }

    pub(crate) fn roles_mut(&mut self) -> &mut Roles {
        &mut self.roles
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Replaces the board and hands the turn to the other mark.
    pub(crate) fn apply_board(&mut self, board: Board) {
        self.board = board;
        self.turn = self.turn.opponent();
    }

    /// True while the match accepts joins and moves.
    pub fn is_live(&self) -> bool {
        self.phase != Phase::Ended
    }
}
