//! Rejection taxonomy for the state machine.

use crate::board::BoardError;
use crate::types::GameId;
use crate::validate::RejectReason;

/// Why a join request was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum JoinError {
    /// No match has been created yet.
    #[display("No match to join")]
    NoMatch,

    /// Claimed id is not the live match's id.
    #[display("Game id {} does not match live game {}", claimed, live)]
    GameIdMismatch {
        /// Id sent by the joiner.
        claimed: GameId,
        /// Id of the live match.
        live: GameId,
    },

    /// The creator tried to take role O.
    #[display("Creator cannot join their own game")]
    CreatorCannotJoin,

    /// The match is over.
    #[display("Game {} has ended", _0)]
    MatchEnded(GameId),
}

impl std::error::Error for JoinError {}

/// Why a move request was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum MoveError {
    /// No match has been created yet.
    #[display("No match in progress")]
    #[from(ignore)]
    NoMatch,

    /// The match is over.
    #[display("Game {} has ended", _0)]
    #[from(ignore)]
    MatchEnded(GameId),

    /// Declared or actual board size differs from the match's.
    #[display("Board size {} does not match game size {}", got, expected)]
    #[from(ignore)]
    SizeMismatch {
        /// Side length of the live board.
        expected: usize,
        /// Side length that was submitted.
        got: usize,
    },

    /// The candidate grid could not be read.
    #[display("Invalid board: {}", _0)]
    Board(BoardError),

    /// The candidate is not a legal next move.
    #[display("Illegal move: {}", _0)]
    Rejected(RejectReason),
}

impl std::error::Error for MoveError {}

/// Why a request was rejected. Rejections never change match state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum RequestError {
    /// Request could not be understood.
    #[display("Malformed request: {}", _0)]
    #[from(ignore)]
    Malformed(String),

    /// Join refused.
    #[display("Invalid join: {}", _0)]
    InvalidJoin(JoinError),

    /// Move refused.
    #[display("Invalid move: {}", _0)]
    InvalidMove(MoveError),
}

impl std::error::Error for RequestError {}

impl RequestError {
    /// Short label for logs.
    pub fn category(&self) -> &'static str {
        match self {
            RequestError::Malformed(_) => "malformed_request",
            RequestError::InvalidJoin(_) => "invalid_join",
            RequestError::InvalidMove(_) => "invalid_move",
        }
    }
}

impl From<RejectReason> for RequestError {
    fn from(reason: RejectReason) -> Self {
        RequestError::InvalidMove(MoveError::Rejected(reason))
    }
}
