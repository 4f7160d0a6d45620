//! Typed inbound requests.
//!
//! Requests are what the gateway hands the state machine after decoding
//! an opaque payload. They carry the external board representation
//! unchanged; conversion into a [`Board`](crate::Board) happens inside
//! the state machine so a malformed grid is reported as a rejection.

use crate::types::{GameId, PlayerId};
use serde::{Deserialize, Serialize};

/// Closed set of request kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    /// Start a fresh match.
    New,
    /// Join the live match as O.
    Join,
    /// Submit the next board.
    Update,
}

/// Kind-specific request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Start a new match with the requester as X.
    NewGame,
    /// Join the live match as O.
    JoinGame {
        /// Id the joiner claims the match has.
        game_id: GameId,
    },
    /// Replace the board with a successor containing one new mark.
    SubmitMove {
        /// Candidate board as rows of single-character symbols.
        rows: Vec<Vec<String>>,
        /// Declared side length of the board.
        size: usize,
    },
}

impl Command {
    /// The kind this command belongs to.
    pub fn kind(&self) -> RequestKind {
        match self {
            Command::NewGame => RequestKind::New,
            Command::JoinGame { .. } => RequestKind::Join,
            Command::SubmitMove { .. } => RequestKind::Update,
        }
    }
}

/// A request from one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Who sent it.
    pub requester: PlayerId,
    /// What they asked for.
    pub command: Command,
}

impl Request {
    /// Creates a request.
    pub fn new(requester: impl Into<PlayerId>, command: Command) -> Self {
        Self {
            requester: requester.into(),
            command,
        }
    }

    /// Shorthand for a new-game request.
    pub fn new_game(requester: impl Into<PlayerId>) -> Self {
        Self::new(requester, Command::NewGame)
    }

    /// Shorthand for a join request.
    pub fn join(requester: impl Into<PlayerId>, game_id: GameId) -> Self {
        Self::new(requester, Command::JoinGame { game_id })
    }

    /// Shorthand for a move request whose declared size is the row count.
    pub fn submit_move(requester: impl Into<PlayerId>, rows: Vec<Vec<String>>) -> Self {
        let size = rows.len();
        Self::new(requester, Command::SubmitMove { rows, size })
    }
}
