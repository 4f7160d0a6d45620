//! Structured outbound notices.
//!
//! Notices describe accepted transitions. Encoding them for delivery is
//! the gateway's job.

use crate::board::Board;
use crate::types::{GameId, Mark};
use serde::{Deserialize, Serialize};

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEnd {
    /// A mark completed a line.
    Winner(Mark),
    /// Board filled with no winner.
    Draw,
}

/// Event emitted by an accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// A new match exists and can be joined with `game_id`.
    NewGameCreated {
        /// Id of the new match.
        game_id: GameId,
    },
    /// Role O has been bound.
    OpponentJoined {
        /// Id of the joined match.
        game_id: GameId,
    },
    /// A move was accepted.
    BoardUpdated {
        /// Board after the move.
        state: Board,
        /// Mark to move next.
        next: Mark,
    },
    /// The match reached a terminal outcome.
    GameEnded(GameEnd),
}

impl Notice {
    /// Symbolic notice name.
    pub fn name(&self) -> &'static str {
        match self {
            Notice::NewGameCreated { .. } => "new_game_created",
            Notice::OpponentJoined { .. } => "opponent_joined",
            Notice::BoardUpdated { .. } => "board_updated",
            Notice::GameEnded(_) => "game_ended",
        }
    }

    /// Numeric notice type; `game_ended` carries none.
    pub fn type_id(&self) -> Option<u8> {
        match self {
            Notice::NewGameCreated { .. } => Some(1),
            Notice::OpponentJoined { .. } => Some(2),
            Notice::BoardUpdated { .. } => Some(3),
            Notice::GameEnded(_) => None,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::NewGameCreated { game_id } | Notice::OpponentJoined { game_id } => {
                write!(f, "{} (game {})", self.name(), game_id)
            }
            Notice::BoardUpdated { next, .. } => write!(f, "{} (next {})", self.name(), next),
            Notice::GameEnded(GameEnd::Winner(mark)) => {
                write!(f, "{} (winner {})", self.name(), mark)
            }
            Notice::GameEnded(GameEnd::Draw) => write!(f, "{} (draw)", self.name()),
        }
    }
}
