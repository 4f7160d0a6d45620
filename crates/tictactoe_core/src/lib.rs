//! Authoritative tic-tac-toe match logic.
//!
//! This crate is the pure core of a request-driven tic-tac-toe host. It
//! validates externally delivered requests and advances a single match
//! through its lifecycle.
//!
//! # Architecture
//!
//! - **Board**: N×N grid with emptiness, fullness and diff queries
//! - **Rules**: win, draw and terminal-outcome classification
//! - **Validation**: single-move, turn-order and identity checks
//! - **State machine**: owns the live [`Match`] and turns [`Request`]s
//!   into [`Notice`]s
//!
//! Nothing here performs I/O; decoding payloads and delivering notices
//! belongs to the host.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{MatchStateMachine, Notice, Request};
//!
//! let mut machine = MatchStateMachine::seeded(3, 7).unwrap();
//! let verdict = machine.handle(&Request::new_game("0xalice"));
//! assert!(matches!(verdict.notices[0], Notice::NewGameCreated { .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
#[cfg(test)]
mod fixtures;
mod game;
pub mod invariants;
mod machine;
mod notice;
mod request;
pub mod rules;
mod types;
mod validate;

pub use board::{Board, BoardError};
pub use error::{JoinError, MoveError, RequestError};
pub use game::{Match, Phase, Roles};
pub use machine::{GAME_ID_RANGE, MatchStateMachine, Status, Verdict};
pub use notice::{GameEnd, Notice};
pub use request::{Command, Request, RequestKind};
pub use rules::{TerminalOutcome, has_won, is_draw, terminal_outcome};
pub use types::{Cell, Coord, GameId, Mark, PlayerId};
pub use validate::{PlacedMark, RejectReason, validate};
