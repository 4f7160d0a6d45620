//! Game rules for tic-tac-toe.
//!
//! Pure functions that classify a board. Rules never touch match
//! state, so the state machine and the move validator can share them.

pub mod draw;
pub mod outcome;
pub mod win;

pub use draw::is_draw;
pub use outcome::{TerminalOutcome, terminal_outcome};
pub use win::{has_won, winning_lines};
