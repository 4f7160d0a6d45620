//! The match state machine.
//!
//! Owns the single live [`Match`] and processes one [`Request`] at a
//! time. Every handler validates first and mutates last, so a rejected
//! request leaves the match exactly as it was.

use crate::board::{Board, BoardError};
use crate::error::{JoinError, MoveError, RequestError};
use crate::game::{Match, Phase};
#[cfg(debug_assertions)]
use crate::invariants::{InvariantSet, MatchInvariants};
use crate::notice::{GameEnd, Notice};
use crate::request::{Command, Request};
use crate::rules::{TerminalOutcome, terminal_outcome};
use crate::types::{GameId, PlayerId};
use crate::validate::validate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
#[cfg(debug_assertions)]
use tracing::error;
use tracing::{debug, info, instrument, warn};

/// Range game ids are drawn from.
pub const GAME_ID_RANGE: std::ops::RangeInclusive<GameId> = 100..=999;

/// Overall verdict reported upstream for one request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The request was processed.
    #[default]
    Accept,
    /// The request was refused; state is unchanged.
    Reject,
}

/// Status plus the notices an accepted request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Accept or reject.
    pub status: Status,
    /// Notices in emission order; empty on rejection.
    pub notices: Vec<Notice>,
}

impl Verdict {
    /// A rejection with no notices.
    pub fn reject() -> Self {
        Self {
            status: Status::Reject,
            notices: Vec::new(),
        }
    }

    /// An acceptance carrying `notices`.
    pub fn accept(notices: Vec<Notice>) -> Self {
        Self {
            status: Status::Accept,
            notices,
        }
    }

    /// True if the request was accepted.
    pub fn is_accepted(&self) -> bool {
        self.status == Status::Accept
    }
}

/// Authoritative owner of the live match.
#[derive(Debug, Clone)]
pub struct MatchStateMachine<R = StdRng> {
    empty_board: Board,
    current: Option<Match>,
    rng: R,
}

impl MatchStateMachine<StdRng> {
    /// State machine for `board_size`×`board_size` matches with an
    /// entropy-seeded id generator.
    pub fn new(board_size: usize) -> Result<Self, BoardError> {
        Self::with_rng(board_size, StdRng::from_entropy())
    }

    /// State machine whose game ids are reproducible from `seed`.
    pub fn seeded(board_size: usize, seed: u64) -> Result<Self, BoardError> {
        Self::with_rng(board_size, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MatchStateMachine<R> {
    /// State machine drawing game ids from `rng`.
    #[instrument(skip(rng))]
    pub fn with_rng(board_size: usize, rng: R) -> Result<Self, BoardError> {
        Ok(Self {
            empty_board: Board::init_empty(board_size)?,
            current: None,
            rng,
        })
    }

    /// The live match, if one has been created.
    pub fn current(&self) -> Option<&Match> {
        self.current.as_ref()
    }

    /// Side length of every match this machine creates.
    pub fn board_size(&self) -> usize {
        self.empty_board.size()
    }

    /// Processes one request, recovering every failure as a rejection.
    #[instrument(skip_all, fields(requester = %request.requester, kind = %request.command.kind()))]
    pub fn handle(&mut self, request: &Request) -> Verdict {
        match self.apply(request) {
            Ok(notices) => {
                info!(notices = notices.len(), "Request accepted");
                #[cfg(debug_assertions)]
                self.check_invariants();
                Verdict::accept(notices)
            }
            Err(e) => {
                warn!(category = e.category(), reason = %e, "Request rejected");
                Verdict::reject()
            }
        }
    }

    /// Processes one request, returning the notices or the rejection.
    pub fn apply(&mut self, request: &Request) -> Result<Vec<Notice>, RequestError> {
        let requester = &request.requester;
        match &request.command {
            Command::NewGame => self.new_game(requester),
            Command::JoinGame { game_id } => self.join_game(requester, *game_id),
            Command::SubmitMove { rows, size } => self.submit_move(requester, rows, *size),
        }
    }

    /// Starts a fresh match with `requester` as X, discarding any
    /// previous match.
    #[instrument(skip_all, fields(requester = %requester))]
    fn new_game(&mut self, requester: &PlayerId) -> Result<Vec<Notice>, RequestError> {
        let previous = self.current.as_ref().map(|game| *game.id());
        let id = self.fresh_id(previous);

        if let Some(old) = &self.current {
            if old.is_live() {
                warn!(old_game = *old.id(), new_game = id, "Discarding unfinished game");
            }
        }

        self.current = Some(Match::new(id, requester.clone(), self.empty_board.clone()));
        info!(game_id = id, "New game created, X assigned to requester");
        Ok(vec![Notice::NewGameCreated { game_id: id }])
    }

    /// Binds `requester` to role O of the live match.
    #[instrument(skip(self, requester), fields(requester = %requester))]
    fn join_game(&mut self, requester: &PlayerId, claimed: GameId) -> Result<Vec<Notice>, RequestError> {
        let game = self.current.as_mut().ok_or(JoinError::NoMatch)?;
        let live = *game.id();

        if !game.is_live() {
            return Err(JoinError::MatchEnded(live).into());
        }
        if claimed != live {
            return Err(JoinError::GameIdMismatch { claimed, live }.into());
        }
        if game.roles().x() == requester {
            return Err(JoinError::CreatorCannotJoin.into());
        }

        if let Some(replaced) = game.roles_mut().bind_o(requester.clone()) {
            if &replaced != requester {
                warn!(replaced = %replaced, "Role O rebound to a new player");
            }
        }
        game.set_phase(Phase::InProgress);

        info!(game_id = live, "Opponent joined");
        Ok(vec![Notice::OpponentJoined { game_id: live }])
    }

    /// Accepts `rows` as the next board if it is a legal single move.
    #[instrument(skip(self, requester, rows), fields(requester = %requester))]
    fn submit_move(
        &mut self,
        requester: &PlayerId,
        rows: &[Vec<String>],
        size: usize,
    ) -> Result<Vec<Notice>, RequestError> {
        let game = self.current.as_mut().ok_or(MoveError::NoMatch)?;
        let id = *game.id();
        if *game.phase() == Phase::Ended {
            return Err(MoveError::MatchEnded(id).into());
        }

        let expected = game.board().size();
        for got in [size, rows.len()] {
            if got != expected {
                return Err(MoveError::SizeMismatch { expected, got }.into());
            }
        }
        let candidate = Board::from_rows(rows).map_err(|e| match e {
            BoardError::UnknownSymbol { .. } => RequestError::Malformed(e.to_string()),
            other => MoveError::Board(other).into(),
        })?;

        let placed = validate(game.board(), &candidate, requester, *game.turn(), game.roles())?;
        debug!(mark = %placed.mark, at = %placed.at, "Move validated");

        game.apply_board(candidate);
        let next = *game.turn();
        info!(game_id = id, %next, "Board updated");

        let mut notices = vec![Notice::BoardUpdated {
            state: game.board().clone(),
            next,
        }];

        let end = match terminal_outcome(game.board()) {
            TerminalOutcome::Winner(mark) => Some(GameEnd::Winner(mark)),
            TerminalOutcome::Draw => Some(GameEnd::Draw),
            TerminalOutcome::Ongoing => None,
        };
        if let Some(end) = end {
            game.set_phase(Phase::Ended);
            info!(game_id = id, ?end, "Game ended");
            notices.push(Notice::GameEnded(end));
        }

        Ok(notices)
    }

    /// Draws an id in [`GAME_ID_RANGE`] that differs from `previous`.
    fn fresh_id(&mut self, previous: Option<GameId>) -> GameId {
        loop {
            let id = self.rng.gen_range(GAME_ID_RANGE);
            if Some(id) != previous {
                return id;
            }
        }
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        if let Some(game) = &self.current {
            if let Err(violations) = MatchInvariants::check_all(game) {
                for violation in violations {
                    error!(game_id = *game.id(), %violation, "Match invariant violated");
                }
            }
        }
    }
}
