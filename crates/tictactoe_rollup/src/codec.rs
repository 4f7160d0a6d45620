//! Request gateway: payload decoding and notice encoding.
//!
//! Inbound advance payloads are `0x`-prefixed hex of a UTF-8 JSON object
//! such as `{"request": "join", "id": 123}`. Outbound notices and reports
//! are JSON objects hex-encoded the same way.

use crate::rollup::{AdvanceData, InspectData};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tictactoe_core::{
    Command, GameEnd, GameId, Match, Notice, PlayerId, Request, RequestKind, terminal_outcome,
};
use tracing::{debug, instrument};

/// Failure to turn a payload into a typed request, or a notice into a
/// payload.
#[derive(Debug, Display, From)]
pub enum GatewayError {
    /// Payload is not valid hex.
    #[display("Invalid hex payload: {}", _0)]
    Hex(hex::FromHexError),

    /// Decoded bytes are not UTF-8.
    #[display("Payload is not UTF-8: {}", _0)]
    Utf8(std::string::FromUtf8Error),

    /// Payload or body is not the expected JSON.
    #[display("Invalid JSON: {}", _0)]
    Json(serde_json::Error),

    /// `request` names no known kind.
    #[display("Unknown request kind {:?}, expecting 'new', 'join' or 'update'", _0)]
    #[from(ignore)]
    UnknownKind(String),

    /// A field the request kind needs is absent.
    #[display("Missing field '{}'", _0)]
    #[from(ignore)]
    MissingField(&'static str),
}

impl std::error::Error for GatewayError {}

/// Decodes a `0x`-prefixed hex string into UTF-8 text.
#[instrument]
pub fn hex_to_string(payload: &str) -> Result<String, GatewayError> {
    let digits = payload.strip_prefix("0x").unwrap_or(payload);
    let bytes = hex::decode(digits)?;
    Ok(String::from_utf8(bytes)?)
}

/// Encodes text as a `0x`-prefixed hex string.
pub fn string_to_hex(text: &str) -> String {
    format!("0x{}", hex::encode(text.as_bytes()))
}

/// Advance payload body.
#[derive(Debug, Clone, Deserialize)]
struct WireRequest {
    request: Option<String>,
    id: Option<GameId>,
    #[serde(rename = "move")]
    board: Option<Vec<Vec<String>>>,
    size: Option<usize>,
}

/// Decodes an advance request into a typed [`Request`] from `msg_sender`.
#[instrument(skip(data), fields(sender = %data.metadata.msg_sender))]
pub fn decode_advance(data: &AdvanceData) -> Result<Request, GatewayError> {
    let text = hex_to_string(&data.payload)?;
    debug!(payload = %text, "Decoded advance payload");
    let wire: WireRequest = serde_json::from_str(&text)?;

    let raw_kind = wire.request.unwrap_or_else(|| "unknown".to_string());
    let kind = RequestKind::from_str(raw_kind.trim())
        .map_err(|_| GatewayError::UnknownKind(raw_kind.clone()))?;

    let command = match kind {
        RequestKind::New => Command::NewGame,
        RequestKind::Join => Command::JoinGame {
            game_id: wire.id.ok_or(GatewayError::MissingField("id"))?,
        },
        RequestKind::Update => {
            let rows = wire.board.ok_or(GatewayError::MissingField("move"))?;
            let size = wire.size.unwrap_or(rows.len());
            Command::SubmitMove { rows, size }
        }
    };

    Ok(Request::new(
        PlayerId::new(data.metadata.msg_sender.clone()),
        command,
    ))
}

/// Notice as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireNotice {
    /// Numeric notice type; absent for `game_ended`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u8>,
    /// Symbolic notice name.
    pub notice: String,
    /// Match id, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gameid: Option<String>,
    /// Board rows after an accepted move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Vec<Vec<String>>>,
    /// Mark to move next.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Winning mark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    /// `"Draw"` when nobody won.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl From<&Notice> for WireNotice {
    fn from(notice: &Notice) -> Self {
        let mut wire = WireNotice {
            id: notice.type_id(),
            notice: notice.name().to_string(),
            gameid: None,
            state: None,
            next: None,
            winner: None,
            result: None,
        };
        match notice {
            Notice::NewGameCreated { game_id } | Notice::OpponentJoined { game_id } => {
                wire.gameid = Some(game_id.to_string());
            }
            Notice::BoardUpdated { state, next } => {
                wire.state = Some(state.to_symbol_rows());
                wire.next = Some(next.to_string());
            }
            Notice::GameEnded(GameEnd::Winner(mark)) => wire.winner = Some(mark.to_string()),
            Notice::GameEnded(GameEnd::Draw) => wire.result = Some("Draw".to_string()),
        }
        wire
    }
}

/// Encodes a notice as a hex payload ready for `/notice`.
#[instrument(skip(notice), fields(notice = %notice))]
pub fn encode_notice(notice: &Notice) -> Result<String, GatewayError> {
    let json = serde_json::to_string(&WireNotice::from(notice))?;
    debug!(%json, "Encoded notice");
    Ok(string_to_hex(&json))
}

/// Read-only view of the live match for inspect reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    /// Match id.
    pub gameid: GameId,
    /// Lifecycle phase.
    pub phase: String,
    /// Mark to move next.
    pub turn: String,
    /// Player holding X.
    pub player_x: String,
    /// Player holding O, if joined.
    pub player_o: Option<String>,
    /// Board rows.
    pub state: Vec<Vec<String>>,
    /// Terminal outcome of the board.
    pub outcome: String,
}

impl From<&Match> for MatchSnapshot {
    fn from(game: &Match) -> Self {
        Self {
            gameid: *game.id(),
            phase: game.phase().to_string(),
            turn: game.turn().to_string(),
            player_x: game.roles().x().to_string(),
            player_o: game.roles().o().as_ref().map(|p| p.to_string()),
            state: game.board().to_symbol_rows(),
            outcome: terminal_outcome(game.board()).to_string(),
        }
    }
}

/// Encodes the live match (or `null`) as a hex payload for `/report`.
#[instrument(skip_all)]
pub fn encode_snapshot(game: Option<&Match>) -> Result<String, GatewayError> {
    let snapshot = game.map(MatchSnapshot::from);
    let json = serde_json::to_string(&snapshot)?;
    Ok(string_to_hex(&json))
}

/// Decodes the text of an inspect payload, for logging.
#[instrument(skip_all)]
pub fn decode_inspect(data: &InspectData) -> Result<String, GatewayError> {
    hex_to_string(&data.payload)
}
