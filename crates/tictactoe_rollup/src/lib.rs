//! Rollup host for the tic-tac-toe match state machine.
//!
//! # Architecture
//!
//! - **Codec**: hex/JSON payloads to typed requests and back
//! - **Rollup**: `/finish`, `/notice` and `/report` over HTTP
//! - **Dapp**: advance and inspect handlers around the state machine
//! - **Driver**: the strictly sequential polling loop
//! - **Config**: TOML file, CLI overrides and environment

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod config;
mod dapp;
mod driver;
mod pretty;
mod rollup;

pub use codec::{
    GatewayError, MatchSnapshot, WireNotice, decode_advance, decode_inspect, encode_notice,
    encode_snapshot, hex_to_string, string_to_hex,
};
pub use config::{ConfigError, DappConfig, ROLLUP_URL_ENV};
pub use dapp::Dapp;
pub use driver::Driver;
pub use pretty::pretty_board;
pub use rollup::{
    AdvanceData, AdvanceMetadata, HttpRollupClient, InspectData, RollupClient, RollupError,
    RollupRequest, RollupRequestType,
};
