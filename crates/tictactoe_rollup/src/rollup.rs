//! Rollup HTTP server protocol.
//!
//! The handler reports the status of the previous request to `/finish`
//! and receives the next request in the response; 202 means nothing is
//! pending. Notices and reports are posted as hex payloads.

use async_trait::async_trait;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tictactoe_core::Status;
use tracing::{debug, info, instrument};

/// Kind of request delivered by `/finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RollupRequestType {
    /// State-changing input.
    AdvanceState,
    /// Read-only query.
    InspectState,
    /// Anything this handler does not know.
    #[serde(other)]
    Unknown,
}

/// Request returned by `/finish`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupRequest {
    /// Which handler should process `data`.
    pub request_type: RollupRequestType,
    /// Kind-specific body.
    pub data: serde_json::Value,
}

/// Metadata attached to an advance input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdvanceMetadata {
    /// Address that sent the input.
    pub msg_sender: String,
    /// Epoch the input belongs to.
    #[serde(default)]
    pub epoch_index: u64,
    /// Input position within the epoch.
    #[serde(default)]
    pub input_index: u64,
    /// Base-layer block number.
    #[serde(default)]
    pub block_number: u64,
    /// Base-layer block timestamp.
    #[serde(default)]
    pub timestamp: u64,
}

/// Body of an `advance_state` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceData {
    /// Sender and ordering metadata.
    pub metadata: AdvanceMetadata,
    /// Hex-encoded payload.
    pub payload: String,
}

/// Body of an `inspect_state` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectData {
    /// Hex-encoded query payload.
    pub payload: String,
}

#[derive(Debug, Serialize)]
struct FinishBody {
    status: Status,
}

#[derive(Debug, Serialize)]
struct PayloadBody<'a> {
    payload: &'a str,
}

/// Transport failure talking to the rollup server.
#[derive(Debug, Display, From)]
pub enum RollupError {
    /// The HTTP request itself failed.
    #[display("HTTP error: {}", _0)]
    Http(reqwest::Error),

    /// The server answered with an unexpected status code.
    #[display("Unexpected status {} from {}", status, endpoint)]
    #[from(ignore)]
    UnexpectedStatus {
        /// Endpoint path.
        endpoint: &'static str,
        /// HTTP status code.
        status: u16,
    },
}

impl std::error::Error for RollupError {}

/// Operations the handler needs from the rollup server.
#[async_trait]
pub trait RollupClient: Send + Sync {
    /// Reports `status` for the previous request and waits for the next.
    ///
    /// Returns `None` when no request is pending.
    async fn finish(&self, status: Status) -> Result<Option<RollupRequest>, RollupError>;

    /// Publishes a notice payload.
    async fn add_notice(&self, payload: &str) -> Result<(), RollupError>;

    /// Publishes a report payload.
    async fn add_report(&self, payload: &str) -> Result<(), RollupError>;
}

/// [`RollupClient`] over the rollup HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRollupClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRollupClient {
    /// Client for the server at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        info!("Creating rollup HTTP client");
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_payload(&self, endpoint: &'static str, payload: &str) -> Result<(), RollupError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, endpoint))
            .json(&PayloadBody { payload })
            .send()
            .await?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "Posted payload");
        if !status.is_success() {
            return Err(RollupError::UnexpectedStatus {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RollupClient for HttpRollupClient {
    #[instrument(skip(self))]
    async fn finish(&self, status: Status) -> Result<Option<RollupRequest>, RollupError> {
        debug!("Sending finish");
        let response = self
            .client
            .post(format!("{}/finish", self.base_url))
            .json(&FinishBody { status })
            .send()
            .await?;

        let code = response.status();
        debug!(status = code.as_u16(), "Received finish status");
        if code == reqwest::StatusCode::ACCEPTED {
            return Ok(None);
        }
        if !code.is_success() {
            return Err(RollupError::UnexpectedStatus {
                endpoint: "finish",
                status: code.as_u16(),
            });
        }

        let request = response.json::<RollupRequest>().await?;
        Ok(Some(request))
    }

    #[instrument(skip(self, payload))]
    async fn add_notice(&self, payload: &str) -> Result<(), RollupError> {
        self.post_payload("notice", payload).await
    }

    #[instrument(skip(self, payload))]
    async fn add_report(&self, payload: &str) -> Result<(), RollupError> {
        self.post_payload("report", payload).await
    }
}
