//! Per-request handlers that connect the gateway, the state machine and
//! the rollup server.

use crate::codec::{decode_advance, decode_inspect, encode_notice, encode_snapshot};
use crate::pretty::pretty_board;
use crate::rollup::{AdvanceData, InspectData, RollupClient, RollupRequest, RollupRequestType};
use rand::rngs::StdRng;
use tictactoe_core::{MatchStateMachine, Notice, Status};
use tracing::{debug, error, info, instrument, warn};

/// The tic-tac-toe application: one state machine plus its handlers.
#[derive(Debug)]
pub struct Dapp<R = StdRng> {
    machine: MatchStateMachine<R>,
}

impl<R: rand::Rng + Send> Dapp<R> {
    /// Wraps a state machine.
    pub fn new(machine: MatchStateMachine<R>) -> Self {
        Self { machine }
    }

    /// The underlying state machine.
    pub fn machine(&self) -> &MatchStateMachine<R> {
        &self.machine
    }

    /// Dispatches one rollup request and returns the status to report.
    #[instrument(skip_all, fields(request_type = %request.request_type))]
    pub async fn handle<C>(&mut self, client: &C, request: RollupRequest) -> Status
    where
        C: RollupClient + ?Sized,
    {
        match request.request_type {
            RollupRequestType::AdvanceState => match serde_json::from_value(request.data) {
                Ok(data) => self.handle_advance(client, data).await,
                Err(e) => {
                    error!(error = %e, "Malformed advance data");
                    Status::Reject
                }
            },
            RollupRequestType::InspectState => match serde_json::from_value(request.data) {
                Ok(data) => self.handle_inspect(client, data).await,
                Err(e) => {
                    error!(error = %e, "Malformed inspect data");
                    Status::Reject
                }
            },
            RollupRequestType::Unknown => {
                error!("Unknown rollup request type");
                Status::Reject
            }
        }
    }

    /// Decodes and applies an advance request, then posts its notices.
    ///
    /// Notice delivery failures are logged and do not change the status;
    /// the state change they describe has already happened.
    #[instrument(skip_all, fields(sender = %data.metadata.msg_sender, input = data.metadata.input_index))]
    pub async fn handle_advance<C>(&mut self, client: &C, data: AdvanceData) -> Status
    where
        C: RollupClient + ?Sized,
    {
        info!("Received advance request");
        let request = match decode_advance(&data) {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "Error in request payload");
                return Status::Reject;
            }
        };

        let verdict = self.machine.handle(&request);
        if verdict.is_accepted() {
            if let Some(game) = self.machine.current() {
                debug!(board = %pretty_board(game.board()), "Current board");
            }
        }
        for notice in &verdict.notices {
            send_notice(client, notice).await;
        }
        verdict.status
    }

    /// Reports a snapshot of the live match. Never mutates state.
    #[instrument(skip_all)]
    pub async fn handle_inspect<C>(&self, client: &C, data: InspectData) -> Status
    where
        C: RollupClient + ?Sized,
    {
        match decode_inspect(&data) {
            Ok(query) => info!(%query, "Received inspect request"),
            Err(e) => debug!(error = %e, "Inspect payload is not text"),
        }

        let payload = match encode_snapshot(self.machine.current()) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to encode snapshot");
                return Status::Reject;
            }
        };
        if let Err(e) = client.add_report(&payload).await {
            warn!(error = %e, "Report delivery failed");
        }
        Status::Accept
    }
}

#[instrument(skip_all, fields(notice = %notice))]
async fn send_notice<C>(client: &C, notice: &Notice)
where
    C: RollupClient + ?Sized,
{
    let payload = match encode_notice(notice) {
        Ok(payload) => payload,
        Err(e) => {
            error!(error = %e, "Failed to encode notice");
            return;
        }
    };
    match client.add_notice(&payload).await {
        Ok(()) => info!("Notice posted"),
        Err(e) => warn!(error = %e, "Notice delivery failed"),
    }
}
