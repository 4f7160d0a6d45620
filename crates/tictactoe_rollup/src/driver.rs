//! Sequential polling loop.
//!
//! One request is fetched, processed to completion and its status
//! reported with the next `/finish` call. Nothing runs concurrently.

use crate::dapp::Dapp;
use crate::rollup::{RollupClient, RollupError};
use rand::rngs::StdRng;
use std::time::Duration;
use tictactoe_core::Status;
use tracing::{debug, info, instrument, warn};

/// Drives a [`Dapp`] from a [`RollupClient`].
#[derive(Debug, derive_new::new)]
pub struct Driver<C, R = StdRng> {
    client: C,
    dapp: Dapp<R>,
    poll_interval: Duration,
    #[new(default)]
    status: Status,
}

impl<C, R> Driver<C, R>
where
    C: RollupClient,
    R: rand::Rng + Send,
{
    /// The rollup client requests come from.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The application being driven.
    pub fn dapp(&self) -> &Dapp<R> {
        &self.dapp
    }

    /// Status that will be reported with the next `/finish`.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Reports the last status and processes at most one request.
    ///
    /// Returns `Ok(false)` when nothing was pending. On a transport error
    /// the pending status is kept so it is reported on the next attempt.
    #[instrument(skip(self), fields(status = %self.status))]
    pub async fn step(&mut self) -> Result<bool, RollupError> {
        let Some(request) = self.client.finish(self.status).await? else {
            debug!("No pending rollup request, trying again");
            return Ok(false);
        };

        self.status = self.dapp.handle(&self.client, request).await;
        info!(status = %self.status, "Request processed");
        Ok(true)
    }

    /// Polls until Ctrl-C. Transport errors are logged and retried after
    /// the poll interval.
    pub async fn run(mut self) -> Result<(), RollupError> {
        info!(poll_interval_ms = self.poll_interval.as_millis() as u64, "Starting polling loop");
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, leaving polling loop");
                    return Ok(());
                }
                result = self.step() => {
                    if let Err(e) = result {
                        warn!(error = %e, "Rollup server unreachable");
                        tokio::time::sleep(self.poll_interval).await;
                    }
                }
            }
        }
    }
}
