//! Check-in retry loop
//!
//! Explicit state machine driven by a single sequential control loop:
//! check the status, claim if unclaimed, and on any remote failure wait a
//! fixed minute before checking again. There is no retry cap - the claim is
//! idempotent on the service side, so at-least-once delivery is safe and the
//! loop only ends on a terminal success.

use std::time::Duration;

use chrono::Local;
use tracing::{info, warn};

use crate::client::{CheckInApi, DailyStatus};

/// Fixed wait between retries.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(60);

/// Retry loop states. `Done` is terminal and reached at most once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    Checking,
    Claiming,
    RetryWait,
    Done(LoopOutcome),
}

/// Terminal outcome of the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The reward was already collected when first checked.
    AlreadyClaimed,
    /// The reward was claimed this run; carries the service's message.
    Claimed { message: String },
}

/// Injectable suspension point so tests can replace the real delay.
pub trait Delay {
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()>;
}

/// Production delay backed by the tokio timer.
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Drives the check-claim-verify cycle until a terminal success.
pub struct CheckInRunner<A, D> {
    api: A,
    delay: D,
}

impl<A: CheckInApi, D: Delay> CheckInRunner<A, D> {
    pub fn new(api: A, delay: D) -> Self {
        Self { api, delay }
    }

    /// Run the loop to completion.
    pub async fn run(&self) -> LoopOutcome {
        let mut state = LoopState::Checking;

        loop {
            state = match state {
                LoopState::Checking => match self.api.fetch_status().await {
                    Ok(DailyStatus::Claimed) => {
                        info!("Reward already claimed when checked at {}", timestamp());
                        LoopState::Done(LoopOutcome::AlreadyClaimed)
                    }
                    Ok(DailyStatus::Unclaimed) => {
                        info!("Reward not claimed yet, claiming...");
                        LoopState::Claiming
                    }
                    Err(e) => {
                        warn!("Status check failed: {}", e);
                        LoopState::RetryWait
                    }
                },

                LoopState::Claiming => match self.api.claim_reward().await {
                    Ok(outcome) => {
                        info!("Reward claimed at {}: {}", timestamp(), outcome.message);
                        LoopState::Done(LoopOutcome::Claimed {
                            message: outcome.message,
                        })
                    }
                    Err(e) => {
                        warn!("Claim failed: {}", e);
                        LoopState::RetryWait
                    }
                },

                LoopState::RetryWait => {
                    info!(
                        "Retrying in {} seconds (error at {})",
                        RETRY_INTERVAL.as_secs(),
                        timestamp()
                    );
                    self.delay.sleep(RETRY_INTERVAL).await;
                    LoopState::Checking
                }

                LoopState::Done(outcome) => return outcome,
            };
        }
    }
}

fn timestamp() -> String {
    Local::now().format("%d %B, %Y | %H:%M:%S").to_string()
}
