//! Check-in retry loop

mod runner;

pub use runner::{CheckInRunner, Delay, LoopOutcome, LoopState, TokioDelay, RETRY_INTERVAL};
