//! Check-in API wire types

use serde::Deserialize;
use thiserror::Error;

/// Whether today's reward has been collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyStatus {
    Claimed,
    Unclaimed,
}

/// Result of a successful claim, including the service's human-readable
/// message.
#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    pub message: String,
}

/// Envelope all sign endpoints use: `{retcode, message, data}`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub retcode: Option<i32>,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Payload of the sign-info endpoint.
#[derive(Debug, Deserialize)]
pub struct SignInfo {
    pub is_sign: bool,
}

/// Check-in client errors. Converted to retry-loop input at the call
/// boundary, never propagated as fatal.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    InvalidResponse(String),

    #[error("invalid request header: {0}")]
    Header(String),
}
