//! Remote check-in API client
//!
//! Thin authenticated wrapper over the sign-in endpoints. Failures here are
//! never fatal: the retry loop consumes them and tries again.

mod checkin;
mod types;

pub use checkin::{CheckInApi, CheckInClient};
pub use types::{ClaimOutcome, ClientError, DailyStatus};
