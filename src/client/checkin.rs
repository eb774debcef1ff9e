//! Hoyolab check-in client
//!
//! Issues the "sign info" read and the "sign" write against the overseas
//! API host, authenticated by the session credential. Endpoint layout and
//! headers mirror what the activity's web page sends.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, COOKIE, ORIGIN, REFERER};
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::config::AppConfig;
use crate::session::SessionCredential;

use super::types::{ApiResponse, ClaimOutcome, ClientError, DailyStatus, SignInfo};

const API_BASE: &str = "https://hk4e-api-os.mihoyo.com";
const WEB_ORIGIN: &str = "https://webstatic-sea.mihoyo.com";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Operations the retry loop drives. Implemented by [`CheckInClient`] and by
/// scripted mocks in tests.
pub trait CheckInApi {
    /// Read today's check-in status for the configured activity.
    fn fetch_status(&self) -> impl std::future::Future<Output = Result<DailyStatus, ClientError>>;

    /// Claim today's reward. Idempotent on the service side.
    fn claim_reward(&self) -> impl std::future::Future<Output = Result<ClaimOutcome, ClientError>>;
}

/// Authenticated client for the check-in endpoints.
pub struct CheckInClient {
    client: Client,
    activity_id: String,
}

impl CheckInClient {
    /// Build a client carrying the session credential on every request.
    pub fn new(config: &AppConfig, credential: &SessionCredential) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Accept",
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert("Accept-Language", HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(ORIGIN, HeaderValue::from_static(WEB_ORIGIN));
        headers.insert(
            REFERER,
            HeaderValue::from_str(&referer_url(&config.activity_id))
                .map_err(|e| ClientError::Header(e.to_string()))?,
        );
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&credential.header_value())
                .map_err(|e| ClientError::Header(e.to_string()))?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            activity_id: config.activity_id.clone(),
        })
    }
}

impl CheckInApi for CheckInClient {
    async fn fetch_status(&self) -> Result<DailyStatus, ClientError> {
        let response = self
            .client
            .get(format!("{}/event/sol/info", API_BASE))
            .query(&[("lang", "en-us"), ("act_id", self.activity_id.as_str())])
            .send()
            .await?;

        let body = response.text().await?;
        debug!("sign info response: {}", body);
        parse_status(&body)
    }

    async fn claim_reward(&self) -> Result<ClaimOutcome, ClientError> {
        let response = self
            .client
            .post(format!("{}/event/sol/sign", API_BASE))
            .query(&[("lang", "en-us")])
            .json(&json!({ "act_id": self.activity_id }))
            .send()
            .await?;

        let body = response.text().await?;
        debug!("sign response: {}", body);
        parse_claim(&body)
    }
}

/// Sign-in page the web client reports as referer.
fn referer_url(activity_id: &str) -> String {
    format!(
        "{}/ys/event/signin-sea/index.html?act_id={}&lang=en-us",
        WEB_ORIGIN, activity_id
    )
}

fn parse_status(body: &str) -> Result<DailyStatus, ClientError> {
    let parsed: ApiResponse<SignInfo> =
        serde_json::from_str(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    match parsed.data {
        Some(info) if info.is_sign => Ok(DailyStatus::Claimed),
        Some(_) => Ok(DailyStatus::Unclaimed),
        None => Err(ClientError::InvalidResponse(format!(
            "no data in response (retcode {:?}, message {:?})",
            parsed.retcode, parsed.message
        ))),
    }
}

fn parse_claim(body: &str) -> Result<ClaimOutcome, ClientError> {
    let parsed: ApiResponse<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    match parsed.message {
        Some(message) => Ok(ClaimOutcome { message }),
        None => Err(ClientError::InvalidResponse(
            "no message in sign response".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_claimed() {
        let body = r#"{"retcode":0,"message":"OK","data":{"is_sign":true,"total_sign_day":5}}"#;
        assert_eq!(parse_status(body).unwrap(), DailyStatus::Claimed);
    }

    #[test]
    fn test_parse_status_unclaimed() {
        let body = r#"{"retcode":0,"message":"OK","data":{"is_sign":false}}"#;
        assert_eq!(parse_status(body).unwrap(), DailyStatus::Unclaimed);
    }

    #[test]
    fn test_parse_status_without_data_is_error() {
        // Expired session: the service answers with a retcode and no data
        let body = r#"{"retcode":-100,"message":"Please login","data":null}"#;
        assert!(matches!(
            parse_status(body),
            Err(ClientError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_status_garbage_is_error() {
        assert!(parse_status("<html>502</html>").is_err());
    }

    #[test]
    fn test_parse_claim_message() {
        let body = r#"{"retcode":0,"message":"OK","data":{"code":"ok"}}"#;
        assert_eq!(parse_claim(body).unwrap().message, "OK");
    }

    #[test]
    fn test_referer_includes_activity() {
        let url = referer_url("e202102251931481");
        assert!(url.contains("act_id=e202102251931481"));
        assert!(url.starts_with(WEB_ORIGIN));
    }
}
