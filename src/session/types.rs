//! Session credential types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BrowserKind;

/// Cookie that must be present for an authenticated session.
pub const SESSION_TOKEN_NAME: &str = "cookie_token_v2";

/// A single cookie as exported from a browser profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    /// Browser the cookie came from; untagged entries match any selector.
    #[serde(default)]
    pub browser: Option<BrowserKind>,
}

/// Opaque cookie collection scoped to the configured domain.
///
/// Owned for the process lifetime and used read-only by the check-in client.
#[derive(Debug, Clone)]
pub struct SessionCredential {
    cookies: Vec<BrowserCookie>,
}

impl SessionCredential {
    /// Build a credential, verifying the required session token is present.
    pub fn new(cookies: Vec<BrowserCookie>) -> Result<Self, CredentialError> {
        if !cookies.iter().any(|c| c.name == SESSION_TOKEN_NAME) {
            return Err(CredentialError::MissingToken);
        }
        Ok(Self { cookies })
    }

    pub fn cookies(&self) -> &[BrowserCookie] {
        &self.cookies
    }

    /// Render the collection as a `Cookie` request-header value.
    ///
    /// The credential's cookies are scoped to the web domain while the API
    /// lives on a different host, so a domain-scoped jar would drop them;
    /// the header is attached explicitly instead.
    pub fn header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Session credential errors. All of these are fatal at startup.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("cookie export not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to read cookie export: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse cookie export: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no '{}' cookie found for the configured domain", SESSION_TOKEN_NAME)]
    MissingToken,
}
