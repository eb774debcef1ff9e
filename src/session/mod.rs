//! Session credential handling
//!
//! The credential is a read-only cookie collection proving the user is
//! logged in to Hoyolab. Extraction from browser profile stores is out of
//! scope; the [`CookieSource`] trait is the hand-off point and the shipped
//! implementation reads a cookie export file.

mod provider;
mod types;

pub use provider::{CookieFile, CookieSource};
pub use types::{BrowserCookie, CredentialError, SessionCredential, SESSION_TOKEN_NAME};
