//! Cookie source implementations
//!
//! [`CookieSource`] is the seam between the bot and whatever extracted the
//! cookies from a browser. [`CookieFile`] reads a JSON export placed next to
//! the config file: an array of `{name, value, domain, browser?}` entries.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::BrowserKind;

use super::types::{BrowserCookie, CredentialError, SessionCredential};

/// Supplies a session credential for a cookie domain.
pub trait CookieSource {
    fn load(
        &self,
        domain: &str,
        browser: BrowserKind,
    ) -> Result<SessionCredential, CredentialError>;
}

/// Cookie source backed by a JSON export file.
pub struct CookieFile {
    path: PathBuf,
}

impl CookieFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default export location next to the config file.
    pub fn default_path() -> Option<PathBuf> {
        crate::app_dir().map(|p| p.join("cookies.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CookieSource for CookieFile {
    fn load(
        &self,
        domain: &str,
        browser: BrowserKind,
    ) -> Result<SessionCredential, CredentialError> {
        if !self.path.exists() {
            return Err(CredentialError::NotFound(self.path.clone()));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let all: Vec<BrowserCookie> = serde_json::from_str(&content)?;
        let total = all.len();

        let matched: Vec<BrowserCookie> = all
            .into_iter()
            .filter(|c| domain_matches(&c.domain, domain) && browser_matches(c.browser, browser))
            .collect();

        info!(
            "Loaded {} of {} cookies for domain {} from {:?}",
            matched.len(),
            total,
            domain,
            self.path
        );

        SessionCredential::new(matched)
    }
}

/// Suffix-match a cookie's domain against the wanted domain, ignoring the
/// leading dot browsers store on host-wide cookies.
fn domain_matches(cookie_domain: &str, wanted: &str) -> bool {
    let cookie = cookie_domain.trim_start_matches('.');
    let wanted = wanted.trim_start_matches('.');
    cookie == wanted
        || cookie.ends_with(&format!(".{}", wanted))
        // A broader cookie domain must still be a real registrable domain
        // (two labels or more) and align on a label boundary
        || (cookie.contains('.') && wanted.ends_with(&format!(".{}", cookie)))
}

fn browser_matches(cookie_browser: Option<BrowserKind>, selector: BrowserKind) -> bool {
    match (selector, cookie_browser) {
        (BrowserKind::All, _) => true,
        (_, None) => true,
        (sel, Some(b)) => sel == b,
    }
}
