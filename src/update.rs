//! Update check
//!
//! The release channel is a redirecting "latest release" URL whose final
//! path segment carries the newest version tag (`v2.1`). Versions compare
//! numerically component by component, not as strings, so "10" orders after
//! "9". Failures here are logged and ignored - the check runs after the
//! claim already succeeded.

use std::cmp::Ordering;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, info, warn};

/// Latest-release endpoint; redirects to the versioned release page.
pub const UPDATE_CHANNEL: &str = "https://github.com/darkGrimoire/hoyolab-daily-bot/releases/latest";

/// Dot-separated numeric version, compared component-wise with missing
/// trailing components treated as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    parts: Vec<u64>,
}

impl FromStr for Version {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .trim_start_matches('v')
            .split('.')
            .map(str::parse)
            .collect::<Result<Vec<u64>, _>>()?;
        Ok(Self { parts })
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .parts
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        f.write_str(&rendered)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Extract the version from the redirect target's final path segment.
fn version_from_release_url(url: &str) -> Option<Version> {
    let segment = url.trim_end_matches('/').rsplit('/').next()?;
    segment.parse().ok()
}

/// Decide whether the resolved release URL announces a version newer than
/// `current`. Returns that version when it does.
fn newer_release(final_url: &str, current: &Version) -> Option<Version> {
    version_from_release_url(final_url).filter(|latest| latest > current)
}

/// Check for a newer release and log a notice if one exists.
///
/// Returns whether a notice was emitted so the caller can pause long enough
/// for an interactive user to read it.
pub async fn notify_if_newer() -> bool {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            warn!("Update check skipped: {}", e);
            return false;
        }
    };

    let current: Version = match env!("CARGO_PKG_VERSION").parse() {
        Ok(v) => v,
        Err(_) => return false,
    };

    let final_url = match client.get(UPDATE_CHANNEL).send().await {
        Ok(response) => response.url().to_string(),
        Err(e) => {
            warn!("Update check failed, skipping: {}", e);
            return false;
        }
    };
    debug!("update channel resolved to {}", final_url);

    match newer_release(&final_url, &current) {
        Some(latest) => {
            info!(
                "New version (v{}) available! Please go to {} to download it.",
                latest, UPDATE_CHANNEL
            );
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_numeric_compare_beats_lexicographic() {
        // "10" < "9" as strings; numerically 10 is newer
        assert!(v("10.0") > v("9.0"));
        assert!(v("2.10") > v("2.9"));
    }

    #[test]
    fn test_missing_components_are_zero() {
        assert_eq!(v("2.0").cmp(&v("2.0.0")), Ordering::Equal);
        assert!(v("2.0.1") > v("2.0"));
    }

    #[test]
    fn test_parse_strips_v_prefix() {
        assert_eq!(v("v2.1"), v("2.1"));
    }

    #[test]
    fn test_version_from_release_url() {
        let version =
            version_from_release_url("https://github.com/x/y/releases/tag/v2.1").unwrap();
        assert_eq!(version, v("2.1"));
    }

    #[test]
    fn test_non_numeric_segment_is_rejected() {
        assert!(version_from_release_url("https://github.com/x/y/releases/latest").is_none());
        assert!("not-a-version".parse::<Version>().is_err());
    }

    #[test]
    fn test_newer_release_notices_numeric_upgrade() {
        // "10.0" sorts before "9.0" as a string; the notice must still fire
        let latest =
            newer_release("https://github.com/x/y/releases/tag/v10.0", &v("9.0")).unwrap();
        assert_eq!(latest, v("10.0"));
    }

    #[test]
    fn test_newer_release_silent_when_current_or_older() {
        assert!(newer_release("https://github.com/x/y/releases/tag/v2.0", &v("2.0")).is_none());
        assert!(newer_release("https://github.com/x/y/releases/tag/v1.9", &v("2.0")).is_none());
    }

    #[test]
    fn test_newer_release_silent_on_unresolved_redirect() {
        // Channel did not redirect to a tagged release
        assert!(newer_release("https://github.com/x/y/releases/latest", &v("2.0")).is_none());
    }

    #[test]
    fn test_version_display_roundtrip() {
        assert_eq!(v("v2.1").to_string(), "2.1");
        assert_eq!(v("10.0.3").to_string(), "10.0.3");
    }
}
