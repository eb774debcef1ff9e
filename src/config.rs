//! Application configuration
//!
//! Loaded once at startup and passed by reference everywhere; never mutated
//! afterwards. A missing or broken config file (including a file missing any
//! required key) is replaced wholesale with the default set - no partial merge.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Which browser's cookies the session provider should accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    All,
    Firefox,
    Chrome,
    Opera,
    Edge,
    Chromium,
}

/// Application configuration.
///
/// Every field is required on disk: serde fails the whole parse when one is
/// absent, which triggers the auto-repair path in [`AppConfig::load_from`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Browser whose cookies authenticate the session
    pub browser_selector: BrowserKind,
    /// UTC offset of the game server, in hours
    pub server_utc_offset_hours: i32,
    /// Fixed delay after server midnight before the check-in fires
    pub delay_minutes: u32,
    /// Add a random offset to the trigger time on every scheduling run
    pub randomize_enabled: bool,
    /// Upper bound of the random offset, in seconds (inclusive)
    pub random_range_seconds: u32,
    /// Check-in campaign identifier on the remote service
    pub activity_id: String,
    /// Cookie domain the session credential is scoped to
    pub cookie_domain: String,
    /// Name under which the recurring OS task is registered
    pub scheduled_task_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            browser_selector: BrowserKind::All,
            server_utc_offset_hours: 8,
            delay_minutes: 0,
            randomize_enabled: false,
            random_range_seconds: 3600,
            activity_id: "e202102251931481".to_string(),
            cookie_domain: ".hoyoverse.com".to_string(),
            scheduled_task_name: "HoyolabCheckInBot".to_string(),
        }
    }
}

impl AppConfig {
    /// Get config file path
    pub fn config_path() -> Option<PathBuf> {
        crate::app_dir().map(|p| p.join("config.json"))
    }

    /// Load config from the default location, repairing it if needed.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No config directory available, using default config");
                Self::default()
            }
        }
    }

    /// Load config from `path`. Absent, unreadable, or incomplete files are
    /// rewritten with the full default set.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str::<Self>(&content) {
                    Ok(config) => {
                        info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        warn!("Config file broken ({}), recreating with defaults", e);
                    }
                },
                Err(e) => {
                    warn!("Failed to read config file: {}", e);
                }
            }
        } else {
            info!("Config not found, creating default config at {:?}", path);
        }

        let config = Self::default();
        config.save_to(path);
        config
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match serde_json::to_string_pretty(self) {
            Ok(content) => {
                if let Err(e) = std::fs::write(path, content) {
                    error!("Failed to save config: {}", e);
                } else {
                    info!("Config saved to {:?}", path);
                }
            }
            Err(e) => {
                error!("Failed to serialize config: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hoyolab-bot-test-{}-{}", std::process::id(), name))
            .join("config.json")
    }

    #[test]
    fn test_default_config_values() {
        let config = AppConfig::default();
        assert_eq!(config.browser_selector, BrowserKind::All);
        assert_eq!(config.server_utc_offset_hours, 8);
        assert_eq!(config.delay_minutes, 0);
        assert!(!config.randomize_enabled);
        assert_eq!(config.random_range_seconds, 3600);
        assert_eq!(config.activity_id, "e202102251931481");
        assert_eq!(config.cookie_domain, ".hoyoverse.com");
        assert_eq!(config.scheduled_task_name, "HoyolabCheckInBot");
    }

    #[test]
    fn test_missing_file_creates_defaults() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);

        let config = AppConfig::load_from(&path);
        assert_eq!(config.server_utc_offset_hours, 8);
        assert!(path.exists(), "default config must be persisted");
    }

    #[test]
    fn test_missing_key_repairs_full_default_set() {
        let path = temp_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        // serverUtcOffsetHours deliberately absent, other keys customized
        std::fs::write(
            &path,
            r#"{
                "browserSelector": "firefox",
                "delayMinutes": 30,
                "randomizeEnabled": true,
                "randomRangeSeconds": 100,
                "activityId": "custom",
                "cookieDomain": ".example.com",
                "scheduledTaskName": "Custom"
            }"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path);

        // No partial merge: the whole default set comes back
        assert_eq!(config.browser_selector, BrowserKind::All);
        assert_eq!(config.delay_minutes, 0);
        assert_eq!(config.activity_id, "e202102251931481");

        // And the repaired file contains every required key
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        for key in [
            "browserSelector",
            "serverUtcOffsetHours",
            "delayMinutes",
            "randomizeEnabled",
            "randomRangeSeconds",
            "activityId",
            "cookieDomain",
            "scheduledTaskName",
        ] {
            assert!(written.get(key).is_some(), "missing key {} after repair", key);
        }
    }

    #[test]
    fn test_valid_file_roundtrip() {
        let path = temp_path("roundtrip");
        let mut config = AppConfig::default();
        config.browser_selector = BrowserKind::Edge;
        config.delay_minutes = 15;
        config.save_to(&path);

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.browser_selector, BrowserKind::Edge);
        assert_eq!(loaded.delay_minutes, 15);
    }
}
