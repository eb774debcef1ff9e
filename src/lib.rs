//! Hoyolab Daily Check-In Bot
//!
//! Automates the daily check-in on the Hoyolab rewards site by reusing
//! browser session cookies, then registers itself as a recurring OS-level
//! scheduled task so the claim happens every day without interaction.

pub mod checkin;
pub mod client;
pub mod config;
pub mod schedule;
pub mod session;
pub mod update;

use std::path::PathBuf;

/// Application name used for config/log directories and the task description.
pub const APP_NAME: &str = "hoyolab-daily-bot";

/// Get the application data directory (config, cookies, logs).
pub fn app_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}

/// Get log directory path.
pub fn log_dir() -> Option<PathBuf> {
    app_dir().map(|p| p.join("logs"))
}

/// Initialize logging: console layer plus a daily-rotating file layer
/// retained for 365 days. The returned guard must be held for the process
/// lifetime so the non-blocking file writer flushes on exit.
pub fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false);

    let file_appender = log_dir().and_then(|dir| {
        std::fs::create_dir_all(&dir).ok()?;
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(APP_NAME)
            .filename_suffix("log")
            .max_log_files(365)
            .build(&dir)
            .ok()
    });

    if let Some(appender) = file_appender {
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(non_blocking);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();

        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();

        None
    }
}
