//! Daily schedule planning and OS task registration
//!
//! Translates "claim at server midnight plus the configured delay (and
//! optional jitter)" into a host-local daily trigger and commits it to the
//! OS task scheduler. The registered task re-invokes this executable with
//! the skip-reschedule flag, unless jitter is enabled - a jittered install
//! must re-plan on every run so the trigger time keeps moving.

mod planner;
mod task;

pub use planner::{compute_trigger, sample_jitter, TriggerTime};
pub use task::{DailyTaskRequest, PowershellTaskScheduler, ScheduleError, TaskScheduler};

use chrono::Local;
use rand::thread_rng;
use tracing::info;

use crate::config::AppConfig;

/// Plan the daily trigger from the config and register it with `scheduler`.
///
/// Fatal on failure: the caller is expected to exit non-zero rather than
/// silently run unscheduled.
pub fn install(
    config: &AppConfig,
    scheduler: &impl TaskScheduler,
) -> Result<TriggerTime, ScheduleError> {
    let executable = std::env::current_exe()?;
    let working_dir = executable
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| executable.clone());

    let host_offset_secs = Local::now().offset().local_minus_utc();
    let jitter_secs = if config.randomize_enabled {
        sample_jitter(config.random_range_seconds, &mut thread_rng())
    } else {
        0
    };

    let trigger = compute_trigger(
        host_offset_secs,
        config.server_utc_offset_hours,
        config.delay_minutes,
        jitter_secs,
    );

    let request = DailyTaskRequest {
        task_name: config.scheduled_task_name.clone(),
        trigger,
        executable,
        working_dir,
        // A jittered task re-plans itself on every run
        skip_reschedule_flag: !config.randomize_enabled,
        description: format!("Hoyolab Daily Check-In Bot v{}", env!("CARGO_PKG_VERSION")),
    };

    scheduler.register_daily(&request)?;

    info!(
        "Scheduled daily check-in at {:02}:{:02}:{:02} (task: {})",
        trigger.hour, trigger.minute, trigger.second, request.task_name
    );

    Ok(trigger)
}
