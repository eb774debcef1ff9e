//! OS task registration
//!
//! The core only depends on the narrow [`TaskScheduler`] contract. The
//! shipped implementation shells out to PowerShell's scheduled-task cmdlets,
//! which is what the Windows targets this bot ships on provide.

use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

use super::planner::TriggerTime;

/// A daily recurring task invoking this program.
#[derive(Debug, Clone)]
pub struct DailyTaskRequest {
    pub task_name: String,
    pub trigger: TriggerTime,
    pub executable: PathBuf,
    pub working_dir: PathBuf,
    /// Append the run-without-rescheduling flag to the task's invocation.
    pub skip_reschedule_flag: bool,
    pub description: String,
}

/// Task scheduling errors. Registration failure is fatal to the caller.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("failed to invoke the task scheduler: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("task registration failed (exit code {code:?})")]
    Registration { code: Option<i32> },
}

/// Registers a recurring daily task with the host scheduler.
pub trait TaskScheduler {
    fn register_daily(&self, request: &DailyTaskRequest) -> Result<(), ScheduleError>;
}

/// Scheduler backed by `Register-ScheduledTask` via PowerShell.
pub struct PowershellTaskScheduler;

impl TaskScheduler for PowershellTaskScheduler {
    fn register_daily(&self, request: &DailyTaskRequest) -> Result<(), ScheduleError> {
        let script = build_registration_script(request);
        debug!("Registering scheduled task:\n{}", script);

        let status = Command::new("powershell")
            .args(["-NoProfile", "-Command", &script])
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(ScheduleError::Registration {
                code: status.code(),
            })
        }
    }
}

/// Build the registration script: daily trigger at the planned time,
/// elevated run level, resilient settings (start when available, run on
/// battery, wake to run, network required, parallel instances, 30 restarts
/// at 1-minute intervals).
fn build_registration_script(request: &DailyTaskRequest) -> String {
    let argument = if request.skip_reschedule_flag {
        " -Argument '-R'"
    } else {
        ""
    };

    format!(
        "$Time = New-ScheduledTaskTrigger -Daily -At {hour}:{minute}:{second}\n\
         $Action = New-ScheduledTaskAction -Execute '{exe}'{argument} -WorkingDirectory '{workdir}'\n\
         $Setting = New-ScheduledTaskSettingsSet -StartWhenAvailable -AllowStartIfOnBatteries -DontStopIfGoingOnBatteries -WakeToRun -RunOnlyIfNetworkAvailable -MultipleInstances Parallel -Priority 3 -RestartCount 30 -RestartInterval (New-TimeSpan -Minutes 1)\n\
         Register-ScheduledTask -Force -TaskName \"{name}\" -Trigger $Time -Action $Action -Settings $Setting -Description \"{description}\" -RunLevel Highest",
        hour = request.trigger.hour,
        minute = request.trigger.minute,
        second = request.trigger.second,
        exe = request.executable.display(),
        argument = argument,
        workdir = request.working_dir.display(),
        name = request.task_name,
        description = request.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(skip_flag: bool) -> DailyTaskRequest {
        DailyTaskRequest {
            task_name: "HoyolabCheckInBot".into(),
            trigger: TriggerTime {
                hour: 1,
                minute: 0,
                second: 0,
            },
            executable: PathBuf::from(r"C:\bot\hoyolab-daily-bot.exe"),
            working_dir: PathBuf::from(r"C:\bot"),
            skip_reschedule_flag: skip_flag,
            description: "Hoyolab Daily Check-In Bot v2.0.0".into(),
        }
    }

    #[test]
    fn test_script_contains_trigger_and_target() {
        let script = build_registration_script(&request(true));
        assert!(script.contains("-Daily -At 1:0:0"));
        assert!(script.contains(r"-Execute 'C:\bot\hoyolab-daily-bot.exe'"));
        assert!(script.contains(r"-WorkingDirectory 'C:\bot'"));
        assert!(script.contains("-TaskName \"HoyolabCheckInBot\""));
        assert!(script.contains("-RunLevel Highest"));
    }

    #[test]
    fn test_script_resilience_settings() {
        let script = build_registration_script(&request(true));
        for setting in [
            "-StartWhenAvailable",
            "-AllowStartIfOnBatteries",
            "-WakeToRun",
            "-RunOnlyIfNetworkAvailable",
            "-MultipleInstances Parallel",
            "-RestartCount 30",
        ] {
            assert!(script.contains(setting), "missing setting {}", setting);
        }
    }

    #[test]
    fn test_skip_flag_appended_only_when_requested() {
        assert!(build_registration_script(&request(true)).contains("-Argument '-R'"));
        assert!(!build_registration_script(&request(false)).contains("-Argument"));
    }
}
