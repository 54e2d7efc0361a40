use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Pomodoro timer configuration. Durations are minutes.
///
/// The engine itself has no error states; zero or negative durations are
/// rejected here, at the configuration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    #[serde(default = "default_work_time")]
    pub work_time: u64,
    #[serde(default = "default_short_break")]
    pub short_break: u64,
    #[serde(default = "default_long_break")]
    pub long_break: u64,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u64,
    #[serde(default)]
    pub auto_start: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
}

fn default_work_time() -> u64 {
    25
}
fn default_short_break() -> u64 {
    5
}
fn default_long_break() -> u64 {
    15
}
fn default_long_break_interval() -> u64 {
    4
}
fn default_true() -> bool {
    true
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_time: default_work_time(),
            short_break: default_short_break(),
            long_break: default_long_break(),
            long_break_interval: default_long_break_interval(),
            auto_start: false,
            sound_enabled: true,
        }
    }
}

impl PomodoroSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("work_time", self.work_time),
            ("short_break", self.short_break),
            ("long_break", self.long_break),
            ("long_break_interval", self.long_break_interval),
        ] {
            if value == 0 {
                return Err(ValidationError::InvalidValue {
                    field: field.into(),
                    message: "must be greater than zero".into(),
                });
            }
        }
        Ok(())
    }
}
