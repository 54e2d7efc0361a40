//! Pomodoro focus timer.

mod engine;
mod settings;

pub use engine::{PendingBreak, Phase, PomodoroEngine};
pub use settings::PomodoroSettings;
