use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every timer state change produces an Event. The CLI prints them; a GUI
/// would subscribe to them. Carrying the payload on the event keeps the
/// engine free of storage concerns: the caller folds `minutes` from
/// [`Event::WorkCompleted`] into its subject counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A work phase finished. Emitted exactly once per completed phase,
    /// after the engine has stopped running. `minutes` is the configured
    /// work duration, not wall time.
    WorkCompleted {
        minutes: u64,
        completed_pomodoros: u64,
        long_break: bool,
        break_min: u64,
        auto_started: bool,
        at: DateTime<Utc>,
    },
    /// A break finished; the engine is back on a fresh work phase.
    BreakCompleted {
        auto_started: bool,
        at: DateTime<Utc>,
    },
    /// A pending break was accepted.
    BreakStarted {
        duration_min: u64,
        long_break: bool,
        running: bool,
        at: DateTime<Utc>,
    },
    /// A pending break was skipped; a fresh work phase is ready.
    WorkStarted {
        duration_min: u64,
        running: bool,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        running: bool,
        remaining_secs: u64,
        initial_secs: u64,
        progress: f64,
        completed_pomodoros: u64,
        total_work_min: u64,
        pending_break_min: Option<u64>,
        at: DateTime<Utc>,
    },
}
