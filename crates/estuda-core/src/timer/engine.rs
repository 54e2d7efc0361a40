//! Pomodoro engine implementation.
//!
//! The engine is a tick-driven state machine with no internal thread or
//! timer handle. One `tick()` call is one elapsed second; the caller owns
//! the scheduling primitive (a UI interval, a CLI loop, a test harness)
//! and must cancel it on teardown. Collapsed state: `phase` in
//! {Work, Break} crossed with `running`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PomodoroEngine::new(settings);
//! engine.toggle(); // start
//! // one call per second:
//! if let Some(event) = engine.tick() {
//!     // WorkCompleted / BreakCompleted
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::settings::PomodoroSettings;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

/// Break computed at work completion, awaiting the caller's
/// start-or-skip decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBreak {
    pub minutes: u64,
    pub long: bool,
}

/// Core Pomodoro state machine.
///
/// Serializable so a CLI invocation can persist it between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroEngine {
    settings: PomodoroSettings,
    phase: Phase,
    running: bool,
    remaining_secs: u64,
    /// Duration the current phase started from, for the progress fraction.
    initial_secs: u64,
    #[serde(default)]
    completed_pomodoros: u64,
    /// Work minutes reported so far (configured durations, not wall time).
    #[serde(default)]
    total_work_min: u64,
    /// None outside the window between a work completion and the caller's
    /// break decision.
    #[serde(default)]
    pending_break: Option<PendingBreak>,
}

impl PomodoroEngine {
    /// Fresh engine: work phase, paused, full work duration on the clock.
    pub fn new(settings: PomodoroSettings) -> Self {
        let initial = settings.work_time * 60;
        Self {
            settings,
            phase: Phase::Work,
            running: false,
            remaining_secs: initial,
            initial_secs: initial,
            completed_pomodoros: 0,
            total_work_min: 0,
            pending_break: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn completed_pomodoros(&self) -> u64 {
        self.completed_pomodoros
    }

    pub fn total_work_min(&self) -> u64 {
        self.total_work_min
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn pending_break(&self) -> Option<PendingBreak> {
        self.pending_break
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn progress(&self) -> f64 {
        if self.initial_secs == 0 {
            return 0.0;
        }
        (self.initial_secs - self.remaining_secs) as f64 / self.initial_secs as f64
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            running: self.running,
            remaining_secs: self.remaining_secs,
            initial_secs: self.initial_secs,
            progress: self.progress(),
            completed_pomodoros: self.completed_pomodoros,
            total_work_min: self.total_work_min,
            pending_break_min: self.pending_break.map(|p| p.minutes),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Advance the clock by one second. Returns the completion event when
    /// the current phase reaches zero; the engine stops running before
    /// the event is produced, and further ticks do nothing until the next
    /// phase is started.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }
        self.running = false;
        match self.phase {
            Phase::Work => Some(self.complete_work()),
            Phase::Break => Some(self.complete_break()),
        }
    }

    /// Advance by `n` seconds, collecting any completion events.
    pub fn tick_n(&mut self, n: u64) -> Vec<Event> {
        (0..n).filter_map(|_| self.tick()).collect()
    }

    /// Start/pause: flips `running` without resetting the clock.
    pub fn toggle(&mut self) -> Event {
        self.running = !self.running;
        if self.running {
            Event::TimerStarted {
                phase: self.phase,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            }
        } else {
            Event::TimerPaused {
                phase: self.phase,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            }
        }
    }

    /// Enter the break computed at the last work completion. No-op unless
    /// a break decision is pending. Starts running immediately only with
    /// `auto_start`; otherwise the break waits for a `toggle()`.
    pub fn start_break(&mut self) -> Option<Event> {
        let pending = self.pending_break.take()?;
        self.enter_break(pending.minutes);
        self.running = self.settings.auto_start;
        Some(Event::BreakStarted {
            duration_min: pending.minutes,
            long_break: pending.long,
            running: self.running,
            at: Utc::now(),
        })
    }

    /// Skip the pending break and line up a fresh work phase. Runs
    /// immediately only with `auto_start`.
    pub fn skip_break(&mut self) -> Option<Event> {
        self.pending_break.take()?;
        self.enter_work();
        self.running = self.settings.auto_start;
        Some(Event::WorkStarted {
            duration_min: self.settings.work_time,
            running: self.running,
            at: Utc::now(),
        })
    }

    /// Force back to a paused work phase. The completed-session counter
    /// survives.
    pub fn reset(&mut self) -> Event {
        self.enter_work();
        self.running = false;
        self.pending_break = None;
        Event::TimerReset { at: Utc::now() }
    }

    /// Apply new settings. A changed work duration resets the clock only
    /// while the engine is not running; mid-run changes take effect at
    /// the next reset or phase start.
    pub fn set_settings(&mut self, settings: PomodoroSettings) {
        let work_changed = settings.work_time != self.settings.work_time;
        self.settings = settings;
        if !self.running && work_changed {
            let initial = self.settings.work_time * 60;
            self.remaining_secs = initial;
            self.initial_secs = initial;
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_work(&mut self) -> Event {
        self.completed_pomodoros += 1;
        self.total_work_min += self.settings.work_time;
        let long_break = self.completed_pomodoros % self.settings.long_break_interval == 0;
        let break_min = if long_break {
            self.settings.long_break
        } else {
            self.settings.short_break
        };
        if self.settings.auto_start {
            self.enter_break(break_min);
            self.running = true;
            self.pending_break = None;
        } else {
            self.pending_break = Some(PendingBreak {
                minutes: break_min,
                long: long_break,
            });
        }
        Event::WorkCompleted {
            minutes: self.settings.work_time,
            completed_pomodoros: self.completed_pomodoros,
            long_break,
            break_min,
            auto_started: self.settings.auto_start,
            at: Utc::now(),
        }
    }

    fn complete_break(&mut self) -> Event {
        self.enter_work();
        self.running = self.settings.auto_start;
        Event::BreakCompleted {
            auto_started: self.settings.auto_start,
            at: Utc::now(),
        }
    }

    fn enter_work(&mut self) {
        self.phase = Phase::Work;
        let initial = self.settings.work_time * 60;
        self.remaining_secs = initial;
        self.initial_secs = initial;
    }

    fn enter_break(&mut self, duration_min: u64) {
        self.phase = Phase::Break;
        let initial = duration_min * 60;
        self.remaining_secs = initial;
        self.initial_secs = initial;
    }
}
