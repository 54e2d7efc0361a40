//! # Estuda Core Library
//!
//! Core business logic for Estuda, a personal study tracker. The library
//! follows a CLI-first philosophy: every operation is available through
//! the standalone `estuda` binary, and any GUI would be a thin layer over
//! the same core.
//!
//! ## Architecture
//!
//! - **Subjects & topics**: two-level performance counters (subject-own +
//!   per-topic), summed only at read time
//! - **Goal scheduler**: weekly hour targets distributed across enabled
//!   weekdays, uniformly or per-day
//! - **Pomodoro engine**: a tick-driven work/break state machine that the
//!   caller drives; one `tick()` is one elapsed second
//! - **Stats**: pure aggregation of accuracy, hours and question totals,
//!   including mock-exam ("simulado") results
//! - **Storage**: SQLite-backed key-value store of JSON blobs, plus a
//!   settings layer with one canonical default
//!
//! ## Key Components
//!
//! - [`Subject`], [`Goal`], [`Simulado`]: the persisted domain model
//! - [`PomodoroEngine`]: the countdown state machine
//! - [`Store`]: collection persistence
//! - [`Settings`]: merged-with-defaults configuration

pub mod error;
pub mod events;
pub mod goal;
pub mod simulado;
pub mod stats;
pub mod storage;
pub mod subject;
pub mod timer;

pub use error::{ConfigError, CoreError, Result, StoreError, ValidationError};
pub use events::Event;
pub use goal::{
    goals_active_on, total_planned_hours, uniform_distribute, DaySlot, DistributionType, Goal,
    WeekSchedule, Weekday,
};
pub use simulado::{Simulado, SimuladoResult};
pub use stats::{
    accuracy, band_for, overview, simulado_overall_accuracy, subject_summaries, PerformanceBand,
    PerformanceColors, StudyOverview, SubjectSummary,
};
pub use storage::{Settings, Store};
pub use subject::{PerformanceEntry, Priority, Subject, Topic};
pub use timer::{Phase, PomodoroEngine, PomodoroSettings};
