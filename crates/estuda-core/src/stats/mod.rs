//! Performance aggregation for subjects, topics and mock exams.
//!
//! Everything here is a pure read-time computation over the raw counters;
//! nothing mutates source data.

mod accuracy;
mod band;
mod overview;

pub use accuracy::{accuracy, round1, simulado_overall_accuracy};
pub use band::{band_for, ColorRange, PerformanceBand, PerformanceColors};
pub use overview::{overview, subject_summaries, StudyOverview, SubjectSummary};
