//! Aggregate views over the subject collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::accuracy::{accuracy, round1};
use crate::subject::{Priority, Subject};

/// One subject's derived statistics, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
    pub name: String,
    pub priority: Priority,
    /// Accuracy over subject-level + topic counters, rounded to one
    /// decimal.
    pub accuracy: f64,
    pub total_hours: f64,
    pub total_questions: u64,
    pub total_correct: u64,
    pub topic_count: usize,
    pub last_studied: Option<DateTime<Utc>>,
}

/// Global totals across every subject.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StudyOverview {
    pub subject_count: usize,
    pub topic_count: usize,
    pub total_hours: f64,
    pub total_questions: u64,
    pub total_correct: u64,
    /// Pooled correct/resolved ratio across all subjects, rounded to one
    /// decimal.
    pub overall_accuracy: f64,
}

/// Per-subject summaries, ranked by accuracy descending (the statistics
/// screen's ordering).
pub fn subject_summaries(subjects: &[Subject]) -> Vec<SubjectSummary> {
    let mut summaries: Vec<SubjectSummary> = subjects
        .iter()
        .map(|s| SubjectSummary {
            name: s.name.clone(),
            priority: s.priority,
            accuracy: round1(accuracy(s.total_correct(), s.total_questions())),
            total_hours: s.total_hours(),
            total_questions: s.total_questions(),
            total_correct: s.total_correct(),
            topic_count: s.topics.len(),
            last_studied: s.last_studied,
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.accuracy
            .partial_cmp(&a.accuracy)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    summaries
}

/// Global totals over the whole subject collection.
pub fn overview(subjects: &[Subject]) -> StudyOverview {
    let total_questions: u64 = subjects.iter().map(|s| s.total_questions()).sum();
    let total_correct: u64 = subjects.iter().map(|s| s.total_correct()).sum();
    StudyOverview {
        subject_count: subjects.len(),
        topic_count: subjects.iter().map(|s| s.topics.len()).sum(),
        total_hours: subjects.iter().map(|s| s.total_hours()).sum(),
        total_questions,
        total_correct,
        overall_accuracy: round1(accuracy(total_correct, total_questions)),
    }
}
