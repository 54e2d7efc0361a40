//! Subjects and topics with two-level performance counters.
//!
//! A subject carries its own hour/question counters *and* a list of topics
//! with independently accumulated counters. The two levels are siblings:
//! nothing rolls topic totals up into the subject record. Aggregation
//! happens at read time (subject-level + sum over topics), see
//! [`crate::stats`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Study priority of a subject. The Portuguese labels are the persisted
/// wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "baixa")]
    Baixa,
    #[serde(rename = "média")]
    Media,
    #[serde(rename = "alta")]
    Alta,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Baixa => "baixa",
            Priority::Media => "média",
            Priority::Alta => "alta",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baixa" => Ok(Priority::Baixa),
            "média" | "media" => Ok(Priority::Media),
            "alta" => Ok(Priority::Alta),
            other => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("'{other}' is not one of baixa, média, alta"),
            }),
        }
    }
}

/// A topic within a subject, with its own counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub hours_studied: f64,
    #[serde(default)]
    pub questions_resolved: u64,
    #[serde(default)]
    pub questions_correct: u64,
    #[serde(default)]
    pub last_studied: Option<DateTime<Utc>>,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hours_studied: 0.0,
            questions_resolved: 0,
            questions_correct: 0,
            last_studied: None,
        }
    }
}

/// A subject under study.
///
/// `name` is the unique key; goals and mock exams reference subjects by
/// name only (weak reference, no enforced referential integrity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub priority: Priority,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub hours_studied: f64,
    #[serde(default)]
    pub questions_resolved: u64,
    #[serde(default)]
    pub questions_correct: u64,
    #[serde(default)]
    pub last_studied: Option<DateTime<Utc>>,
}

/// A validated chunk of logged practice, applied to either the subject's
/// own counters or to one of its topics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub hours: f64,
    pub questions_resolved: u64,
    pub questions_correct: u64,
}

impl PerformanceEntry {
    pub fn new(hours: f64, questions_resolved: u64, questions_correct: u64) -> Self {
        Self {
            hours,
            questions_resolved,
            questions_correct,
        }
    }

    /// Check the entry against the domain constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.hours.is_finite() || self.hours < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "hours".into(),
                message: format!("{} is not a non-negative number", self.hours),
            });
        }
        if self.questions_correct > self.questions_resolved {
            return Err(ValidationError::CorrectExceedsResolved {
                correct: self.questions_correct,
                resolved: self.questions_resolved,
            });
        }
        Ok(())
    }
}

impl Subject {
    pub fn new(name: impl Into<String>, priority: Priority) -> Self {
        Self {
            name: name.into(),
            priority,
            topics: Vec::new(),
            hours_studied: 0.0,
            questions_resolved: 0,
            questions_correct: 0,
            last_studied: None,
        }
    }

    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    pub fn topic_mut(&mut self, name: &str) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.name == name)
    }

    /// Add a topic. Topic names are unique within a subject.
    pub fn add_topic(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "topic".into(),
                message: "name must not be empty".into(),
            });
        }
        if self.topic(&name).is_some() {
            return Err(ValidationError::Duplicate {
                kind: "topic",
                name,
            });
        }
        self.topics.push(Topic::new(name));
        Ok(())
    }

    /// Apply a performance entry to this subject, at time `at`.
    ///
    /// With `topic: Some(name)` only that topic's counters move; the
    /// subject-level counters stay untouched. With `topic: None` the
    /// subject-level counters move. Validation failures leave everything
    /// unchanged.
    pub fn log_performance(
        &mut self,
        entry: PerformanceEntry,
        topic: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        entry.validate()?;
        match topic {
            Some(name) => {
                let topic = self
                    .topic_mut(name)
                    .ok_or_else(|| ValidationError::NotFound {
                        kind: "topic",
                        name: name.to_string(),
                    })?;
                topic.hours_studied += entry.hours;
                topic.questions_resolved += entry.questions_resolved;
                topic.questions_correct += entry.questions_correct;
                topic.last_studied = Some(at);
            }
            None => {
                self.hours_studied += entry.hours;
                self.questions_resolved += entry.questions_resolved;
                self.questions_correct += entry.questions_correct;
                self.last_studied = Some(at);
            }
        }
        Ok(())
    }

    /// Subject-level hours plus the sum over all topics.
    pub fn total_hours(&self) -> f64 {
        self.hours_studied + self.topics.iter().map(|t| t.hours_studied).sum::<f64>()
    }

    pub fn total_questions(&self) -> u64 {
        self.questions_resolved
            + self
                .topics
                .iter()
                .map(|t| t.questions_resolved)
                .sum::<u64>()
    }

    pub fn total_correct(&self) -> u64 {
        self.questions_correct
            + self
                .topics
                .iter()
                .map(|t| t.questions_correct)
                .sum::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matematica() -> Subject {
        let mut s = Subject::new("Matemática", Priority::Alta);
        s.add_topic("Álgebra").unwrap();
        s
    }

    #[test]
    fn log_against_topic_leaves_subject_counters_alone() {
        let mut s = matematica();
        s.log_performance(
            PerformanceEntry::new(1.5, 10, 8),
            Some("Álgebra"),
            Utc::now(),
        )
        .unwrap();

        let topic = s.topic("Álgebra").unwrap();
        assert_eq!(topic.hours_studied, 1.5);
        assert_eq!(topic.questions_resolved, 10);
        assert_eq!(topic.questions_correct, 8);
        assert!(topic.last_studied.is_some());

        assert_eq!(s.hours_studied, 0.0);
        assert_eq!(s.questions_resolved, 0);
        assert_eq!(s.questions_correct, 0);
        assert!(s.last_studied.is_none());
    }

    #[test]
    fn log_against_subject_accumulates() {
        let mut s = matematica();
        s.log_performance(PerformanceEntry::new(2.0, 20, 15), None, Utc::now())
            .unwrap();
        s.log_performance(PerformanceEntry::new(0.5, 5, 5), None, Utc::now())
            .unwrap();
        assert_eq!(s.hours_studied, 2.5);
        assert_eq!(s.questions_resolved, 25);
        assert_eq!(s.questions_correct, 20);
    }

    #[test]
    fn correct_exceeding_resolved_is_rejected_without_mutation() {
        let mut s = matematica();
        let err = s
            .log_performance(PerformanceEntry::new(1.0, 5, 8), Some("Álgebra"), Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::CorrectExceedsResolved {
                correct: 8,
                resolved: 5
            }
        ));
        assert_eq!(s.topic("Álgebra").unwrap().hours_studied, 0.0);
    }

    #[test]
    fn unknown_topic_is_rejected() {
        let mut s = matematica();
        let err = s
            .log_performance(PerformanceEntry::new(1.0, 0, 0), Some("Geometria"), Utc::now())
            .unwrap_err();
        assert!(matches!(err, ValidationError::NotFound { .. }));
    }

    #[test]
    fn duplicate_topic_is_rejected() {
        let mut s = matematica();
        assert!(matches!(
            s.add_topic("Álgebra"),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn totals_sum_subject_and_topics() {
        let mut s = matematica();
        s.add_topic("Geometria").unwrap();
        s.log_performance(PerformanceEntry::new(1.0, 10, 6), None, Utc::now())
            .unwrap();
        s.log_performance(PerformanceEntry::new(2.0, 20, 12), Some("Álgebra"), Utc::now())
            .unwrap();
        s.log_performance(PerformanceEntry::new(0.5, 5, 5), Some("Geometria"), Utc::now())
            .unwrap();
        assert_eq!(s.total_hours(), 3.5);
        assert_eq!(s.total_questions(), 35);
        assert_eq!(s.total_correct(), 23);
    }

    #[test]
    fn priority_roundtrip_keeps_accents() {
        let json = serde_json::to_string(&Priority::Media).unwrap();
        assert_eq!(json, "\"média\"");
        assert_eq!("media".parse::<Priority>().unwrap(), Priority::Media);
        assert_eq!("ALTA".parse::<Priority>().unwrap(), Priority::Alta);
    }
}
