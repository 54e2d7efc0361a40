//! Mock-exam ("simulado") records.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// One subject's result within a mock exam.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimuladoResult {
    /// Time spent on this subject, in hours.
    #[serde(default)]
    pub time_spent: f64,
    #[serde(default)]
    pub questions_resolved: u64,
    #[serde(default)]
    pub questions_correct: u64,
}

/// A recorded mock exam. Subject names are weak references into the
/// subject collection, keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulado {
    pub id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
    pub subjects: BTreeMap<String, SimuladoResult>,
}

impl Simulado {
    /// Create a mock exam record. Requires at least one subject entry and
    /// `correct <= resolved` for every entry.
    pub fn new(
        name: impl Into<String>,
        date: DateTime<Utc>,
        subjects: BTreeMap<String, SimuladoResult>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "name must not be empty".into(),
            });
        }
        if subjects.is_empty() {
            return Err(ValidationError::EmptyCollection(
                "simulado needs at least one subject result".into(),
            ));
        }
        for result in subjects.values() {
            if result.questions_correct > result.questions_resolved {
                return Err(ValidationError::CorrectExceedsResolved {
                    correct: result.questions_correct,
                    resolved: result.questions_resolved,
                });
            }
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            date,
            subjects,
        })
    }

    pub fn total_time_spent(&self) -> f64 {
        self.subjects.values().map(|r| r.time_spent).sum()
    }

    pub fn total_questions(&self) -> u64 {
        self.subjects.values().map(|r| r.questions_resolved).sum()
    }

    pub fn total_correct(&self) -> u64 {
        self.subjects.values().map(|r| r.questions_correct).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(time: f64, resolved: u64, correct: u64) -> SimuladoResult {
        SimuladoResult {
            time_spent: time,
            questions_resolved: resolved,
            questions_correct: correct,
        }
    }

    #[test]
    fn totals_sum_over_entries() {
        let mut subjects = BTreeMap::new();
        subjects.insert("Matemática".into(), result(2.0, 30, 24));
        subjects.insert("Português".into(), result(1.5, 20, 8));
        let sim = Simulado::new("ENEM 1", Utc::now(), subjects).unwrap();
        assert_eq!(sim.total_time_spent(), 3.5);
        assert_eq!(sim.total_questions(), 50);
        assert_eq!(sim.total_correct(), 32);
    }

    #[test]
    fn empty_subject_map_is_rejected() {
        let err = Simulado::new("Vazio", Utc::now(), BTreeMap::new()).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyCollection(_)));
    }

    #[test]
    fn per_subject_invariant_is_checked() {
        let mut subjects = BTreeMap::new();
        subjects.insert("Física".into(), result(1.0, 10, 12));
        let err = Simulado::new("Inválido", Utc::now(), subjects).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::CorrectExceedsResolved { .. }
        ));
    }
}
