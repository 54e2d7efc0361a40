//! Accuracy percentages.

use crate::simulado::Simulado;

/// Percentage of correct answers, `0.0` when nothing was resolved.
pub fn accuracy(correct: u64, resolved: u64) -> f64 {
    if resolved == 0 {
        return 0.0;
    }
    correct as f64 / resolved as f64 * 100.0
}

/// Round to one decimal for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Overall accuracy of a mock exam: the unweighted mean of the per-subject
/// accuracies. Each subject contributes equally regardless of its question
/// count. Not the pooled correct/resolved ratio.
pub fn simulado_overall_accuracy(simulado: &Simulado) -> f64 {
    let n = simulado.subjects.len();
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = simulado
        .subjects
        .values()
        .map(|r| accuracy(r.questions_correct, r.questions_resolved))
        .sum();
    sum / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulado::SimuladoResult;
    use chrono::Utc;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn zero_resolved_yields_zero() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(5, 0), 0.0);
    }

    #[test]
    fn basic_ratio() {
        assert_eq!(accuracy(8, 10), 80.0);
        assert_eq!(round1(accuracy(1, 3)), 33.3);
    }

    #[test]
    fn unweighted_mean_not_pooled_ratio() {
        let mut subjects = BTreeMap::new();
        // 80% on 10 questions, 40% on 100 questions.
        subjects.insert(
            "Matemática".to_string(),
            SimuladoResult {
                time_spent: 1.0,
                questions_resolved: 10,
                questions_correct: 8,
            },
        );
        subjects.insert(
            "Português".to_string(),
            SimuladoResult {
                time_spent: 1.0,
                questions_resolved: 100,
                questions_correct: 40,
            },
        );
        let sim = Simulado::new("ENEM", Utc::now(), subjects).unwrap();
        // Equal-weight mean is 60%; the pooled ratio would be 48/110.
        assert_eq!(simulado_overall_accuracy(&sim), 60.0);
    }

    proptest! {
        #[test]
        fn matches_ratio_for_positive_resolved(correct in 0u64..10_000, extra in 0u64..10_000) {
            let resolved = correct + extra.max(1);
            let got = accuracy(correct, resolved);
            prop_assert!((got - correct as f64 / resolved as f64 * 100.0).abs() < 1e-12);
            prop_assert!((0.0..=100.0).contains(&got));
        }

        #[test]
        fn monotonic_in_correct_for_fixed_resolved(
            resolved in 1u64..10_000,
            a in 0u64..10_000,
            b in 0u64..10_000,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo = lo.min(resolved);
            let hi = hi.min(resolved);
            prop_assert!(accuracy(lo, resolved) <= accuracy(hi, resolved));
        }
    }
}
