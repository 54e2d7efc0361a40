//! End-to-end flow over a real on-disk store: create subjects, log
//! practice, schedule goals, record a mock exam, reopen and aggregate.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use tempfile::TempDir;

use estuda_core::{
    goals_active_on, overview, simulado_overall_accuracy, subject_summaries, Goal,
    PerformanceEntry, Priority, Settings, Simulado, SimuladoResult, Store, Subject, Weekday,
};

fn store_in(dir: &TempDir) -> Store {
    Store::open_at(dir.path().join("estuda.db")).unwrap()
}

#[test]
fn full_study_cycle_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let store = store_in(&dir);

        let mut matematica = Subject::new("Matemática", Priority::Alta);
        matematica.add_topic("Álgebra").unwrap();
        matematica.add_topic("Geometria").unwrap();
        matematica
            .log_performance(PerformanceEntry::new(1.5, 10, 8), Some("Álgebra"), Utc::now())
            .unwrap();
        let mut historia = Subject::new("História", Priority::Media);
        historia
            .log_performance(PerformanceEntry::new(2.0, 20, 10), None, Utc::now())
            .unwrap();
        store.save_subjects(&[matematica, historia]).unwrap();

        let goal = Goal::uniform("Matemática", 15.0, &Weekday::WEEKDAYS).unwrap();
        store.save_goals(&[goal]).unwrap();

        let mut results = BTreeMap::new();
        results.insert(
            "Matemática".to_string(),
            SimuladoResult {
                time_spent: 2.0,
                questions_resolved: 10,
                questions_correct: 8,
            },
        );
        results.insert(
            "História".to_string(),
            SimuladoResult {
                time_spent: 1.0,
                questions_resolved: 20,
                questions_correct: 8,
            },
        );
        let simulado = Simulado::new("Simulado 1", Utc::now(), results).unwrap();
        store.save_simulados(&[simulado]).unwrap();

        let mut settings = Settings::load_or_default(&store);
        settings.set("pomodoro.work_time", "50").unwrap();
        settings.save(&store).unwrap();
    }

    // Fresh handle over the same file.
    let store = store_in(&dir);

    let subjects = store.subjects().unwrap();
    assert_eq!(subjects.len(), 2);
    let matematica = &subjects[0];
    assert_eq!(matematica.name, "Matemática");
    assert_eq!(matematica.topic("Álgebra").unwrap().hours_studied, 1.5);
    // Subject-level counters stayed at zero; only the topic moved.
    assert_eq!(matematica.hours_studied, 0.0);
    assert_eq!(matematica.total_hours(), 1.5);
    assert_eq!(matematica.total_correct(), 8);

    let summaries = subject_summaries(&subjects);
    assert_eq!(summaries[0].name, "Matemática");
    assert_eq!(summaries[0].accuracy, 80.0);
    assert_eq!(summaries[1].accuracy, 50.0);

    let view = overview(&subjects);
    assert_eq!(view.total_questions, 30);
    assert_eq!(view.total_correct, 18);
    assert_eq!(view.overall_accuracy, 60.0);

    let goals = store.goals().unwrap();
    assert_eq!(goals[0].schedule.monday.hours, 3.0);
    let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let sunday = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    assert_eq!(goals_active_on(&goals, monday).len(), 1);
    assert!(goals_active_on(&goals, sunday).is_empty());

    let simulados = store.simulados().unwrap();
    // 80% and 40%, weighted equally: 60%, not the pooled 16/30.
    assert_eq!(simulado_overall_accuracy(&simulados[0]), 60.0);
    assert_eq!(simulados[0].total_time_spent(), 3.0);

    let settings = Settings::load_or_default(&store);
    assert_eq!(settings.pomodoro.work_time, 50);
    // Untouched sections kept their canonical defaults.
    assert_eq!(settings.pomodoro.long_break_interval, 4);
}
