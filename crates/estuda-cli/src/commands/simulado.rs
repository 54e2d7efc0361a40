use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};
use clap::Subcommand;
use estuda_core::{
    simulado_overall_accuracy, stats::round1, Simulado, SimuladoResult, Store, ValidationError,
};
use uuid::Uuid;

use super::{load_or_warn, save_or_warn};

#[derive(Subcommand)]
pub enum SimuladoAction {
    /// Record a mock exam
    Add {
        name: String,
        /// Exam date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Per-subject result as `subject:hours:resolved:correct`,
        /// repeatable
        #[arg(long = "result")]
        results: Vec<String>,
    },
    /// Edit a recorded mock exam
    Edit {
        id: Uuid,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        /// New exam date as YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Replace or add a subject's result as
        /// `subject:hours:resolved:correct`, repeatable
        #[arg(long = "result")]
        results: Vec<String>,
        /// Drop a subject's result, repeatable
        #[arg(long = "drop")]
        drops: Vec<String>,
    },
    /// List mock exams with their overall accuracy
    List,
    /// Remove a mock exam by id
    Remove { id: Uuid },
}

fn parse_result(entry: &str) -> Result<(String, SimuladoResult), Box<dyn std::error::Error>> {
    let parts: Vec<&str> = entry.split(':').collect();
    let invalid = |message: String| ValidationError::InvalidValue {
        field: "result".into(),
        message,
    };
    if parts.len() != 4 || parts[0].trim().is_empty() {
        return Err(Box::new(invalid(format!(
            "'{entry}' is not subject:hours:resolved:correct"
        ))));
    }
    let time_spent: f64 = parts[1]
        .parse()
        .map_err(|_| invalid(format!("'{}' is not a number of hours", parts[1])))?;
    let questions_resolved: u64 = parts[2]
        .parse()
        .map_err(|_| invalid(format!("'{}' is not a question count", parts[2])))?;
    let questions_correct: u64 = parts[3]
        .parse()
        .map_err(|_| invalid(format!("'{}' is not a question count", parts[3])))?;
    if questions_correct > questions_resolved {
        return Err(Box::new(ValidationError::CorrectExceedsResolved {
            correct: questions_correct,
            resolved: questions_resolved,
        }));
    }
    Ok((
        parts[0].trim().to_string(),
        SimuladoResult {
            time_spent,
            questions_resolved,
            questions_correct,
        },
    ))
}

fn parse_date(raw: &str) -> Result<chrono::DateTime<Utc>, ValidationError> {
    let parsed =
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidValue {
            field: "date".into(),
            message: format!("'{raw}' is not YYYY-MM-DD"),
        })?;
    Ok(Utc.from_utc_datetime(&parsed.and_hms_opt(0, 0, 0).unwrap()))
}

fn summary(simulado: &Simulado) -> serde_json::Value {
    serde_json::json!({
        "id": simulado.id,
        "name": simulado.name,
        "date": simulado.date,
        "overall_accuracy": round1(simulado_overall_accuracy(simulado)),
        "total_time_spent": simulado.total_time_spent(),
        "total_questions": simulado.total_questions(),
        "total_correct": simulado.total_correct(),
        "subjects": simulado.subjects,
    })
}

pub fn run(action: SimuladoAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut simulados = load_or_warn("simulados", store.simulados());

    match action {
        SimuladoAction::Add {
            name,
            date,
            results,
        } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => Utc::now(),
            };
            let mut subjects = BTreeMap::new();
            for entry in &results {
                let (subject, result) = parse_result(entry)?;
                subjects.insert(subject, result);
            }
            let simulado = Simulado::new(name, date, subjects)?;
            println!("{}", serde_json::to_string_pretty(&summary(&simulado))?);
            simulados.push(simulado);
            save_or_warn("simulados", store.save_simulados(&simulados));
        }
        SimuladoAction::Edit {
            id,
            rename,
            date,
            results,
            drops,
        } => {
            let sim = simulados
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| ValidationError::NotFound {
                    kind: "simulado",
                    name: id.to_string(),
                })?;
            if let Some(new_name) = rename {
                if new_name.trim().is_empty() {
                    return Err(Box::new(ValidationError::InvalidValue {
                        field: "name".into(),
                        message: "name must not be empty".into(),
                    }));
                }
                sim.name = new_name;
            }
            if let Some(raw) = date {
                sim.date = parse_date(&raw)?;
            }
            for entry in &results {
                let (subject, result) = parse_result(entry)?;
                sim.subjects.insert(subject, result);
            }
            for subject in &drops {
                sim.subjects.remove(subject.trim());
            }
            if sim.subjects.is_empty() {
                return Err(Box::new(ValidationError::EmptyCollection(
                    "simulado needs at least one subject result".into(),
                )));
            }
            let edited = summary(sim);
            save_or_warn("simulados", store.save_simulados(&simulados));
            println!("{}", serde_json::to_string_pretty(&edited)?);
        }
        SimuladoAction::List => {
            let summaries: Vec<serde_json::Value> = simulados.iter().map(summary).collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        SimuladoAction::Remove { id } => {
            let before = simulados.len();
            simulados.retain(|s| s.id != id);
            if simulados.len() == before {
                return Err(Box::new(ValidationError::NotFound {
                    kind: "simulado",
                    name: id.to_string(),
                }));
            }
            save_or_warn("simulados", store.save_simulados(&simulados));
            println!("removed {id}");
        }
    }
    Ok(())
}
