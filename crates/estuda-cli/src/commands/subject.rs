use chrono::Utc;
use clap::Subcommand;
use estuda_core::{PerformanceEntry, Priority, Store, Subject, ValidationError};

use super::{load_or_warn, save_or_warn};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add {
        name: String,
        /// Priority: baixa, média or alta
        #[arg(long, default_value = "média")]
        priority: String,
        /// Initial topics, comma separated
        #[arg(long, value_delimiter = ',')]
        topics: Vec<String>,
    },
    /// List subjects as JSON
    List {
        /// Only subjects with this priority
        #[arg(long)]
        priority: Option<String>,
    },
    /// Rename a subject or change its priority
    Edit {
        name: String,
        /// New name
        #[arg(long)]
        rename: Option<String>,
        /// New priority: baixa, média or alta
        #[arg(long)]
        priority: Option<String>,
    },
    /// Remove a subject by name
    Remove { name: String },
    /// Add a topic to a subject
    AddTopic { subject: String, topic: String },
    /// Remove a topic from a subject, discarding its counters
    RemoveTopic { subject: String, topic: String },
    /// Log studied time and question results against a subject or topic
    Log {
        subject: String,
        /// Log against this topic instead of the subject-level counters
        #[arg(long)]
        topic: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        hours: f64,
        /// Extra minutes on top of --hours (0-59)
        #[arg(long, default_value_t = 0)]
        minutes: u64,
        #[arg(long, default_value_t = 0)]
        resolved: u64,
        #[arg(long, default_value_t = 0)]
        correct: u64,
    },
}

fn warn_dangling_references(store: &Store, name: &str) {
    let goals = load_or_warn("goals", store.goals());
    let dangling_goals = goals.iter().filter(|g| g.subject == name).count();
    if dangling_goals > 0 {
        eprintln!("warning: {dangling_goals} goal(s) still reference '{name}'");
    }
    let simulados = load_or_warn("simulados", store.simulados());
    let dangling_sims = simulados
        .iter()
        .filter(|s| s.subjects.contains_key(name))
        .count();
    if dangling_sims > 0 {
        eprintln!("warning: {dangling_sims} simulado(s) still reference '{name}'");
    }
}

fn find_subject_mut<'a>(
    subjects: &'a mut [Subject],
    name: &str,
) -> Result<&'a mut Subject, ValidationError> {
    subjects
        .iter_mut()
        .find(|s| s.name == name)
        .ok_or_else(|| ValidationError::NotFound {
            kind: "subject",
            name: name.to_string(),
        })
}

pub fn run(action: SubjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut subjects = load_or_warn("subjects", store.subjects());

    match action {
        SubjectAction::Add {
            name,
            priority,
            topics,
        } => {
            if name.trim().is_empty() {
                return Err(Box::new(ValidationError::InvalidValue {
                    field: "name".into(),
                    message: "name must not be empty".into(),
                }));
            }
            if subjects.iter().any(|s| s.name == name) {
                return Err(Box::new(ValidationError::Duplicate {
                    kind: "subject",
                    name,
                }));
            }
            let mut subject = Subject::new(name, priority.parse::<Priority>()?);
            for topic in topics.iter().filter(|t| !t.trim().is_empty()) {
                subject.add_topic(topic.trim())?;
            }
            subjects.push(subject);
            save_or_warn("subjects", store.save_subjects(&subjects));
            println!("{}", serde_json::to_string_pretty(subjects.last().unwrap())?);
        }
        SubjectAction::List { priority } => {
            let filter = priority.map(|p| p.parse::<Priority>()).transpose()?;
            let filtered: Vec<&Subject> = subjects
                .iter()
                .filter(|s| filter.map_or(true, |p| s.priority == p))
                .collect();
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        SubjectAction::Edit {
            name,
            rename,
            priority,
        } => {
            if rename.is_none() && priority.is_none() {
                return Err(Box::new(ValidationError::InvalidValue {
                    field: "edit".into(),
                    message: "nothing to change, pass --rename and/or --priority".into(),
                }));
            }
            let priority = priority.map(|p| p.parse::<Priority>()).transpose()?;
            if let Some(ref new_name) = rename {
                if new_name.trim().is_empty() {
                    return Err(Box::new(ValidationError::InvalidValue {
                        field: "name".into(),
                        message: "name must not be empty".into(),
                    }));
                }
                if subjects.iter().any(|s| &s.name == new_name) {
                    return Err(Box::new(ValidationError::Duplicate {
                        kind: "subject",
                        name: new_name.clone(),
                    }));
                }
                // Goals and simulados keep referencing the old name.
                warn_dangling_references(&store, &name);
            }
            let entry = find_subject_mut(&mut subjects, &name)?;
            if let Some(new_name) = rename {
                entry.name = new_name;
            }
            if let Some(priority) = priority {
                entry.priority = priority;
            }
            let edited = entry.clone();
            save_or_warn("subjects", store.save_subjects(&subjects));
            println!("{}", serde_json::to_string_pretty(&edited)?);
        }
        SubjectAction::Remove { name } => {
            let before = subjects.len();
            subjects.retain(|s| s.name != name);
            if subjects.len() == before {
                return Err(Box::new(ValidationError::NotFound {
                    kind: "subject",
                    name,
                }));
            }
            // Goals and simulados reference subjects by name only; removal
            // leaves those references dangling rather than cascading.
            warn_dangling_references(&store, &name);
            save_or_warn("subjects", store.save_subjects(&subjects));
            println!("removed '{name}'");
        }
        SubjectAction::AddTopic { subject, topic } => {
            let entry = find_subject_mut(&mut subjects, &subject)?;
            entry.add_topic(topic)?;
            save_or_warn("subjects", store.save_subjects(&subjects));
            println!("{}", serde_json::to_string_pretty(&subjects)?);
        }
        SubjectAction::RemoveTopic { subject, topic } => {
            let entry = find_subject_mut(&mut subjects, &subject)?;
            let before = entry.topics.len();
            entry.topics.retain(|t| t.name != topic);
            if entry.topics.len() == before {
                return Err(Box::new(ValidationError::NotFound {
                    kind: "topic",
                    name: topic,
                }));
            }
            let edited = entry.clone();
            save_or_warn("subjects", store.save_subjects(&subjects));
            println!("{}", serde_json::to_string_pretty(&edited)?);
        }
        SubjectAction::Log {
            subject,
            topic,
            hours,
            minutes,
            resolved,
            correct,
        } => {
            if minutes >= 60 {
                return Err(Box::new(ValidationError::InvalidValue {
                    field: "minutes".into(),
                    message: format!("{minutes} must be below 60"),
                }));
            }
            let total_hours = hours + minutes as f64 / 60.0;
            let entry = PerformanceEntry::new(total_hours, resolved, correct);
            let target = find_subject_mut(&mut subjects, &subject)?;
            target.log_performance(entry, topic.as_deref(), Utc::now())?;
            save_or_warn("subjects", store.save_subjects(&subjects));
            let target = subjects.iter().find(|s| s.name == subject).unwrap();
            println!("{}", serde_json::to_string_pretty(target)?);
        }
    }
    Ok(())
}
