use chrono::Local;
use clap::Subcommand;
use estuda_core::{
    goals_active_on, total_planned_hours, DaySlot, Goal, Store, ValidationError, WeekSchedule,
    Weekday,
};

use super::{load_or_warn, save_or_warn};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a weekly goal for a subject
    Add {
        subject: String,
        /// Weekly hour target
        #[arg(long)]
        hours: f64,
        /// Enabled days for a uniform split, comma separated
        /// (default: monday..friday)
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
        /// Explicit per-day hours like `monday=2,saturday=4.5`
        /// (overrides --days, makes the goal custom)
        #[arg(long, value_delimiter = ',')]
        custom: Vec<String>,
    },
    /// List goals as JSON
    List,
    /// Remove a goal by list index
    Remove { index: usize },
    /// Goals active today, with today's planned hours
    Today,
    /// Change a goal's weekly hour target
    SetHours { index: usize, hours: f64 },
    /// Enable or disable one weekday on a goal
    ToggleDay { index: usize, day: String },
    /// Set one day's hours on a goal, making it custom
    SetDay {
        index: usize,
        day: String,
        hours: f64,
    },
}

fn parse_days(days: &[String]) -> Result<Vec<Weekday>, ValidationError> {
    days.iter()
        .filter(|d| !d.trim().is_empty())
        .map(|d| d.parse::<Weekday>())
        .collect()
}

fn parse_custom(entries: &[String]) -> Result<WeekSchedule, Box<dyn std::error::Error>> {
    let mut schedule = WeekSchedule::default();
    for entry in entries.iter().filter(|e| !e.trim().is_empty()) {
        let (day, hours) = entry
            .split_once('=')
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "custom".into(),
                message: format!("'{entry}' is not day=hours"),
            })?;
        let day = day.parse::<Weekday>()?;
        let hours: f64 = hours.parse().map_err(|_| ValidationError::InvalidValue {
            field: "custom".into(),
            message: format!("'{entry}' has a non-numeric hour value"),
        })?;
        *schedule.slot_mut(day) = DaySlot {
            enabled: true,
            hours,
        };
    }
    Ok(schedule)
}

fn goal_at(goals: &mut [Goal], index: usize) -> Result<&mut Goal, ValidationError> {
    let len = goals.len();
    goals
        .get_mut(index)
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "index".into(),
            message: format!("{index} is out of bounds for {len} goal(s)"),
        })
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut goals = load_or_warn("goals", store.goals());

    match action {
        GoalAction::Add {
            subject,
            hours,
            days,
            custom,
        } => {
            let subjects = load_or_warn("subjects", store.subjects());
            if !subjects.iter().any(|s| s.name == subject) {
                eprintln!("warning: no subject named '{subject}'");
            }
            let goal = if custom.is_empty() {
                let days = if days.is_empty() {
                    Weekday::WEEKDAYS.to_vec()
                } else {
                    parse_days(&days)?
                };
                Goal::uniform(subject, hours, &days)?
            } else {
                Goal::custom(subject, hours, parse_custom(&custom)?)?
            };
            goals.push(goal);
            save_or_warn("goals", store.save_goals(&goals));
            println!("{}", serde_json::to_string_pretty(goals.last().unwrap())?);
        }
        GoalAction::List => {
            println!("{}", serde_json::to_string_pretty(&goals)?);
        }
        GoalAction::Remove { index } => {
            goal_at(&mut goals, index)?;
            let removed = goals.remove(index);
            save_or_warn("goals", store.save_goals(&goals));
            println!("removed goal for '{}'", removed.subject);
        }
        GoalAction::Today => {
            let today = Local::now().date_naive();
            let active = goals_active_on(&goals, today);
            let planned: f64 = active.iter().map(|g| g.planned_hours_on(today)).sum();
            let report = serde_json::json!({
                "date": today,
                "weekday": Weekday::from_date(today),
                "active_goals": active,
                "planned_hours_today": planned,
                "total_weekly_hours": total_planned_hours(&goals),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        GoalAction::SetHours { index, hours } => {
            let goal = goal_at(&mut goals, index)?;
            goal.set_total_hours(hours)?;
            save_or_warn("goals", store.save_goals(&goals));
            println!("{}", serde_json::to_string_pretty(&goals[index])?);
        }
        GoalAction::ToggleDay { index, day } => {
            let day = day.parse::<Weekday>()?;
            let goal = goal_at(&mut goals, index)?;
            let enabled = !goal.schedule.slot(day).enabled;
            goal.set_day_enabled(day, enabled)?;
            save_or_warn("goals", store.save_goals(&goals));
            println!("{}", serde_json::to_string_pretty(&goals[index])?);
        }
        GoalAction::SetDay { index, day, hours } => {
            let day = day.parse::<Weekday>()?;
            let goal = goal_at(&mut goals, index)?;
            goal.set_day_hours(day, hours)?;
            save_or_warn("goals", store.save_goals(&goals));
            println!("{}", serde_json::to_string_pretty(&goals[index])?);
        }
    }
    Ok(())
}
