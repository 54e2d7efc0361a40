use chrono::Utc;
use clap::Subcommand;
use estuda_core::{
    Event, PerformanceEntry, PomodoroEngine, Settings, Store, ValidationError,
    storage::{SETTINGS_KEY, TIMER_ENGINE_KEY},
};

use super::{load_or_warn, save_or_warn};

/// Subject the timer reports completed work minutes to, if any.
const TIMER_SUBJECT_KEY: &str = "timer_subject";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print the current timer state as JSON
    Status,
    /// Start/pause the timer
    Toggle,
    /// Advance the timer clock, one second per tick
    Tick {
        #[arg(long, default_value_t = 1)]
        seconds: u64,
    },
    /// Reset to a paused work phase (keeps the session counter)
    Reset,
    /// Accept the pending break
    StartBreak,
    /// Skip the pending break and line up a new work phase
    SkipBreak,
    /// Change pomodoro durations and behavior
    Set {
        /// Work phase length in minutes
        #[arg(long)]
        work_time: Option<u64>,
        /// Short break length in minutes
        #[arg(long)]
        short_break: Option<u64>,
        /// Long break length in minutes
        #[arg(long)]
        long_break: Option<u64>,
        /// Completed pomodoros between long breaks
        #[arg(long)]
        long_break_interval: Option<u64>,
        /// Start the next phase without waiting for a toggle
        #[arg(long)]
        auto_start: Option<bool>,
        /// Play a sound on phase completion
        #[arg(long)]
        sound: Option<bool>,
    },
    /// Bind completed work minutes to a subject's hour counter
    Bind {
        subject: Option<String>,
        /// Unbind instead
        #[arg(long)]
        clear: bool,
    },
}

fn load_engine(store: &Store, settings: &Settings) -> PomodoroEngine {
    let mut engine = match store
        .get_json::<Option<PomodoroEngine>>(TIMER_ENGINE_KEY, None)
    {
        Ok(Some(engine)) => engine,
        Ok(None) => PomodoroEngine::new(settings.pomodoro),
        Err(e) => {
            eprintln!("warning: failed to load timer state: {e}");
            PomodoroEngine::new(settings.pomodoro)
        }
    };
    engine.set_settings(settings.pomodoro);
    engine
}

fn save_engine(store: &Store, engine: &PomodoroEngine) {
    save_or_warn("timer state", store.set_json(TIMER_ENGINE_KEY, engine));
}

/// Fold a finished work phase into the bound subject's hour counter.
/// The engine itself never touches the store; this is the caller-side
/// time-logging hook.
fn credit_bound_subject(store: &Store, event: &Event) {
    let Event::WorkCompleted { minutes, .. } = event else {
        return;
    };
    let bound: Option<String> = match store.get_json(TIMER_SUBJECT_KEY, None) {
        Ok(bound) => bound,
        Err(e) => {
            eprintln!("warning: failed to load timer binding: {e}");
            return;
        }
    };
    let Some(name) = bound else { return };
    let mut subjects = load_or_warn("subjects", store.subjects());
    let Some(subject) = subjects.iter_mut().find(|s| s.name == name) else {
        eprintln!("warning: bound subject '{name}' no longer exists");
        return;
    };
    let entry = PerformanceEntry::new(*minutes as f64 / 60.0, 0, 0);
    if subject.log_performance(entry, None, Utc::now()).is_ok() {
        save_or_warn("subjects", store.save_subjects(&subjects));
        eprintln!("credited {minutes} min to '{name}'");
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut settings = Settings::load_or_default(&store);
    let mut engine = load_engine(&store, &settings);

    match action {
        TimerAction::Status => {
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Toggle => {
            let event = engine.toggle();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Tick { seconds } => {
            let events = engine.tick_n(seconds);
            for event in &events {
                credit_bound_subject(&store, event);
            }
            if events.is_empty() {
                println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            } else {
                println!("{}", serde_json::to_string_pretty(&events)?);
            }
        }
        TimerAction::Reset => {
            let event = engine.reset();
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::StartBreak => {
            let event = engine
                .start_break()
                .ok_or_else(|| ValidationError::InvalidValue {
                    field: "timer".into(),
                    message: "no break is pending".into(),
                })?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::SkipBreak => {
            let event = engine
                .skip_break()
                .ok_or_else(|| ValidationError::InvalidValue {
                    field: "timer".into(),
                    message: "no break is pending".into(),
                })?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        TimerAction::Set {
            work_time,
            short_break,
            long_break,
            long_break_interval,
            auto_start,
            sound,
        } => {
            let mut pomodoro = settings.pomodoro;
            if let Some(v) = work_time {
                pomodoro.work_time = v;
            }
            if let Some(v) = short_break {
                pomodoro.short_break = v;
            }
            if let Some(v) = long_break {
                pomodoro.long_break = v;
            }
            if let Some(v) = long_break_interval {
                pomodoro.long_break_interval = v;
            }
            if let Some(v) = auto_start {
                pomodoro.auto_start = v;
            }
            if let Some(v) = sound {
                pomodoro.sound_enabled = v;
            }
            pomodoro.validate()?;
            settings.pomodoro = pomodoro;
            save_or_warn("settings", store.set_json(SETTINGS_KEY, &settings));
            engine.set_settings(pomodoro);
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
        TimerAction::Bind { subject, clear } => {
            let value: Option<String> = if clear { None } else { subject };
            if let Some(ref name) = value {
                let subjects = load_or_warn("subjects", store.subjects());
                if !subjects.iter().any(|s| &s.name == name) {
                    eprintln!("warning: no subject named '{name}'");
                }
            }
            save_or_warn("timer binding", store.set_json(TIMER_SUBJECT_KEY, &value));
            match value {
                Some(name) => println!("timer bound to '{name}'"),
                None => println!("timer unbound"),
            }
        }
    }

    save_engine(&store, &engine);
    Ok(())
}
