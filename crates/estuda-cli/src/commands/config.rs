use clap::Subcommand;
use estuda_core::{ConfigError, Settings, Store, storage::SETTINGS_KEY};

use super::save_or_warn;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the full settings object
    Show,
    /// Get one value by dot-separated key, e.g. `pomodoro.work_time`
    Get { key: String },
    /// Set one value by dot-separated key
    Set { key: String, value: String },
    /// Restore the canonical defaults
    Reset,
    /// Get or set the app theme name
    Theme { name: Option<String> },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    let mut settings = Settings::load_or_default(&store);

    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigAction::Get { key } => match settings.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(Box::new(ConfigError::UnknownKey(key))),
        },
        ConfigAction::Set { key, value } => {
            settings.set(&key, &value)?;
            save_or_warn("settings", store.set_json(SETTINGS_KEY, &settings));
            println!("{key} = {value}");
        }
        ConfigAction::Reset => {
            settings = Settings::default();
            save_or_warn("settings", store.set_json(SETTINGS_KEY, &settings));
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigAction::Theme { name } => match name {
            Some(name) => {
                save_or_warn("theme", store.set_theme(&name));
                println!("theme = {name}");
            }
            None => println!("{}", store.theme()?),
        },
    }
    Ok(())
}
