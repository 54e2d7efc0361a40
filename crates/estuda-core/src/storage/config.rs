//! Application settings.
//!
//! One canonical default, constructed once and merged with whatever is
//! persisted under the `settings` key: fields missing from the stored
//! blob fall back to the default through serde.

use serde::{Deserialize, Serialize};

use super::store::{Store, SETTINGS_KEY};
use crate::error::{ConfigError, CoreError};
use crate::stats::PerformanceColors;
use crate::timer::PomodoroSettings;

/// Notification preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notifications {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub study_reminders: bool,
    #[serde(default = "default_true")]
    pub goal_reminders: bool,
    #[serde(default = "default_true")]
    pub break_reminders: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            enabled: true,
            study_reminders: true,
            goal_reminders: true,
            break_reminders: true,
        }
    }
}

/// The whole settings object, persisted as one JSON blob.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub performance_colors: PerformanceColors,
    #[serde(default)]
    pub pomodoro: PomodoroSettings,
    #[serde(default)]
    pub notifications: Notifications,
}

impl Settings {
    /// Load from the store, merging missing fields with the defaults.
    pub fn load(store: &Store) -> Result<Self, CoreError> {
        Ok(store.get_json(SETTINGS_KEY, Settings::default())?)
    }

    /// Load from the store, falling back to the defaults on any failure.
    pub fn load_or_default(store: &Store) -> Self {
        Self::load(store).unwrap_or_default()
    }

    pub fn save(&self, store: &Store) -> Result<(), CoreError> {
        Ok(store.set_json(SETTINGS_KEY, self)?)
    }

    /// Check every section against its domain constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pomodoro
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: "pomodoro".into(),
                message: e.to_string(),
            })?;
        self.performance_colors
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: "performance_colors".into(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    ConfigError::ParseFailed(format!(
                                        "cannot parse '{value}' as number"
                                    ))
                                })?
                        } else {
                            return Err(ConfigError::ParseFailed(format!(
                                "cannot parse '{value}' as number"
                            )));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Get a settings value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a settings value by dot-separated key, re-validating the
    /// resulting object. Unknown keys and constraint violations leave
    /// the settings unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{band_for, PerformanceBand};

    #[test]
    fn default_settings_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.pomodoro.work_time, 25);
        assert_eq!(settings.performance_colors.yellow.min, 60.0);
        assert!(settings.notifications.goal_reminders);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let settings = Settings::default();
        assert_eq!(settings.get("pomodoro.work_time").as_deref(), Some("25"));
        assert_eq!(
            settings.get("notifications.enabled").as_deref(),
            Some("true")
        );
        assert_eq!(
            settings.get("performance_colors.green.min").as_deref(),
            Some("80.0")
        );
        assert!(settings.get("pomodoro.missing").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut settings = Settings::default();
        settings.set("pomodoro.work_time", "50").unwrap();
        assert_eq!(settings.pomodoro.work_time, 50);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("pomodoro.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_constraint_violation_and_keeps_old_value() {
        let mut settings = Settings::default();
        let err = settings.set("pomodoro.work_time", "0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert_eq!(settings.pomodoro.work_time, 25);
    }

    #[test]
    fn partial_stored_blob_merges_with_defaults() {
        let json = r#"{"pomodoro":{"work_time":50}}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.pomodoro.work_time, 50);
        // Everything else falls back to the canonical defaults.
        assert_eq!(settings.pomodoro.short_break, 5);
        assert_eq!(
            band_for(85.0, &settings.performance_colors),
            PerformanceBand::Green
        );
        assert!(settings.notifications.enabled);
    }

    #[test]
    fn settings_roundtrip_through_store() {
        let store = Store::open_memory().unwrap();
        let mut settings = Settings::load_or_default(&store);
        settings.set("pomodoro.auto_start", "true").unwrap();
        settings.save(&store).unwrap();
        let reloaded = Settings::load(&store).unwrap();
        assert!(reloaded.pomodoro.auto_start);
        assert_eq!(reloaded, settings);
    }
}
