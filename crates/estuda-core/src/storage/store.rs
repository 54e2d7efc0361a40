//! SQLite-backed key-value store of JSON blobs.
//!
//! Every collection is persisted whole under one key; there is no
//! per-entity persistence and no atomicity across keys. Two writers race
//! with last-writer-wins semantics on the underlying row. Whatever shape
//! was last written under a key is returned verbatim.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data_dir;
use crate::error::StoreError;
use crate::goal::Goal;
use crate::simulado::Simulado;
use crate::subject::Subject;

pub const SUBJECTS_KEY: &str = "subjects";
pub const GOALS_KEY: &str = "goals";
pub const SIMULADOS_KEY: &str = "simulados";
pub const SETTINGS_KEY: &str = "settings";
pub const THEME_KEY: &str = "app_theme";
pub const TIMER_ENGINE_KEY: &str = "timer_engine";

/// Key-value store over a single `kv` table.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the store at `<data_dir>/estuda.db`, creating the schema if
    /// needed.
    pub fn open() -> Result<Self, StoreError> {
        Self::open_at(data_dir()?.join("estuda.db"))
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Raw string value under a key, if present.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a raw string value under a key.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Deserialize the value under `key`, or return `default` when the
    /// key is absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, StoreError> {
        match self.get_raw(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                message: e.to_string(),
            }),
            None => Ok(default),
        }
    }

    /// Serialize `value` as JSON under `key`, replacing whatever was
    /// there.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Corrupt {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.set_raw(key, &raw)
    }

    // ── Typed collections ────────────────────────────────────────────

    pub fn subjects(&self) -> Result<Vec<Subject>, StoreError> {
        self.get_json(SUBJECTS_KEY, Vec::new())
    }

    pub fn save_subjects(&self, subjects: &[Subject]) -> Result<(), StoreError> {
        self.set_json(SUBJECTS_KEY, &subjects)
    }

    pub fn goals(&self) -> Result<Vec<Goal>, StoreError> {
        self.get_json(GOALS_KEY, Vec::new())
    }

    pub fn save_goals(&self, goals: &[Goal]) -> Result<(), StoreError> {
        self.set_json(GOALS_KEY, &goals)
    }

    pub fn simulados(&self) -> Result<Vec<Simulado>, StoreError> {
        self.get_json(SIMULADOS_KEY, Vec::new())
    }

    pub fn save_simulados(&self, simulados: &[Simulado]) -> Result<(), StoreError> {
        self.set_json(SIMULADOS_KEY, &simulados)
    }

    pub fn theme(&self) -> Result<String, StoreError> {
        self.get_json(THEME_KEY, "dark".to_string())
    }

    pub fn set_theme(&self, theme: &str) -> Result<(), StoreError> {
        self.set_json(THEME_KEY, &theme)
    }
}
