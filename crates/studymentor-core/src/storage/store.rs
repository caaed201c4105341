//! Durable key/value persistence with day-scoped records.
//!
//! Values are JSON strings in string-keyed slots. Day-scoped slots wrap the
//! payload in `{ "date": "YYYY-MM-DD", "payload": ... }`; loading one written
//! on another calendar day yields `None`. That comparison is the only daily
//! reset mechanism.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::database::Database;
use crate::clock::{Clock, DayKey};
use crate::error::{Result, StorageError};

/// Stable slot names. Changing one orphans data written by older builds.
pub mod keys {
    pub const CURRENT_MODE: &str = "current-mode";
    pub const PREFERENCES: &str = "preferences";
    pub const TIMER_SETTINGS: &str = "timer-settings";
    /// Day-scoped.
    pub const DAILY_GOALS: &str = "daily-goals";
    /// Day-scoped.
    pub const DAILY_STATS: &str = "daily-stats";
    pub const CURRENT_ROADMAP: &str = "current-roadmap";

    pub const ALL: [&str; 6] = [
        CURRENT_MODE,
        PREFERENCES,
        TIMER_SETTINGS,
        DAILY_GOALS,
        DAILY_STATS,
        CURRENT_ROADMAP,
    ];
}

/// Raw string slots underneath a [`PersistenceStore`].
pub trait KvBackend: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

impl KvBackend for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.kv_get(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(self.kv_set(key, value)?)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        Ok(self.kv_delete(key)?)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        Ok(self.kv_clear()?)
    }
}

/// In-process slots. Clones share the same map, which lets tests simulate a
/// restart by building a second store over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slots: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.slots().remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.slots().clear();
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct DayScoped<T> {
    date: DayKey,
    payload: T,
}

/// JSON persistence over a [`KvBackend`], with the day key taken from an
/// injected [`Clock`].
pub struct PersistenceStore {
    backend: Box<dyn KvBackend>,
    clock: Arc<dyn Clock>,
}

impl PersistenceStore {
    pub fn new(backend: impl KvBackend + 'static, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend: Box::new(backend),
            clock,
        }
    }

    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(MemoryBackend::new(), clock)
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.backend.set(key, &json)?;
        tracing::debug!(key, bytes = json.len(), "saved slot");
        Ok(())
    }

    /// Load a slot. A payload that no longer deserializes is logged and
    /// treated as absent.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(json) = self.backend.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding unreadable slot");
                Ok(None)
            }
        }
    }

    /// Save under today's day key.
    pub fn save_for_today<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let envelope = DayScoped {
            date: self.clock.today(),
            payload: value,
        };
        self.save(key, &envelope)
    }

    /// Load a day-scoped slot; `None` when it was written on another day.
    pub fn load_for_today<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(envelope) = self.load::<DayScoped<T>>(key)? else {
            return Ok(None);
        };
        let today = self.clock.today();
        if envelope.date != today {
            tracing::debug!(key, stored = %envelope.date, %today, "stale day-scoped slot");
            return Ok(None);
        }
        Ok(Some(envelope.payload))
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.backend.remove(key)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.backend.clear()?;
        Ok(())
    }
}
