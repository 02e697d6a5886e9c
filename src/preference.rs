//! Sound on/off preference
//!
//! Persisted in LocalStorage as the literal text "true" or "false". Anything
//! else, including a missing key or unreadable storage, means "off".

use std::cell::RefCell;
use std::collections::HashMap;

use crate::consts::SOUND_ENABLED_KEY;
use crate::error::{AlarmError, Result};

/// The persisted preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoundPreference {
    pub enabled: bool,
}

impl SoundPreference {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Decode a stored value; only the exact text "true" enables sound
    pub fn from_stored(value: Option<&str>) -> Self {
        Self {
            enabled: value == Some("true"),
        }
    }

    /// Text written to storage
    pub fn as_str(&self) -> &'static str {
        if self.enabled { "true" } else { "false" }
    }

    pub fn toggled(self) -> Self {
        Self {
            enabled: !self.enabled,
        }
    }
}

/// String key-value storage (LocalStorage on web)
pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Read the preference. Storage errors read as "off".
pub fn load(store: &impl PreferenceStore) -> SoundPreference {
    match store.get_item(SOUND_ENABLED_KEY) {
        Ok(value) => SoundPreference::from_stored(value.as_deref()),
        Err(e) => {
            log::debug!("Sound preference unreadable, treating as off: {}", e);
            SoundPreference::default()
        }
    }
}

/// Write the preference
pub fn save(store: &impl PreferenceStore, pref: SoundPreference) -> Result<()> {
    store.set_item(SOUND_ENABLED_KEY, pref.as_str())
}

/// In-memory store for native builds and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, like Safari private mode or a full quota
    pub fn read_only() -> Self {
        Self {
            items: RefCell::default(),
            read_only: true,
        }
    }

    /// Seed a raw value, bypassing the read-only flag
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(AlarmError::Storage("quota exceeded".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
