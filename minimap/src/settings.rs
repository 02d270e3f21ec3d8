//! Persisted settings object and the key/value storage seam.
//!
//! The whole overlay configuration, including the waypoint store, is one JSON
//! object written under [`SETTINGS_STORAGE_KEY`] on every mutating action and
//! read once at startup. Restore shallow-merges stored top-level keys over the
//! compiled-in defaults, so keys added in later versions pick up defaults and
//! unknown stored keys are ignored.
//!
//! ERROR HANDLING
//! ==============
//! Corrupt stored data never reaches the user: restore falls back to defaults
//! and reports [`RestoreSource::Discarded`] so the fallback stays observable.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::SETTINGS_STORAGE_KEY;
use crate::waypoint::WaypointStore;

/// Errors from the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

/// Errors from settings (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored settings are not a JSON object")]
    NotAnObject,
    #[error("unknown setting: {0}")]
    UnknownKey(String),
    #[error("setting {0} is not user-editable")]
    ReadOnlyKey(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Durable string key/value storage (browser `localStorage` in production).
pub trait Storage {
    /// Read the raw value at `key`; unavailable storage reads as `None`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Overwrite the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory [`Storage`], used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Crosshair shape applied as a CSS class by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrosshairStyle {
    #[default]
    Plus,
    Dot,
    Circle,
}

impl CrosshairStyle {
    /// CSS class name for this style.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Dot => "dot",
            Self::Circle => "circle",
        }
    }
}

/// Every overlay setting plus the waypoint store.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub fps: bool,
    pub ping: bool,
    pub coords: bool,
    pub clock: bool,
    pub session: bool,
    pub zoom_key: bool,
    pub zoom_fov: f64,
    pub minimap: bool,
    pub radar: bool,
    pub map_zoom: f64,
    pub marker_size: f64,
    pub fullbright: bool,
    pub custom_crosshair: bool,
    pub crosshair_style: CrosshairStyle,
    pub chunk_grid: bool,
    pub gui_scale: f64,
    pub compact_chat: bool,
    pub chat_timestamps: bool,
    pub breadcrumbs: bool,
    pub pause_when_unfocused: bool,
    pub show_wp_list: bool,
    pub waypoints: WaypointStore,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: false,
            ping: false,
            coords: false,
            clock: false,
            session: false,
            zoom_key: false,
            zoom_fov: 30.0,
            minimap: false,
            radar: false,
            map_zoom: 8.0,
            marker_size: 4.0,
            fullbright: false,
            custom_crosshair: false,
            crosshair_style: CrosshairStyle::Plus,
            chunk_grid: false,
            gui_scale: 100.0,
            compact_chat: false,
            chat_timestamps: false,
            breadcrumbs: false,
            pause_when_unfocused: false,
            show_wp_list: true,
            waypoints: WaypointStore::new(),
        }
    }
}

/// Where restored settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource {
    /// Nothing was stored; compiled-in defaults.
    Defaults,
    /// Stored keys merged over defaults.
    Stored,
    /// Stored data was unusable and was discarded in favour of defaults.
    Discarded,
}

/// Key under which the waypoint array lives in the settings object.
const WAYPOINTS_KEY: &str = "waypoints";

impl Settings {
    /// Shallow-merge the top-level keys of a stored JSON object over defaults.
    ///
    /// Each key is merged on its own: an unknown key is ignored and a key
    /// whose value no longer fits its field keeps the default, so one stale
    /// entry never costs the rest of the object (waypoints included).
    ///
    /// # Errors
    ///
    /// [`SettingsError::Json`] if `raw` is not JSON,
    /// [`SettingsError::NotAnObject`] for non-object JSON.
    pub fn from_stored_json(raw: &str) -> Result<Self, SettingsError> {
        let stored: serde_json::Value = serde_json::from_str(raw)?;
        let serde_json::Value::Object(stored) = stored else {
            return Err(SettingsError::NotAnObject);
        };
        let mut settings = Self::default();
        for (key, value) in stored {
            match settings.merge_stored_key(&key, value) {
                Ok(()) => {}
                Err(SettingsError::UnknownKey(_)) => log::debug!("ignoring unknown stored setting {key:?}"),
                Err(e) => log::warn!("resetting stored setting {key:?} to default: {e}"),
            }
        }
        Ok(settings)
    }

    fn merge_stored_key(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key == WAYPOINTS_KEY {
            self.waypoints = serde_json::from_value(value)?;
            return Ok(());
        }
        self.set_by_key(key, value)
    }

    /// Serialize the whole object for storage.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_stored_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Set one top-level setting by its persisted key (settings surface).
    ///
    /// The waypoint array is not editable this way; it changes only through
    /// the store. On error the settings are unchanged.
    ///
    /// # Errors
    ///
    /// [`SettingsError::UnknownKey`], [`SettingsError::ReadOnlyKey`], or
    /// [`SettingsError::Json`] when `value` has the wrong type for `key`.
    pub fn set_by_key(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        if key == WAYPOINTS_KEY {
            return Err(SettingsError::ReadOnlyKey(key.to_owned()));
        }
        let mut current = serde_json::to_value(&*self)?;
        let Some(fields) = current.as_object_mut() else {
            return Err(SettingsError::NotAnObject);
        };
        let Some(slot) = fields.get_mut(key) else {
            return Err(SettingsError::UnknownKey(key.to_owned()));
        };
        *slot = value;
        *self = serde_json::from_value(current)?;
        Ok(())
    }
}

/// Load settings from `storage`, falling back to defaults on absence or corruption.
pub fn restore(storage: &dyn Storage) -> (Settings, RestoreSource) {
    let Some(raw) = storage.get_item(SETTINGS_STORAGE_KEY) else {
        return (Settings::default(), RestoreSource::Defaults);
    };
    match Settings::from_stored_json(&raw) {
        Ok(settings) => (settings, RestoreSource::Stored),
        Err(e) => {
            log::warn!("discarding stored settings: {e}");
            (Settings::default(), RestoreSource::Discarded)
        }
    }
}

/// Overwrite the stored settings object with `settings`.
///
/// # Errors
///
/// Serialization or storage failures. The previous stored value is left in place.
pub fn persist(settings: &Settings, storage: &mut dyn Storage) -> Result<(), SettingsError> {
    let raw = settings.to_stored_json()?;
    storage.set_item(SETTINGS_STORAGE_KEY, &raw)?;
    Ok(())
}
