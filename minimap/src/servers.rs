//! Saved server address list, persisted under its own storage key.
//!
//! Used only by the page's server-launch UI; it never touches waypoint state.

#[cfg(test)]
#[path = "servers_test.rs"]
mod servers_test;

use crate::consts::SERVERS_STORAGE_KEY;
use crate::settings::{SettingsError, Storage};

/// Append-only, de-duplicated list of server addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerList {
    addresses: Vec<String>,
}

impl ServerList {
    /// Load the list, treating absent or malformed data as empty.
    pub fn load(storage: &dyn Storage) -> Self {
        let Some(raw) = storage.get_item(SERVERS_STORAGE_KEY) else {
            return Self::default();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(addresses) => {
                let mut list = Self::default();
                for address in &addresses {
                    list.add(address);
                }
                list
            }
            Err(e) => {
                log::warn!("discarding stored server list: {e}");
                Self::default()
            }
        }
    }

    /// Write the list back to storage.
    ///
    /// # Errors
    ///
    /// Serialization or storage failures.
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), SettingsError> {
        let raw = serde_json::to_string(&self.addresses)?;
        storage.set_item(SERVERS_STORAGE_KEY, &raw)?;
        Ok(())
    }

    /// Append `address` unless it is blank or already present. Returns whether it was added.
    pub fn add(&mut self, address: &str) -> bool {
        let address = address.trim();
        if address.is_empty() || self.addresses.iter().any(|a| a == address) {
            return false;
        }
        self.addresses.push(address.to_owned());
        true
    }

    #[must_use]
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }
}
