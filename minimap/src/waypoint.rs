//! Waypoint model and the in-memory store that owns every waypoint.
//!
//! This module defines the persisted/exported waypoint shape (`Waypoint`), hex
//! color validation shared by add/recolor/import, and the runtime store
//! (`WaypointStore`). All waypoint mutation goes through the store; the
//! projection and HUD layers only read it through `enabled`.
//!
//! The serialized form is a flat JSON array of
//! `{name, x, y, z, color, enabled}` objects, used both inside the persisted
//! settings blob and for file import/export.

#[cfg(test)]
#[path = "waypoint_test.rs"]
mod waypoint_test;

use serde::{Deserialize, Serialize};

use crate::consts::ACCENT_COLOR;
use crate::pose::Pose;

/// Errors from rejected waypoint operations.
#[derive(Debug, thiserror::Error)]
pub enum WaypointError {
    #[error("waypoint name is empty")]
    EmptyName,
    #[error("invalid hex color: {0:?}")]
    InvalidColor(String),
    #[error("no waypoint at index {0}")]
    OutOfRange(usize),
    #[error("malformed waypoint document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("waypoint {index} in document has an empty name")]
    UnnamedEntry { index: usize },
}

/// World-space position of a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    /// Vertical; kept for display and export, ignored by the radar projection.
    pub y: f64,
    pub z: f64,
}

/// A named, colored, toggleable point in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    #[serde(flatten)]
    pub position: Position,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_color() -> String {
    ACCENT_COLOR.to_owned()
}

fn default_enabled() -> bool {
    true
}

/// Whether `raw` is a `#RGB` or `#RRGGBB` hex color (case-insensitive).
#[must_use]
pub fn is_hex_color(raw: &str) -> bool {
    let Some(digits) = raw.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// `raw` if it is a valid hex color, otherwise the accent color.
#[must_use]
pub fn color_or_accent(raw: Option<&str>) -> String {
    match raw {
        Some(c) if is_hex_color(c) => c.to_owned(),
        _ => default_color(),
    }
}

impl Waypoint {
    /// A new enabled waypoint at the pose's position.
    #[must_use]
    pub fn at_pose(pose: &Pose, name: impl Into<String>, color: Option<&str>) -> Self {
        Self {
            name: name.into(),
            position: Position { x: pose.x, y: pose.y, z: pose.z },
            color: color_or_accent(color),
            enabled: true,
        }
    }
}

/// Ordered store of waypoints. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaypointStore {
    waypoints: Vec<Waypoint>,
}

impl WaypointStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { waypoints: Vec::new() }
    }

    /// Capture a waypoint at `pose`.
    ///
    /// # Errors
    ///
    /// [`WaypointError::EmptyName`] if `name` is blank; the store is unchanged.
    pub fn add(&mut self, pose: &Pose, name: &str, color: Option<&str>) -> Result<&Waypoint, WaypointError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WaypointError::EmptyName);
        }
        let index = self.waypoints.len();
        self.waypoints.push(Waypoint::at_pose(pose, name, color));
        Ok(&self.waypoints[index])
    }

    /// Remove the waypoint at `index`, returning it if it existed.
    pub fn remove(&mut self, index: usize) -> Option<Waypoint> {
        if index < self.waypoints.len() {
            Some(self.waypoints.remove(index))
        } else {
            None
        }
    }

    /// Flip the `enabled` flag, returning the new value.
    pub fn toggle_enabled(&mut self, index: usize) -> Option<bool> {
        let waypoint = self.waypoints.get_mut(index)?;
        waypoint.enabled = !waypoint.enabled;
        Some(waypoint.enabled)
    }

    /// Change the color of the waypoint at `index`.
    ///
    /// # Errors
    ///
    /// [`WaypointError::InvalidColor`] for a malformed hex string and
    /// [`WaypointError::OutOfRange`] for a bad index. The prior color is kept.
    pub fn recolor(&mut self, index: usize, hex: &str) -> Result<(), WaypointError> {
        if !is_hex_color(hex) {
            return Err(WaypointError::InvalidColor(hex.to_owned()));
        }
        let waypoint = self
            .waypoints
            .get_mut(index)
            .ok_or(WaypointError::OutOfRange(index))?;
        waypoint.color = hex.to_owned();
        Ok(())
    }

    /// Serialize every waypoint as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures (non-representable values).
    pub fn export_json(&self) -> Result<String, WaypointError> {
        Ok(serde_json::to_string_pretty(&self.waypoints)?)
    }

    /// Replace the whole list with the waypoints in `document`.
    ///
    /// Missing or invalid colors become the accent color. Returns the number of
    /// imported waypoints.
    ///
    /// # Errors
    ///
    /// [`WaypointError::Malformed`] if the document is not an array of
    /// waypoints and [`WaypointError::UnnamedEntry`] if any entry has a blank
    /// name. The existing list is left untouched in both cases.
    pub fn import_json(&mut self, document: &str) -> Result<usize, WaypointError> {
        let mut incoming: Vec<Waypoint> = serde_json::from_str(document)?;
        if let Some(index) = incoming.iter().position(|w| w.name.trim().is_empty()) {
            return Err(WaypointError::UnnamedEntry { index });
        }
        for waypoint in &mut incoming {
            if !is_hex_color(&waypoint.color) {
                waypoint.color = default_color();
            }
        }
        self.waypoints = incoming;
        Ok(self.waypoints.len())
    }

    /// Return a reference to the waypoint at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    /// All waypoints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter()
    }

    /// Enabled waypoints in insertion order.
    pub fn enabled(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter().filter(|w| w.enabled)
    }

    /// Number of waypoints currently in the store, enabled or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Returns `true` if the store contains no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}
