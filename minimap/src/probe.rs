//! Capability detection for a same-origin game player object.
//!
//! The embedded game may or may not expose a player object to the hosting
//! page, and when it does the field names vary between builds. A probe reads
//! whatever numeric fields it recognises through a [`FieldReader`] and yields a
//! [`PoseSnapshot`]; a reader that recognises nothing yields `None`.

#[cfg(test)]
#[path = "probe_test.rs"]
mod probe_test;

use crate::pose::PoseSnapshot;

/// Recognised aliases for each pose field, in lookup order.
pub const X_FIELDS: &[&str] = &["x", "posX"];
pub const Y_FIELDS: &[&str] = &["y", "posY"];
pub const Z_FIELDS: &[&str] = &["z", "posZ"];
pub const YAW_FIELDS: &[&str] = &["yaw", "rotationYaw"];

/// Read-only numeric field access on an object of unknown shape.
///
/// Any access failure (missing field, wrong type, throwing getter) is `None`.
pub trait FieldReader {
    fn number(&self, name: &str) -> Option<f64>;
}

impl FieldReader for serde_json::Value {
    fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(serde_json::Value::as_f64)
    }
}

/// First finite value found among `aliases`.
fn first_number(reader: &impl FieldReader, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|name| reader.number(name).filter(|v| v.is_finite()))
}

/// Build a snapshot from whatever pose fields `reader` exposes.
///
/// Returns `None` when no field is recognised.
#[must_use]
pub fn snapshot_from_fields(reader: &impl FieldReader) -> Option<PoseSnapshot> {
    let snapshot = PoseSnapshot {
        x: first_number(reader, X_FIELDS),
        y: first_number(reader, Y_FIELDS),
        z: first_number(reader, Z_FIELDS),
        yaw: first_number(reader, YAW_FIELDS),
    };
    if snapshot.is_empty() { None } else { Some(snapshot) }
}
