#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn base_pose() -> Pose {
    Pose { x: 0.0, y: 64.0, z: 0.0, yaw: 0.0 }
}

fn store_with(names: &[&str]) -> WaypointStore {
    let mut store = WaypointStore::new();
    for (i, name) in names.iter().enumerate() {
        let pose = Pose { x: i as f64 * 10.0, y: 64.0, z: -(i as f64) * 5.0, yaw: 0.0 };
        store.add(&pose, name, None).unwrap();
    }
    store
}

// =============================================================
// Color validation
// =============================================================

#[test]
fn hex_color_accepts_short_and_long_forms() {
    assert!(is_hex_color("#abc"));
    assert!(is_hex_color("#00eaff"));
    assert!(is_hex_color("#FF00AA"));
}

#[test]
fn hex_color_rejects_malformed_values() {
    for raw in ["notacolor", "00eaff", "#12", "#1234", "#12345", "#1234567", "#ggg", "", "#", " #abc"] {
        assert!(!is_hex_color(raw), "{raw:?} should be rejected");
    }
}

#[test]
fn color_or_accent_falls_back() {
    assert_eq!(color_or_accent(None), ACCENT_COLOR);
    assert_eq!(color_or_accent(Some("red")), ACCENT_COLOR);
    assert_eq!(color_or_accent(Some("#123")), "#123");
}

// =============================================================
// add
// =============================================================

#[test]
fn add_base_scenario() {
    let mut store = WaypointStore::new();
    let waypoint = store.add(&base_pose(), "Base", Some("#00eaff")).unwrap().clone();
    assert_eq!(store.len(), 1);
    assert_eq!(waypoint.name, "Base");
    assert!(waypoint.enabled);
    assert_eq!(waypoint.color, "#00eaff");
    assert_eq!(waypoint.position, Position { x: 0.0, y: 64.0, z: 0.0 });
}

#[test]
fn add_captures_pose_position() {
    let mut store = WaypointStore::new();
    let pose = Pose { x: 12.5, y: 70.0, z: -3.25, yaw: 123.0 };
    store.add(&pose, "Mine", None).unwrap();
    assert_eq!(store.get(0).unwrap().position, Position { x: 12.5, y: 70.0, z: -3.25 });
}

#[test]
fn add_empty_name_is_noop() {
    let mut store = WaypointStore::new();
    assert!(matches!(store.add(&base_pose(), "", None), Err(WaypointError::EmptyName)));
    assert!(matches!(store.add(&base_pose(), "   ", None), Err(WaypointError::EmptyName)));
    assert_eq!(store.len(), 0);
}

#[test]
fn add_defaults_missing_color() {
    let mut store = WaypointStore::new();
    store.add(&base_pose(), "A", None).unwrap();
    assert_eq!(store.get(0).unwrap().color, ACCENT_COLOR);
}

#[test]
fn add_defaults_invalid_color() {
    let mut store = WaypointStore::new();
    store.add(&base_pose(), "A", Some("blue")).unwrap();
    assert_eq!(store.get(0).unwrap().color, ACCENT_COLOR);
}

#[test]
fn add_allows_duplicate_names() {
    let store = store_with(&["Home", "Home"]);
    assert_eq!(store.len(), 2);
}

#[test]
fn add_trims_name() {
    let store = store_with(&["  Camp  "]);
    assert_eq!(store.get(0).unwrap().name, "Camp");
}

// =============================================================
// remove / toggle
// =============================================================

#[test]
fn remove_returns_entry_and_shifts() {
    let mut store = store_with(&["A", "B", "C"]);
    let removed = store.remove(1).unwrap();
    assert_eq!(removed.name, "B");
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(1).unwrap().name, "C");
}

#[test]
fn remove_out_of_range_is_silent() {
    let mut store = store_with(&["A"]);
    assert!(store.remove(5).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn toggle_flips_and_keeps_entry() {
    let mut store = store_with(&["Base"]);
    assert_eq!(store.toggle_enabled(0), Some(false));
    assert_eq!(store.len(), 1);
    assert_eq!(store.enabled().count(), 0);
    assert_eq!(store.toggle_enabled(0), Some(true));
    assert_eq!(store.enabled().count(), 1);
}

#[test]
fn toggle_out_of_range_is_none() {
    let mut store = WaypointStore::new();
    assert_eq!(store.toggle_enabled(0), None);
}

// =============================================================
// recolor
// =============================================================

#[test]
fn recolor_valid_updates() {
    let mut store = store_with(&["A"]);
    store.recolor(0, "#ff00aa").unwrap();
    assert_eq!(store.get(0).unwrap().color, "#ff00aa");
}

#[test]
fn recolor_invalid_keeps_prior_color() {
    let mut store = store_with(&["A"]);
    store.recolor(0, "#123456").unwrap();
    let err = store.recolor(0, "notacolor").unwrap_err();
    assert!(matches!(err, WaypointError::InvalidColor(_)));
    assert_eq!(store.get(0).unwrap().color, "#123456");
}

#[test]
fn recolor_out_of_range_errors() {
    let mut store = WaypointStore::new();
    assert!(matches!(store.recolor(3, "#fff"), Err(WaypointError::OutOfRange(3))));
}

// =============================================================
// export / import
// =============================================================

#[test]
fn export_shape_matches_file_format() {
    let mut store = WaypointStore::new();
    store.add(&base_pose(), "Base", Some("#00eaff")).unwrap();
    let exported = store.export_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(
        value,
        json!([{ "name": "Base", "x": 0.0, "y": 64.0, "z": 0.0, "color": "#00eaff", "enabled": true }])
    );
}

#[test]
fn export_is_pretty_printed_with_two_spaces() {
    let store = store_with(&["A"]);
    let exported = store.export_json().unwrap();
    assert!(exported.starts_with("[\n  {\n    \"name\": \"A\""));
}

#[test]
fn export_empty_store_is_empty_array() {
    assert_eq!(WaypointStore::new().export_json().unwrap(), "[]");
}

#[test]
fn import_then_export_preserves_fields() {
    let mut original = store_with(&["A", "B", "C"]);
    original.toggle_enabled(1);
    original.recolor(2, "#ABC").unwrap();
    let exported = original.export_json().unwrap();

    let mut restored = WaypointStore::new();
    assert_eq!(restored.import_json(&exported).unwrap(), 3);
    for (a, b) in original.iter().zip(restored.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn import_replaces_existing_list() {
    let mut store = store_with(&["Old1", "Old2"]);
    store
        .import_json(r##"[{"name":"New","x":1,"y":2,"z":3,"color":"#fff","enabled":false}]"##)
        .unwrap();
    assert_eq!(store.len(), 1);
    let waypoint = store.get(0).unwrap();
    assert_eq!(waypoint.name, "New");
    assert_eq!(waypoint.position, Position { x: 1.0, y: 2.0, z: 3.0 });
    assert!(!waypoint.enabled);
}

#[test]
fn import_defaults_missing_color_and_enabled() {
    let mut store = WaypointStore::new();
    store.import_json(r#"[{"name":"Bare","x":0,"y":0,"z":0}]"#).unwrap();
    let waypoint = store.get(0).unwrap();
    assert_eq!(waypoint.color, ACCENT_COLOR);
    assert!(waypoint.enabled);
}

#[test]
fn import_normalizes_invalid_color() {
    let mut store = WaypointStore::new();
    store
        .import_json(r#"[{"name":"X","x":0,"y":0,"z":0,"color":"purple"}]"#)
        .unwrap();
    assert_eq!(store.get(0).unwrap().color, ACCENT_COLOR);
}

#[test]
fn import_malformed_keeps_existing_list() {
    let mut store = store_with(&["Keep"]);
    for doc in ["not json", "{}", r#"[{"name":"NoCoords"}]"#, r#"[{"name":"A","x":"1","y":0,"z":0}]"#] {
        let err = store.import_json(doc).unwrap_err();
        assert!(matches!(err, WaypointError::Malformed(_)), "{doc:?} gave {err:?}");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().name, "Keep");
    }
}

#[test]
fn import_unnamed_entry_rejected() {
    let mut store = store_with(&["Keep"]);
    let err = store
        .import_json(r#"[{"name":"Ok","x":0,"y":0,"z":0},{"name":"","x":0,"y":0,"z":0}]"#)
        .unwrap_err();
    assert!(matches!(err, WaypointError::UnnamedEntry { index: 1 }));
    assert_eq!(store.get(0).unwrap().name, "Keep");
}

#[test]
fn import_empty_array_clears() {
    let mut store = store_with(&["A"]);
    assert_eq!(store.import_json("[]").unwrap(), 0);
    assert!(store.is_empty());
}

// =============================================================
// Store serde
// =============================================================

#[test]
fn store_serializes_as_bare_array() {
    let store = store_with(&["A"]);
    let value = serde_json::to_value(&store).unwrap();
    assert!(value.is_array());
    let back: WaypointStore = serde_json::from_value(value).unwrap();
    assert_eq!(back, store);
}
