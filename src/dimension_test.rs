use serde_json::json;

use super::*;
use crate::fixtures::Preset;

// =============================================================
// Descriptor serde
// =============================================================

#[test]
fn draggable_descriptor_uses_type_key() {
    let descriptor = DraggableDescriptor {
        id: "item-1".into(),
        droppable_id: "list".into(),
        kind: "TASK".into(),
        index: 3,
    };
    let value = serde_json::to_value(&descriptor).unwrap();
    assert_eq!(value["type"], "TASK");
    assert!(value.get("kind").is_none());
}

#[test]
fn lift_request_scroll_options_default_when_absent() {
    let request: LiftRequest = serde_json::from_value(json!({ "draggable_id": "a" })).unwrap();
    assert_eq!(request.draggable_id, "a");
    assert!(!request.scroll_options.should_publish_immediately);
}

#[test]
fn axis_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Axis::Horizontal).unwrap(), json!("horizontal"));
}

#[test]
fn droppable_dimension_omits_missing_scrollable() {
    let preset = Preset::new();
    let value = serde_json::to_value(&preset.home).unwrap();
    assert!(value.get("closest_scrollable").is_none());
}

// =============================================================
// DimensionMap
// =============================================================

#[test]
fn empty_map() {
    let map = DimensionMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
}

#[test]
fn insert_keys_by_descriptor_id() {
    let preset = Preset::new();
    let mut map = DimensionMap::new();
    map.insert_draggable(preset.in_home1.clone());
    map.insert_droppable(preset.home.clone());
    assert_eq!(map.len(), 2);
    assert_eq!(map.draggables["inHome1"], preset.in_home1);
    assert_eq!(map.droppables["home"], preset.home);
}

#[test]
fn insert_same_id_replaces() {
    let preset = Preset::new();
    let mut map = DimensionMap::new();
    map.insert_draggable(preset.in_home1.clone());
    let mut moved = preset.in_home1.clone();
    moved.descriptor.index = 9;
    map.insert_draggable(moved);
    assert_eq!(map.draggables.len(), 1);
    assert_eq!(map.draggables["inHome1"].descriptor.index, 9);
}

#[test]
fn critical_dimensions_into_map() {
    let preset = Preset::new();
    let map = CriticalDimensions { draggable: preset.in_home1.clone(), droppable: preset.home.clone() }.into_map();
    assert_eq!(map.draggables.len(), 1);
    assert_eq!(map.droppables.len(), 1);
    assert!(map.draggables.contains_key("inHome1"));
    assert!(map.droppables.contains_key("home"));
}
