use std::cell::Cell;

use super::*;
use crate::dimension::{DraggableDimension, DroppableDimension};
use crate::fixtures::{FakeDraggable, FakeDroppable, Preset};
use crate::geometry::Position;
use crate::scheduler::{FrameScheduler, ManualScheduler};
use crate::watcher::{DraggableWatcher, DroppableWatcher};

fn populated(preset: &Preset) -> RefCell<Registry> {
    let mut registry = Registry::new();
    for dimension in preset.droppables() {
        registry.register_droppable(dimension.descriptor.clone(), FakeDroppable::new(dimension.clone())).unwrap();
    }
    for dimension in preset.draggables() {
        registry.register_draggable(dimension.descriptor.clone(), FakeDraggable::new(dimension.clone())).unwrap();
    }
    RefCell::new(registry)
}

fn plan(preset: &Preset, include_critical: bool, scope: CollectionScope) -> CollectionPlan {
    CollectionPlan { critical: preset.critical(), options: CollectOptions { include_critical }, scope }
}

// =============================================================
// Collector batching
// =============================================================

#[test]
fn first_request_needs_a_frame() {
    let mut collector = Collector::new();

    assert!(!collector.coalesce(CollectOptions::default()));
    assert!(!collector.is_pending());
}

#[test]
fn second_request_coalesces_and_keeps_latest_options() {
    let scheduler = ManualScheduler::new();
    let mut collector = Collector::new();
    collector.scheduled(scheduler.schedule_once(Box::new(|| {})), CollectOptions { include_critical: false });

    assert!(collector.coalesce(CollectOptions { include_critical: true }));

    assert_eq!(scheduler.pending(), 1);
    assert_eq!(collector.take_pending(), Some(CollectOptions { include_critical: true }));
    assert!(!collector.is_pending());
}

#[test]
fn cancel_returns_scheduled_handle() {
    let scheduler = ManualScheduler::new();
    let mut collector = Collector::new();
    let handle = scheduler.schedule_once(Box::new(|| {}));
    collector.scheduled(handle, CollectOptions::default());

    assert_eq!(collector.cancel(), Some(handle));
    assert_eq!(collector.cancel(), None);
    assert_eq!(collector.take_pending(), None);
}

// =============================================================
// Critical collection
// =============================================================

#[test]
fn collect_critical_measures_pair() {
    let preset = Preset::new();
    let registry = populated(&preset);

    let dimensions = collect_critical(&registry, &preset.critical()).unwrap();

    assert_eq!(dimensions.draggable, preset.in_home1);
    assert_eq!(dimensions.droppable, preset.home);
}

#[test]
fn collect_critical_missing_draggable() {
    let preset = Preset::new();
    let registry = populated(&preset);
    registry.borrow_mut().unregister_draggable("inHome1");

    let err = collect_critical(&registry, &preset.critical()).unwrap_err();
    assert_eq!(err, MarshalError::UnknownDraggable("inHome1".into()));
}

#[test]
fn collect_critical_missing_droppable() {
    let preset = Preset::new();
    let registry = populated(&preset);
    registry.borrow_mut().unregister_droppable("home");

    let err = collect_critical(&registry, &preset.critical()).unwrap_err();
    assert_eq!(err, MarshalError::UnknownDroppable("home".into()));
}

// =============================================================
// Full collection
// =============================================================

#[test]
fn collect_all_excludes_critical() {
    let preset = Preset::new();
    let registry = populated(&preset);

    let collection = collect_all(&registry, &plan(&preset, false, CollectionScope::All));

    assert_eq!(collection.dimensions.draggables.len(), 3);
    assert_eq!(collection.dimensions.droppables.len(), 2);
    assert!(!collection.measured_droppables.contains("home"));
}

#[test]
fn collect_all_includes_critical() {
    let preset = Preset::new();
    let registry = populated(&preset);

    let collection = collect_all(&registry, &plan(&preset, true, CollectionScope::All));

    assert_eq!(collection.dimensions, preset.all_dimensions());
    assert_eq!(collection.measured_droppables.len(), 3);
}

#[test]
fn collect_all_same_type_scope() {
    let preset = Preset::new();
    let registry = populated(&preset);

    let collection = collect_all(&registry, &plan(&preset, true, CollectionScope::SameType));

    assert_eq!(collection.dimensions.droppables.len(), 2);
    assert_eq!(collection.dimensions.draggables.len(), 3);
    assert!(!collection.dimensions.draggables.contains_key("inNotes1"));
}

#[test]
fn collect_all_on_empty_registry() {
    let preset = Preset::new();
    let registry = RefCell::new(Registry::new());
    let collection = collect_all(&registry, &plan(&preset, true, CollectionScope::All));
    assert!(collection.dimensions.is_empty());
}

/// Droppable whose measurement unregisters another entry.
struct Unregistering {
    registry: Rc<RefCell<Registry>>,
    target: &'static str,
    dimension: DroppableDimension,
}

impl DroppableWatcher for Unregistering {
    fn dimension(&self) -> DroppableDimension {
        self.registry.borrow_mut().unregister_draggable(self.target);
        self.dimension.clone()
    }

    fn scroll(&self, _offset: Position) {}
}

/// Draggable that counts measurements.
struct Counting(DraggableDimension, Rc<Cell<usize>>);

impl DraggableWatcher for Counting {
    fn dimension(&self) -> DraggableDimension {
        self.1.set(self.1.get() + 1);
        self.0.clone()
    }
}

#[test]
fn entry_removed_mid_pass_is_never_measured() {
    let preset = Preset::new();
    let registry = Rc::new(RefCell::new(Registry::new()));
    let measured = Rc::new(Cell::new(0));
    {
        let mut r = registry.borrow_mut();
        r.register_droppable(
            preset.foreign.descriptor.clone(),
            Rc::new(Unregistering { registry: Rc::clone(&registry), target: "inHome2", dimension: preset.foreign.clone() }),
        )
        .unwrap();
        r.register_draggable(
            preset.in_home2.descriptor.clone(),
            Rc::new(Counting(preset.in_home2.clone(), Rc::clone(&measured))),
        )
        .unwrap();
    }

    let collection = collect_all(&registry, &plan(&preset, false, CollectionScope::All));

    assert_eq!(measured.get(), 0);
    assert!(collection.dimensions.draggables.is_empty());
    assert!(collection.dimensions.droppables.contains_key("foreign"));
}
