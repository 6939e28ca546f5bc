//! Dimension model: descriptors that identify draggables and droppables, the
//! measured dimensions watchers produce for them, and the map the marshal
//! publishes once a collection completes.
//!
//! Dimensions are produced entirely by watchers. The marshal never builds or
//! edits one; it only moves them from the watcher into a `DimensionMap` and
//! hands that map to the callback sink.

#[cfg(test)]
#[path = "dimension_test.rs"]
mod dimension_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{BoxModel, Position, Rect};

/// Unique identifier for a draggable.
pub type DraggableId = String;

/// Unique identifier for a droppable.
pub type DroppableId = String;

/// Grouping key: a draggable can only interact with droppables of its type.
pub type DragType = String;

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// Identifies a draggable and its home droppable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraggableDescriptor {
    pub id: DraggableId,
    pub droppable_id: DroppableId,
    #[serde(rename = "type")]
    pub kind: DragType,
    /// Position of the draggable within its home droppable.
    pub index: usize,
}

/// Identifies a droppable container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DroppableDescriptor {
    pub id: DroppableId,
    #[serde(rename = "type")]
    pub kind: DragType,
}

/// The draggable being lifted and its home droppable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critical {
    pub draggable: DraggableDescriptor,
    pub droppable: DroppableDescriptor,
}

// =============================================================================
// DIMENSIONS
// =============================================================================

/// Main axis of a droppable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Scroll offsets of a scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollDetails {
    /// Scroll offset at the time the container was measured.
    pub initial: Position,
    /// Latest known scroll offset.
    pub current: Position,
    /// Largest reachable scroll offset.
    pub max: Position,
}

/// The closest scrollable ancestor of a droppable (or the droppable itself).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollContainer {
    /// Visible frame of the container in client space.
    pub frame: Rect,
    pub scroll: ScrollDetails,
}

/// Measured geometry of a draggable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraggableDimension {
    pub descriptor: DraggableDescriptor,
    /// Box relative to the viewport.
    pub client: BoxModel,
    /// Box relative to the document (client shifted by window scroll).
    pub page: BoxModel,
}

/// Measured geometry of a droppable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppableDimension {
    pub descriptor: DroppableDescriptor,
    #[serde(default)]
    pub axis: Axis,
    pub is_enabled: bool,
    pub client: BoxModel,
    pub page: BoxModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closest_scrollable: Option<ScrollContainer>,
}

/// The window as seen at the start of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// Visible region of the document in page space.
    pub frame: Rect,
    pub scroll: Position,
    pub max_scroll: Position,
}

// =============================================================================
// DIMENSION MAP
// =============================================================================

/// Every dimension produced by one collection, keyed by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionMap {
    pub draggables: HashMap<DraggableId, DraggableDimension>,
    pub droppables: HashMap<DroppableId, DroppableDimension>,
}

impl DimensionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a draggable dimension keyed by its descriptor id.
    pub fn insert_draggable(&mut self, dimension: DraggableDimension) {
        self.draggables.insert(dimension.descriptor.id.clone(), dimension);
    }

    /// Insert a droppable dimension keyed by its descriptor id.
    pub fn insert_droppable(&mut self, dimension: DroppableDimension) {
        self.droppables.insert(dimension.descriptor.id.clone(), dimension);
    }

    /// Total number of dimensions of both kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draggables.len() + self.droppables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draggables.is_empty() && self.droppables.is_empty()
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Scroll behaviour requested for the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScrollOptions {
    /// Publish droppable scroll changes without waiting for the next frame.
    pub should_publish_immediately: bool,
}

/// A caller's intent to begin a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiftRequest {
    pub draggable_id: DraggableId,
    #[serde(default)]
    pub scroll_options: ScrollOptions,
}

/// Options for a deferred collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectOptions {
    /// Re-measure the critical pair as part of the pass.
    pub include_critical: bool,
}

/// Dimensions of the critical pair, measured eagerly.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalDimensions {
    pub draggable: DraggableDimension,
    pub droppable: DroppableDimension,
}

impl CriticalDimensions {
    /// Convert into a two-entry `DimensionMap`.
    #[must_use]
    pub fn into_map(self) -> DimensionMap {
        let mut map = DimensionMap::new();
        map.insert_draggable(self.draggable);
        map.insert_droppable(self.droppable);
        map
    }
}

/// Returned from `DimensionMarshal::start_publishing`.
#[derive(Debug, Clone, PartialEq)]
pub struct StartPublishingResult {
    pub critical: Critical,
    pub dimensions: DimensionMap,
    pub viewport: Viewport,
}
