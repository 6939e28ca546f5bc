//! Dimension collection and update coordination for drag interactions.
//!
//! During a drag, the consumer needs the geometry of the lifted item and its
//! home container immediately, and the geometry of everything else soon after.
//! This crate owns that sequencing. Collaborators register a watcher per
//! draggable and droppable; the [`marshal::DimensionMarshal`] measures the
//! critical pair synchronously when a drag starts, defers the rest to the
//! next animation frame, and routes scroll and enablement changes to the
//! consumer's [`callbacks::Callbacks`] while the drag is live.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`marshal`] | Drag lifecycle state machine and validated update channels |
//! | [`phase`] | Lifecycle phases (`Idle`, `Collecting`, `Watching`) |
//! | [`collector`] | Critical and deferred collection, frame batching |
//! | [`registry`] | Id-keyed draggable and droppable entries |
//! | [`scheduler`] | Frame scheduling abstraction and manual scheduler |
//! | [`watcher`] | Measurement capabilities implemented by collaborators |
//! | [`callbacks`] | Notification sink implemented by the consumer |
//! | [`dimension`] | Descriptors, dimensions and the published map |
//! | [`geometry`] | Positions, rectangles and the box model |
//! | [`config`] | Marshal configuration |
//! | [`error`] | Error taxonomy |

pub mod callbacks;
pub mod collector;
pub mod config;
pub mod dimension;
pub mod error;
pub mod geometry;
pub mod marshal;
pub mod phase;
pub mod registry;
pub mod scheduler;
pub mod watcher;

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures;

pub use callbacks::Callbacks;
pub use config::{CollectionScope, MarshalConfig};
pub use dimension::{
    CollectOptions, Critical, DimensionMap, DraggableDescriptor, DraggableDimension, DroppableDescriptor,
    DroppableDimension, LiftRequest, ScrollOptions, StartPublishingResult, Viewport,
};
pub use error::{MarshalError, Result};
pub use geometry::Position;
pub use marshal::DimensionMarshal;
pub use phase::Phase;
pub use scheduler::{FrameScheduler, ManualScheduler};
pub use watcher::{DraggableWatcher, DroppableWatcher};
