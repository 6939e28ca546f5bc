//! Capabilities supplied by the collaborators that own draggable and
//! droppable elements.
//!
//! The marshal never measures anything itself. It only asks a watcher for a
//! dimension, or asks a droppable watcher to scroll its element.
//!
//! A droppable measured during a drag is told to watch its scroll container
//! with the lift's [`ScrollOptions`], and is told to stop when the drag ends.
//! Each `watch_scroll` is followed by at most one `unwatch_scroll` on the
//! same watcher; a droppable unregistered mid-drag gets neither again.

use crate::dimension::{DraggableDimension, DroppableDimension, ScrollOptions};
use crate::geometry::Position;

/// Measures a single draggable.
pub trait DraggableWatcher {
    fn dimension(&self) -> DraggableDimension;
}

/// Measures and scrolls a single droppable.
pub trait DroppableWatcher {
    fn dimension(&self) -> DroppableDimension;

    /// Scroll the droppable's scroll container by `offset`.
    fn scroll(&self, offset: Position);

    /// Start reporting scroll changes for the active drag.
    fn watch_scroll(&self, _options: ScrollOptions) {}

    /// The drag this droppable was measured for has ended.
    fn unwatch_scroll(&self) {}
}
