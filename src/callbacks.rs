//! Notification sink implemented by the consumer of the marshal.
//!
//! All methods are invoked synchronously. The marshal holds no internal
//! borrow while a callback runs. Nested `start_publishing` and
//! `stop_publishing` calls from inside a callback are rejected with
//! `MarshalError::Reentrant`; channel calls and `collect` are allowed.

use crate::dimension::DimensionMap;
use crate::geometry::Position;

pub trait Callbacks {
    /// A collection has completed. The map is owned by the sink from here on.
    fn publish(&self, dimensions: DimensionMap);

    /// A droppable has been scrolled to `offset`.
    fn update_droppable_scroll(&self, id: &str, offset: Position);

    /// A droppable was enabled or disabled.
    fn update_droppable_is_enabled(&self, id: &str, is_enabled: bool);
}
