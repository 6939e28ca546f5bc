//! Dimension collection: the eager critical path and the deferred,
//! frame-batched pass over everything else.
//!
//! DESIGN
//! ======
//! Measurement calls into collaborator code, which may register or unregister
//! entries while it runs. No registry borrow is held across a watcher call:
//! each entry is looked up, its `Rc` watcher cloned out, and the borrow
//! released before measuring. An entry removed part way through a pass is
//! skipped rather than measured.
//!
//! Batching is tracked by [`Collector`]. It holds at most one pending pass;
//! further requests before the frame fires only update the pass options.
//! The collector never calls the scheduler itself, so its owner can release
//! any borrow before scheduling.

#[cfg(test)]
#[path = "collector_test.rs"]
mod collector_test;

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tracing::trace;

use crate::config::CollectionScope;
use crate::dimension::{CollectOptions, Critical, CriticalDimensions, DimensionMap, DroppableId};
use crate::error::{MarshalError, Result};
use crate::registry::Registry;
use crate::scheduler::FrameHandle;

// =============================================================================
// BATCHING
// =============================================================================

#[derive(Debug)]
struct Pending {
    handle: FrameHandle,
    options: CollectOptions,
}

/// Tracks the single pending deferred pass.
#[derive(Debug, Default)]
pub struct Collector {
    pending: Option<Pending>,
}

impl Collector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `options` into the pending pass. Returns `false` when nothing is
    /// pending and the caller has to schedule a frame.
    pub fn coalesce(&mut self, options: CollectOptions) -> bool {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.options = options;
                true
            }
            None => false,
        }
    }

    /// Record the frame scheduled for a new pass.
    pub fn scheduled(&mut self, handle: FrameHandle, options: CollectOptions) {
        self.pending = Some(Pending { handle, options });
    }

    /// Claim the pending pass when its frame fires.
    pub fn take_pending(&mut self) -> Option<CollectOptions> {
        self.pending.take().map(|pending| pending.options)
    }

    /// Drop the pending pass, returning the frame to cancel.
    pub fn cancel(&mut self) -> Option<FrameHandle> {
        self.pending.take().map(|pending| pending.handle)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

// =============================================================================
// MEASUREMENT
// =============================================================================

/// Everything a deferred pass needs, captured when its frame fires.
#[derive(Debug, Clone)]
pub struct CollectionPlan {
    pub critical: Critical,
    pub options: CollectOptions,
    pub scope: CollectionScope,
}

/// Result of a deferred pass.
#[derive(Debug, Default)]
pub struct Collection {
    pub dimensions: DimensionMap,
    /// Droppables whose watcher was asked for a dimension.
    pub measured_droppables: HashSet<DroppableId>,
}

/// Measure the critical pair immediately.
///
/// # Errors
///
/// Returns [`MarshalError::UnknownDraggable`] or
/// [`MarshalError::UnknownDroppable`] if either entry is not registered.
pub fn collect_critical(registry: &RefCell<Registry>, critical: &Critical) -> Result<CriticalDimensions> {
    let (draggable, droppable) = {
        let registry = registry.borrow();
        let draggable = registry
            .draggable(&critical.draggable.id)
            .map(|entry| Rc::clone(&entry.watcher))
            .ok_or_else(|| MarshalError::UnknownDraggable(critical.draggable.id.clone()))?;
        let droppable = registry
            .droppable(&critical.droppable.id)
            .map(|entry| Rc::clone(&entry.watcher))
            .ok_or_else(|| MarshalError::UnknownDroppable(critical.droppable.id.clone()))?;
        (draggable, droppable)
    };

    Ok(CriticalDimensions { draggable: draggable.dimension(), droppable: droppable.dimension() })
}

/// Measure every entry registered when the pass runs.
#[must_use]
pub fn collect_all(registry: &RefCell<Registry>, plan: &CollectionPlan) -> Collection {
    let of_type = match plan.scope {
        CollectionScope::All => None,
        CollectionScope::SameType => Some(plan.critical.droppable.kind.as_str()),
    };
    let (droppable_ids, draggable_ids) = {
        let registry = registry.borrow();
        (registry.droppable_ids(of_type), registry.draggable_ids(of_type))
    };
    let include_critical = plan.options.include_critical;
    let mut collection = Collection::default();

    for id in droppable_ids {
        if !include_critical && id == plan.critical.droppable.id {
            continue;
        }
        let Some(watcher) = registry.borrow().droppable(&id).map(|entry| Rc::clone(&entry.watcher)) else {
            trace!(%id, "droppable removed during collection");
            continue;
        };
        collection.dimensions.droppables.insert(id.clone(), watcher.dimension());
        collection.measured_droppables.insert(id);
    }

    for id in draggable_ids {
        if !include_critical && id == plan.critical.draggable.id {
            continue;
        }
        let Some(watcher) = registry.borrow().draggable(&id).map(|entry| Rc::clone(&entry.watcher)) else {
            trace!(%id, "draggable removed during collection");
            continue;
        };
        collection.dimensions.draggables.insert(id, watcher.dimension());
    }

    collection
}
