//! Registry of draggable and droppable entries, each bound to its watcher.
//!
//! Entries can be added and removed in any drag phase. Lookups hand out
//! `Rc` watcher handles so a caller can drop its registry borrow before
//! calling into collaborator code.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::dimension::{DraggableDescriptor, DraggableId, DroppableDescriptor, DroppableId};
use crate::error::{Action, EntryKind, MarshalError, Result};
use crate::watcher::{DraggableWatcher, DroppableWatcher};

/// A registered draggable.
#[derive(Clone)]
pub struct DraggableEntry {
    pub descriptor: DraggableDescriptor,
    pub watcher: Rc<dyn DraggableWatcher>,
}

impl fmt::Debug for DraggableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraggableEntry").field("descriptor", &self.descriptor).finish_non_exhaustive()
    }
}

/// A registered droppable.
#[derive(Clone)]
pub struct DroppableEntry {
    pub descriptor: DroppableDescriptor,
    pub watcher: Rc<dyn DroppableWatcher>,
}

impl fmt::Debug for DroppableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DroppableEntry").field("descriptor", &self.descriptor).finish_non_exhaustive()
    }
}

/// Id-keyed store of draggable and droppable entries.
#[derive(Debug, Default)]
pub struct Registry {
    draggables: HashMap<DraggableId, DraggableEntry>,
    droppables: HashMap<DroppableId, DroppableEntry>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Mutation ---

    /// Register a draggable.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::DuplicateRegistration`] if the id is taken.
    pub fn register_draggable(&mut self, descriptor: DraggableDescriptor, watcher: Rc<dyn DraggableWatcher>) -> Result<()> {
        if self.draggables.contains_key(&descriptor.id) {
            return Err(MarshalError::DuplicateRegistration { kind: EntryKind::Draggable, id: descriptor.id });
        }
        debug!(id = %descriptor.id, droppable_id = %descriptor.droppable_id, "draggable registered");
        self.draggables.insert(descriptor.id.clone(), DraggableEntry { descriptor, watcher });
        Ok(())
    }

    /// Register a droppable.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::DuplicateRegistration`] if the id is taken.
    pub fn register_droppable(&mut self, descriptor: DroppableDescriptor, watcher: Rc<dyn DroppableWatcher>) -> Result<()> {
        if self.droppables.contains_key(&descriptor.id) {
            return Err(MarshalError::DuplicateRegistration { kind: EntryKind::Droppable, id: descriptor.id });
        }
        debug!(id = %descriptor.id, "droppable registered");
        self.droppables.insert(descriptor.id.clone(), DroppableEntry { descriptor, watcher });
        Ok(())
    }

    /// Remove a draggable, returning it if it was present.
    pub fn unregister_draggable(&mut self, id: &str) -> Option<DraggableEntry> {
        let removed = self.draggables.remove(id);
        if removed.is_some() {
            debug!(%id, "draggable unregistered");
        }
        removed
    }

    /// Remove a droppable, returning it if it was present.
    pub fn unregister_droppable(&mut self, id: &str) -> Option<DroppableEntry> {
        let removed = self.droppables.remove(id);
        if removed.is_some() {
            debug!(%id, "droppable unregistered");
        }
        removed
    }

    // --- Lookup ---

    #[must_use]
    pub fn draggable(&self, id: &str) -> Option<&DraggableEntry> {
        self.draggables.get(id)
    }

    #[must_use]
    pub fn droppable(&self, id: &str) -> Option<&DroppableEntry> {
        self.droppables.get(id)
    }

    /// Look up a droppable that a validated channel is about to act on.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::NotRegistered`] naming `id` and `action`.
    pub fn require_droppable(&self, id: &str, action: Action) -> Result<&DroppableEntry> {
        self.droppables.get(id).ok_or_else(|| MarshalError::droppable_not_registered(id, action))
    }

    /// Ids of all registered draggables, optionally restricted to one type.
    #[must_use]
    pub fn draggable_ids(&self, of_type: Option<&str>) -> Vec<DraggableId> {
        self.draggables
            .values()
            .filter(|entry| of_type.is_none_or(|t| entry.descriptor.kind == t))
            .map(|entry| entry.descriptor.id.clone())
            .collect()
    }

    /// Ids of all registered droppables, optionally restricted to one type.
    #[must_use]
    pub fn droppable_ids(&self, of_type: Option<&str>) -> Vec<DroppableId> {
        self.droppables
            .values()
            .filter(|entry| of_type.is_none_or(|t| entry.descriptor.kind == t))
            .map(|entry| entry.descriptor.id.clone())
            .collect()
    }

    /// Number of entries of both kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draggables.len() + self.droppables.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draggables.is_empty() && self.droppables.is_empty()
    }
}
