//! Error taxonomy for the marshal.
//!
//! Every variant is a programmer error on the caller's side. Nothing here is
//! retried or recovered internally; calls that arrive while no drag is active
//! are absorbed before they can produce an error.

use std::fmt;

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Which registry an id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Draggable,
    Droppable,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draggable => f.write_str("Draggable"),
            Self::Droppable => f.write_str("Droppable"),
        }
    }
}

/// Operation attempted against an entry that is not registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Scroll,
    UpdateScroll,
    UpdateIsEnabled,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scroll => f.write_str("scroll"),
            Self::UpdateScroll => f.write_str("update the scroll on"),
            Self::UpdateIsEnabled => f.write_str("update the enabled state on"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarshalError {
    #[error("Cannot register {kind} {id} as an entry with that id is already registered")]
    DuplicateRegistration { kind: EntryKind, id: String },
    #[error("Cannot start publishing for Draggable {0} as it is not registered")]
    UnknownDraggable(String),
    #[error("Cannot start publishing as the home Droppable {0} is not registered")]
    UnknownDroppable(String),
    #[error("Cannot {action} {kind} {id} as it is not registered")]
    NotRegistered { kind: EntryKind, id: String, action: Action },
    #[error("Cannot start publishing while a drag is already being published")]
    AlreadyPublishing,
    #[error("Cannot {action} when no drag is being published")]
    NotPublishing { action: &'static str },
    #[error("Cannot {action} from within a marshal callback")]
    Reentrant { action: &'static str },
    #[error("invalid value {value:?} for {var}")]
    Config { var: &'static str, value: String },
}

impl MarshalError {
    /// Shorthand for an unregistered droppable.
    pub(crate) fn droppable_not_registered(id: &str, action: Action) -> Self {
        Self::NotRegistered { kind: EntryKind::Droppable, id: id.to_owned(), action }
    }
}

pub type Result<T, E = MarshalError> = std::result::Result<T, E>;
