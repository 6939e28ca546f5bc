//! Drag lifecycle phase.
//!
//! Each active variant carries the critical pair for the drag, so the pair
//! exists exactly as long as the marshal is publishing and disappears on the
//! return to `Idle`.

#[cfg(test)]
#[path = "phase_test.rs"]
mod phase_test;

use std::fmt;

use crate::dimension::Critical;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// No drag in progress.
    #[default]
    Idle,
    /// The critical pair is measured; the full collection has not yet been
    /// published.
    Collecting {
        critical: Critical,
    },
    /// At least one full collection has been published; the drag is live.
    Watching {
        critical: Critical,
    },
}

impl Phase {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The critical pair of the active drag.
    #[must_use]
    pub fn critical(&self) -> Option<&Critical> {
        match self {
            Self::Idle => None,
            Self::Collecting { critical } | Self::Watching { critical } => Some(critical),
        }
    }

    /// Move to `Watching` after a collection is published. Idle stays idle.
    #[must_use]
    pub fn into_watching(self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Collecting { critical } | Self::Watching { critical } => Self::Watching { critical },
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Collecting { .. } => f.write_str("collecting"),
            Self::Watching { .. } => f.write_str("watching"),
        }
    }
}
