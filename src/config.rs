//! Marshal configuration, built from defaults or environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MarshalError, Result};

pub const SCOPE_VAR: &str = "DIMENSION_MARSHAL_SCOPE";
pub const SLOW_COLLECTION_VAR: &str = "DIMENSION_MARSHAL_SLOW_COLLECTION_MS";

/// One frame at 60Hz.
pub const DEFAULT_SLOW_COLLECTION_MS: u64 = 16;

/// Which registered entries a deferred collection measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionScope {
    /// Every registered entry.
    #[default]
    All,
    /// Only entries whose type matches the critical droppable's type.
    SameType,
}

impl CollectionScope {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "same_type" | "same-type" => Some(Self::SameType),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarshalConfig {
    pub scope: CollectionScope,
    /// Collection passes slower than this are logged at `warn`.
    pub slow_collection_ms: u64,
}

impl Default for MarshalConfig {
    fn default() -> Self {
        Self { scope: CollectionScope::All, slow_collection_ms: DEFAULT_SLOW_COLLECTION_MS }
    }
}

impl MarshalConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `DIMENSION_MARSHAL_SCOPE`: `all` (default) or `same_type`
    /// - `DIMENSION_MARSHAL_SLOW_COLLECTION_MS`: default 16
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::Config`] when a variable is set to a value that
    /// cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build config from an arbitrary variable source.
    pub(crate) fn from_lookup<F, E>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, E>,
    {
        let mut config = Self::default();

        if let Ok(raw) = lookup(SCOPE_VAR) {
            config.scope = CollectionScope::parse(&raw).ok_or(MarshalError::Config { var: SCOPE_VAR, value: raw })?;
        }

        if let Ok(raw) = lookup(SLOW_COLLECTION_VAR) {
            config.slow_collection_ms = match raw.trim().parse::<u64>() {
                Ok(ms) => ms,
                Err(_) => return Err(MarshalError::Config { var: SLOW_COLLECTION_VAR, value: raw }),
            };
        }

        Ok(config)
    }

    #[must_use]
    pub fn slow_collection_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_collection_ms)
    }
}
