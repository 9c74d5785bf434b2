//! Comparator configuration.
//!
//! The limits of a [`Comparator`](crate::Comparator) as a plain serde value,
//! so they can be loaded from JSON alongside other test or tool settings.
//! Missing fields take their defaults; unknown fields are rejected.

use crate::errors::{DeepCmpError, Result};
use serde::{Deserialize, Serialize};

/// Default cap on differing indices reported per slice.
pub const DEFAULT_SLICE_MAX_DIFFERENCES: usize = 10;

/// Default cap on differing keys reported per map.
pub const DEFAULT_MAP_MAX_DIFFERENCES: usize = 10;

/// Limits applied by a comparator. `0` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    pub max_depth: usize,
    pub slice_max_differences: usize,
    pub map_max_differences: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_depth: 0,
            slice_max_differences: DEFAULT_SLICE_MAX_DIFFERENCES,
            map_max_differences: DEFAULT_MAP_MAX_DIFFERENCES,
        }
    }
}

impl CompareConfig {
    /// No depth limit and no caps.
    pub fn unlimited() -> Self {
        Self {
            max_depth: 0,
            slice_max_differences: 0,
            map_max_differences: 0,
        }
    }

    /// Parses a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`DeepCmpError::InvalidConfig`] for malformed JSON, wrongly
    /// typed fields or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| DeepCmpError::InvalidConfig {
            reason: err.to_string(),
        })
    }
}
