//! # Light Client Configuration
//!
//! Tunables for providers. Verifiers themselves take no configuration.

use serde::{Deserialize, Serialize};

use crate::domain::{LATEST_HEIGHT_BOUND, LINEAR_SEARCH_THRESHOLD, MAX_FULL_COMMIT_SIZE};

/// On-disk encoding for full commit files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileEncoding {
    /// bincode.
    #[default]
    Binary,
    /// serde_json.
    Json,
}

/// Light client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiteClientConfig {
    /// Memory provider uses linear search up to this many commits.
    pub linear_search_threshold: usize,

    /// Maximum bytes read for one full commit file.
    pub max_full_commit_size: u64,

    /// Encoding used when the file provider writes.
    pub file_encoding: FileEncoding,

    /// Height the file provider treats as "latest".
    pub latest_height_bound: u64,
}

impl Default for LiteClientConfig {
    fn default() -> Self {
        Self {
            linear_search_threshold: LINEAR_SEARCH_THRESHOLD,
            max_full_commit_size: MAX_FULL_COMMIT_SIZE,
            file_encoding: FileEncoding::Binary,
            latest_height_bound: LATEST_HEIGHT_BOUND,
        }
    }
}

impl LiteClientConfig {
    /// Create a config for testing (JSON files are easier to inspect).
    pub fn for_testing() -> Self {
        Self {
            file_encoding: FileEncoding::Json,
            ..Self::default()
        }
    }
}
