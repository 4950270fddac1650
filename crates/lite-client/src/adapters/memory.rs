//! # In-Memory Provider
//!
//! Full commits kept in a height-ordered vector plus a hash index.
//!
//! Stores append and mark the vector unsorted; the next height lookup sorts
//! it once. Small stores are scanned linearly, larger ones bisected.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use crate::algorithms::{search_binary, search_linear};
use crate::config::LiteClientConfig;
use crate::domain::{FullCommit, Hash, LiteError, Result, LINEAR_SEARCH_THRESHOLD};
use crate::ports::Provider;

#[derive(Default)]
struct MemoryState {
    by_height: Vec<FullCommit>,
    by_hash: HashMap<Hash, FullCommit>,
    sorted: bool,
}

impl MemoryState {
    /// Sort ascending by height. Of several commits at one height only the
    /// most recently stored survives.
    fn sort_if_needed(&mut self) {
        if self.sorted {
            return;
        }
        // Stable sort keeps insertion order within a height.
        self.by_height.sort_by_key(FullCommit::height);
        self.by_height.dedup_by(|later, earlier| {
            if later.height() == earlier.height() {
                std::mem::swap(later, earlier);
                true
            } else {
                false
            }
        });
        self.sorted = true;
    }
}

/// Thread-safe in-memory [`Provider`].
pub struct MemoryProvider {
    state: RwLock<MemoryState>,
    linear_search_threshold: usize,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider {
    /// Empty provider with the default search threshold.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                sorted: true,
                ..Default::default()
            }),
            linear_search_threshold: LINEAR_SEARCH_THRESHOLD,
        }
    }

    /// Empty provider tuned by `config`.
    pub fn with_config(config: &LiteClientConfig) -> Self {
        Self {
            linear_search_threshold: config.linear_search_threshold,
            ..Self::new()
        }
    }

    /// Number of distinct heights stored.
    pub fn len(&self) -> usize {
        self.with_sorted(|commits| commits.len())
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.state.read().by_height.is_empty()
    }

    /// Floor lookup by scanning from the top.
    pub fn get_by_height_linear_search(&self, height: u64) -> Result<FullCommit> {
        self.with_sorted(|commits| search_linear(commits, height, FullCommit::height).cloned())
            .ok_or(LiteError::CommitNotFound)
    }

    /// Floor lookup by bisection.
    pub fn get_by_height_binary_search(&self, height: u64) -> Result<FullCommit> {
        self.with_sorted(|commits| search_binary(commits, height, FullCommit::height).cloned())
            .ok_or(LiteError::CommitNotFound)
    }

    /// Run `f` over the height-sorted commits, sorting first if a store
    /// happened since the last lookup.
    fn with_sorted<R>(&self, f: impl FnOnce(&[FullCommit]) -> R) -> R {
        {
            let state = self.state.read();
            if state.sorted {
                return f(&state.by_height);
            }
        }
        let mut state = self.state.write();
        state.sort_if_needed();
        f(&state.by_height)
    }
}

#[async_trait]
impl Provider for MemoryProvider {
    async fn store_commit(&self, fc: &FullCommit) -> Result<()> {
        fc.validate_self()?;

        let mut state = self.state.write();
        state.by_hash.insert(fc.validators_hash(), fc.clone());
        state.by_height.push(fc.clone());
        state.sorted = false;

        debug!("[lite] Stored commit at height {} in memory", fc.height());
        Ok(())
    }

    async fn get_by_height(&self, height: u64) -> Result<FullCommit> {
        let linear = self.state.read().by_height.len() <= self.linear_search_threshold;
        if linear {
            self.get_by_height_linear_search(height)
        } else {
            self.get_by_height_binary_search(height)
        }
    }

    async fn get_by_hash(&self, hash: &Hash) -> Result<FullCommit> {
        self.state
            .read()
            .by_hash
            .get(hash)
            .cloned()
            .ok_or(LiteError::CommitNotFound)
    }

    async fn latest_commit(&self) -> Result<FullCommit> {
        self.with_sorted(|commits| commits.last().cloned())
            .ok_or(LiteError::CommitNotFound)
    }
}
