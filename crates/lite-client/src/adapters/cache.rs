//! # Cache Provider
//!
//! Layers several providers, fastest first. Stores go to every layer; reads
//! take the best answer across layers and copy it into the layers that were
//! consulted before the one that supplied it.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::{FullCommit, Hash, LiteError, Result};
use crate::ports::Provider;

/// Ordered stack of providers acting as one.
pub struct CacheProvider {
    providers: Vec<Arc<dyn Provider>>,
}

impl CacheProvider {
    /// Stack `providers`, highest priority first.
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Layers in priority order.
    pub fn providers(&self) -> &[Arc<dyn Provider>] {
        &self.providers
    }

    /// Copy `fc` into every layer before `source`. Failures are logged.
    async fn write_through(&self, fc: &FullCommit, source: usize) {
        for (idx, provider) in self.providers[..source].iter().enumerate() {
            if let Err(e) = provider.store_commit(fc).await {
                warn!(
                    "[lite] Cache write-through of height {} to layer {} failed: {}",
                    fc.height(),
                    idx,
                    e
                );
            }
        }
    }
}

#[async_trait]
impl Provider for CacheProvider {
    /// Store into every layer in order, stopping at the first failure.
    async fn store_commit(&self, fc: &FullCommit) -> Result<()> {
        for provider in &self.providers {
            provider.store_commit(fc).await?;
        }
        Ok(())
    }

    /// Highest answer across layers; an exact hit ends the search early.
    async fn get_by_height(&self, height: u64) -> Result<FullCommit> {
        let mut best: Option<(usize, FullCommit)> = None;
        let mut last_err = None;

        for (idx, provider) in self.providers.iter().enumerate() {
            match provider.get_by_height(height).await {
                Ok(fc) => {
                    let exact = fc.height() == height;
                    if best.as_ref().map_or(true, |(_, b)| fc.height() > b.height()) {
                        best = Some((idx, fc));
                    }
                    if exact {
                        break;
                    }
                }
                Err(e) => last_err = Some(e),
            }
        }

        match best {
            Some((idx, fc)) => {
                debug!("[lite] Cache answered height {} from layer {}", height, idx);
                self.write_through(&fc, idx).await;
                Ok(fc)
            }
            None => Err(last_err.unwrap_or(LiteError::CommitNotFound)),
        }
    }

    /// First layer that knows `hash`.
    async fn get_by_hash(&self, hash: &Hash) -> Result<FullCommit> {
        let mut last_err = None;
        for (idx, provider) in self.providers.iter().enumerate() {
            match provider.get_by_hash(hash).await {
                Ok(fc) => {
                    self.write_through(&fc, idx).await;
                    return Ok(fc);
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(last_err.unwrap_or(LiteError::CommitNotFound))
    }

    /// Highest latest commit across layers.
    async fn latest_commit(&self) -> Result<FullCommit> {
        let mut best: Option<FullCommit> = None;
        let mut last_err = None;
        for provider in &self.providers {
            match provider.latest_commit().await {
                Ok(fc) => {
                    if best.as_ref().map_or(true, |b| fc.height() > b.height()) {
                        best = Some(fc);
                    }
                }
                Err(e) => last_err = Some(e),
            }
        }
        best.ok_or_else(|| last_err.unwrap_or(LiteError::CommitNotFound))
    }
}
