//! # RPC Provider
//!
//! Read-only [`Provider`] backed by a remote full node. Every answer is
//! assembled from a signed header plus the validator set the node reports for
//! the same height, and the set must hash to what the header expects.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::domain::{Commit, FullCommit, Hash, LiteError, Result, ValidatorSet};
use crate::ports::{NodeClient, Provider, ValidatorsAtHeight};

/// Provider reading full commits from a node.
pub struct RpcProvider<N: NodeClient> {
    node: Arc<N>,
    last_height: AtomicU64,
}

impl<N: NodeClient> RpcProvider<N> {
    /// Wrap a node connection.
    pub fn new(node: Arc<N>) -> Self {
        Self {
            node,
            last_height: AtomicU64::new(0),
        }
    }

    /// Underlying node.
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Highest height this provider has returned.
    pub fn last_height(&self) -> u64 {
        self.last_height.load(Ordering::SeqCst)
    }

    /// Signed header at the node's latest height.
    pub async fn latest_remote_commit(&self) -> Result<Commit> {
        let status = self.node.status().await?;
        self.node.commit(Some(status.latest_block_height)).await
    }

    /// Pair `commit` with the validator set the node reports at its height.
    ///
    /// # Errors
    /// - `ValidatorsChanged` if that set does not hash to the header's value
    pub async fn seed_from_commit(&self, commit: Commit) -> Result<FullCommit> {
        let reported = self.node.validators(Some(commit.height())).await?;
        let validators = ValidatorSet::new(reported.validators);
        if validators.hash() != commit.validators_hash() {
            debug!(
                "[lite] Node {} validators at {} do not match the header",
                self.node.node_id(),
                commit.height()
            );
            return Err(LiteError::ValidatorsChanged);
        }
        Ok(self.record(FullCommit::new(commit, validators)))
    }

    /// Pair a reported validator set with the signed header at its height.
    async fn seed_from_validators(
        &self,
        validators: ValidatorSet,
        height: u64,
    ) -> Result<FullCommit> {
        let commit = self.node.commit(Some(height)).await?;
        let fc = FullCommit::new(commit, validators);
        fc.validate_self()?;
        Ok(self.record(fc))
    }

    fn record(&self, fc: FullCommit) -> FullCommit {
        self.last_height.fetch_max(fc.height(), Ordering::SeqCst);
        fc
    }
}

#[async_trait]
impl<N: NodeClient> Provider for RpcProvider<N> {
    /// Nodes are read-only; storing is a no-op.
    async fn store_commit(&self, _fc: &FullCommit) -> Result<()> {
        Ok(())
    }

    async fn get_by_height(&self, height: u64) -> Result<FullCommit> {
        debug!(
            "[lite] Fetching commit at height {} from {}",
            height,
            self.node.node_id()
        );
        let commit = self.node.commit(Some(height)).await?;
        self.seed_from_commit(commit).await
    }

    /// Only the node's current validator set can be looked up by hash.
    async fn get_by_hash(&self, hash: &Hash) -> Result<FullCommit> {
        let ValidatorsAtHeight {
            block_height,
            validators,
        } = self.node.validators(None).await?;
        let validators = ValidatorSet::new(validators);
        if validators.hash() != *hash {
            return Err(LiteError::CommitNotFound);
        }
        self.seed_from_validators(validators, block_height).await
    }

    async fn latest_commit(&self) -> Result<FullCommit> {
        let commit = self.latest_remote_commit().await?;
        self.seed_from_commit(commit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockNode;
    use crate::test_utils::ValKeys;

    const CHAIN_ID: &str = "rpc-chain";

    fn node(heights: &[u64]) -> (Vec<FullCommit>, Arc<MockNode>) {
        let keys = ValKeys::gen(4);
        let commits: Vec<FullCommit> = heights
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let vals = keys.to_validators(10, i as u64);
                keys.gen_full_commit(CHAIN_ID, *h, &[], &vals, b"app", 0, keys.len())
            })
            .collect();
        let node = Arc::new(MockNode::with_commits(commits.clone()));
        (commits, node)
    }

    #[tokio::test]
    async fn test_get_by_height() {
        let (commits, node) = node(&[10, 20]);
        let provider = RpcProvider::new(node);

        let fc = provider.get_by_height(10).await.unwrap();
        assert_eq!(fc, commits[0]);
        assert_eq!(provider.last_height(), 10);
    }

    #[tokio::test]
    async fn test_latest_commit() {
        let (commits, node) = node(&[10, 20, 30]);
        let provider = RpcProvider::new(node);

        let fc = provider.latest_commit().await.unwrap();
        assert_eq!(fc, commits[2]);
        assert_eq!(provider.last_height(), 30);

        provider.get_by_height(20).await.unwrap();
        assert_eq!(provider.last_height(), 30);
    }

    #[tokio::test]
    async fn test_get_by_hash_current_set_only() {
        let (commits, node) = node(&[10, 20]);
        let provider = RpcProvider::new(node);

        let fc = provider.get_by_hash(&commits[1].validators_hash()).await.unwrap();
        assert_eq!(fc.height(), 20);

        let err = provider
            .get_by_hash(&commits[0].validators_hash())
            .await
            .unwrap_err();
        assert!(err.is_commit_not_found());
    }

    #[tokio::test]
    async fn test_mismatched_validators() {
        let (commits, node) = node(&[10]);
        let keys = ValKeys::gen(2);
        let mut forged = commits[0].clone();
        forged.validators = keys.to_validators(1, 0);
        node.add_commit(forged);

        let provider = RpcProvider::new(node);
        let err = provider.get_by_height(10).await.unwrap_err();
        assert!(err.is_validators_changed());
        assert_eq!(provider.last_height(), 0);
    }

    #[tokio::test]
    async fn test_store_is_noop() {
        let (commits, node) = node(&[10]);
        let provider = RpcProvider::new(node);
        provider.store_commit(&commits[0]).await.unwrap();
        assert_eq!(provider.last_height(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let node = Arc::new(MockNode::failing());
        let provider = RpcProvider::new(node);
        let err = provider.latest_commit().await.unwrap_err();
        assert!(matches!(err, LiteError::Transport(_)));
    }
}
