//! # Outbound Ports
//!
//! Commit stores and remote full nodes the verifiers depend on.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::domain::{Commit, FullCommit, Hash, LiteError, Result, Validator};

/// Store of full commits addressable by height and by validator-set hash.
///
/// Every implementation validates a full commit before storing it, so every
/// commit a provider returns has passed `FullCommit::validate_basic`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Persist `fc` under its height and its validator-set hash.
    ///
    /// Idempotent on the hash key; the last write wins.
    async fn store_commit(&self, fc: &FullCommit) -> Result<()>;

    /// Full commit with the greatest height `<= height`.
    ///
    /// # Errors
    /// - `CommitNotFound` if every stored commit is above `height`
    async fn get_by_height(&self, height: u64) -> Result<FullCommit>;

    /// Full commit whose validator-set hash equals `hash`.
    ///
    /// # Errors
    /// - `CommitNotFound` if no stored commit has that hash
    async fn get_by_hash(&self, hash: &Hash) -> Result<FullCommit>;

    /// Full commit with the greatest stored height.
    ///
    /// # Errors
    /// - `CommitNotFound` if the provider is empty
    async fn latest_commit(&self) -> Result<FullCommit>;
}

/// Validator set a node reports for a block height.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorsAtHeight {
    /// Height the set applies to.
    pub block_height: u64,
    /// Validators in the node's order.
    pub validators: Vec<Validator>,
}

/// Sync status reported by a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeStatus {
    /// Height of the node's latest block.
    pub latest_block_height: u64,
}

/// Read access to a remote full node.
///
/// `None` heights ask for the node's latest value.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Signed header at `height`.
    async fn commit(&self, height: Option<u64>) -> Result<Commit>;

    /// Validator set at `height`.
    async fn validators(&self, height: Option<u64>) -> Result<ValidatorsAtHeight>;

    /// Node sync status.
    async fn status(&self) -> Result<NodeStatus>;

    /// Node identifier (for logging).
    fn node_id(&self) -> &str;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// In-process full node serving pre-generated full commits.
pub struct MockNode {
    /// Node identifier.
    pub id: String,
    /// Full commits by height.
    commits: RwLock<BTreeMap<u64, FullCommit>>,
    /// Should return errors?
    pub should_fail: bool,
}

impl Default for MockNode {
    fn default() -> Self {
        Self {
            id: "mock-node-1".to_string(),
            commits: RwLock::new(BTreeMap::new()),
            should_fail: false,
        }
    }
}

impl MockNode {
    /// Node serving `commits`.
    pub fn with_commits(commits: impl IntoIterator<Item = FullCommit>) -> Self {
        let node = Self::default();
        for fc in commits {
            node.add_commit(fc);
        }
        node
    }

    /// Node whose every call fails with a transport error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Make a block available on the node.
    pub fn add_commit(&self, fc: FullCommit) {
        self.commits.write().insert(fc.height(), fc);
    }

    fn check_healthy(&self) -> Result<()> {
        if self.should_fail {
            return Err(LiteError::Transport("Mock failure".to_string()));
        }
        Ok(())
    }

    fn lookup(&self, height: Option<u64>) -> Result<FullCommit> {
        let commits = self.commits.read();
        let found = match height {
            Some(h) => commits.get(&h),
            None => commits.values().next_back(),
        };
        found.cloned().ok_or_else(|| {
            LiteError::Transport(format!("height {:?} not available on {}", height, self.id))
        })
    }
}

#[async_trait]
impl NodeClient for MockNode {
    async fn commit(&self, height: Option<u64>) -> Result<Commit> {
        self.check_healthy()?;
        Ok(self.lookup(height)?.commit)
    }

    async fn validators(&self, height: Option<u64>) -> Result<ValidatorsAtHeight> {
        self.check_healthy()?;
        let fc = self.lookup(height)?;
        Ok(ValidatorsAtHeight {
            block_height: fc.height(),
            validators: fc.validators.validators().to_vec(),
        })
    }

    async fn status(&self) -> Result<NodeStatus> {
        self.check_healthy()?;
        let latest_block_height = self.lookup(None)?.height();
        Ok(NodeStatus {
            latest_block_height,
        })
    }

    fn node_id(&self) -> &str {
        &self.id
    }
}
