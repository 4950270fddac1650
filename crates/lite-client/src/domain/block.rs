//! # Blocks
//!
//! Higher-level structures a proxy receives from a full node and checks
//! against an already verified commit.

use lite_crypto::{merkle_root, sha256, Hash};
use serde::{Deserialize, Serialize};

use super::commit::{BlockId, Header};

/// Transactions carried by a block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    /// Raw transactions.
    pub txs: Vec<Vec<u8>>,
}

impl Data {
    /// Wrap raw transactions.
    pub fn new(txs: Vec<Vec<u8>>) -> Self {
        Self { txs }
    }

    /// Merkle root of the transaction hashes.
    pub fn hash(&self) -> Hash {
        let leaves: Vec<Hash> = self.txs.iter().map(|tx| sha256(tx)).collect();
        merkle_root(&leaves)
    }
}

/// Full block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block header.
    pub header: Header,
    /// Block transactions.
    pub data: Data,
}

/// Block metadata as returned by a node's blockchain-info query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMeta {
    /// Block identifier.
    pub block_id: BlockId,
    /// Block header.
    pub header: Header,
}
