//! # Commits
//!
//! Signed headers and the full commits stored by providers.

use lite_crypto::{merkle_root, sha256, Ed25519Signature, Hash};
use serde::{Deserialize, Serialize};

use super::errors::{LiteError, Result};
use super::validator::ValidatorSet;

/// Validator address (20 bytes).
pub type Address = [u8; 20];

/// Identifies a block by the hash of its header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId {
    /// Header hash.
    pub hash: Hash,
}

impl BlockId {
    /// Create a block id from a header hash.
    pub fn new(hash: Hash) -> Self {
        Self { hash }
    }

    /// True when no hash is set.
    pub fn is_empty(&self) -> bool {
        self.hash == [0u8; 32]
    }
}

/// Block header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Chain identifier.
    pub chain_id: String,
    /// Block height.
    pub height: u64,
    /// Unix timestamp (seconds).
    pub time: u64,
    /// Number of transactions in the block.
    pub num_txs: u64,
    /// Previous block.
    pub last_block_id: BlockId,
    /// Hash of the validator set expected to sign this header.
    pub validators_hash: Hash,
    /// Merkle root of the block's transactions.
    pub data_hash: Hash,
    /// Application state after the previous block.
    pub app_hash: Hash,
    /// Consensus parameters hash.
    pub consensus_hash: Hash,
    /// Results of the previous block.
    pub results_hash: Hash,
}

impl Header {
    /// Merkle root over the SHA-256 of every encoded field, in declaration order.
    pub fn hash(&self) -> Hash {
        let fields = [
            sha256(self.chain_id.as_bytes()),
            sha256(&self.height.to_be_bytes()),
            sha256(&self.time.to_be_bytes()),
            sha256(&self.num_txs.to_be_bytes()),
            sha256(&self.last_block_id.hash),
            sha256(&self.validators_hash),
            sha256(&self.data_hash),
            sha256(&self.app_hash),
            sha256(&self.consensus_hash),
            sha256(&self.results_hash),
        ];
        merkle_root(&fields)
    }
}

/// A validator's precommit for a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Signer address.
    pub validator_address: Address,
    /// Signer position in the (address-sorted) validator set.
    pub validator_index: u32,
    /// Height voted on.
    pub height: u64,
    /// Consensus round.
    pub round: u32,
    /// Block voted for.
    pub block_id: BlockId,
    /// Ed25519 signature over [`Vote::sign_bytes`].
    pub signature: Ed25519Signature,
}

impl Vote {
    /// Canonical bytes a validator signs for this vote on `chain_id`.
    pub fn sign_bytes(&self, chain_id: &str) -> Vec<u8> {
        canonical_sign_bytes(chain_id, self.height, self.round, &self.block_id)
    }
}

/// Canonical precommit encoding: length-prefixed chain id, height, round, block hash.
pub fn canonical_sign_bytes(chain_id: &str, height: u64, round: u32, block_id: &BlockId) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(8 + chain_id.len() + 8 + 4 + 32);
    bytes.extend_from_slice(&(chain_id.len() as u64).to_be_bytes());
    bytes.extend_from_slice(chain_id.as_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&round.to_be_bytes());
    bytes.extend_from_slice(&block_id.hash);
    bytes
}

/// Precommits for one block, one slot per validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSignatures {
    /// Block the commit finalizes.
    pub block_id: BlockId,
    /// Precommits indexed by validator index; `None` for absent validators.
    pub precommits: Vec<Option<Vote>>,
}

impl CommitSignatures {
    fn first_vote(&self) -> Option<&Vote> {
        self.precommits.iter().flatten().next()
    }

    /// Height declared by the precommits (0 if none are present).
    pub fn height(&self) -> u64 {
        self.first_vote().map(|v| v.height).unwrap_or(0)
    }

    /// Round declared by the precommits (0 if none are present).
    pub fn round(&self) -> u32 {
        self.first_vote().map(|v| v.round).unwrap_or(0)
    }

    /// Number of validator slots.
    pub fn size(&self) -> usize {
        self.precommits.len()
    }

    /// Check the signature block is internally consistent.
    pub fn validate_basic(&self) -> Result<()> {
        if self.block_id.is_empty() {
            return Err(LiteError::InvalidCommit(
                "commit cannot be for an empty block id".to_string(),
            ));
        }
        let first = self
            .first_vote()
            .ok_or_else(|| LiteError::InvalidCommit("no precommits in commit".to_string()))?;

        for (idx, vote) in self.precommits.iter().enumerate() {
            let Some(vote) = vote else {
                continue;
            };
            if vote.height != first.height {
                return Err(LiteError::InvalidCommit(format!(
                    "precommit {} has height {}, expected {}",
                    idx, vote.height, first.height
                )));
            }
            if vote.round != first.round {
                return Err(LiteError::InvalidCommit(format!(
                    "precommit {} has round {}, expected {}",
                    idx, vote.round, first.round
                )));
            }
            if vote.validator_index as usize != idx {
                return Err(LiteError::InvalidCommit(format!(
                    "precommit in slot {} claims validator index {}",
                    idx, vote.validator_index
                )));
            }
        }
        Ok(())
    }
}

/// A signed header: block header plus the precommits attesting to its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Signed header.
    pub header: Header,
    /// Precommits for the header.
    pub signatures: CommitSignatures,
}

impl Commit {
    /// Create a commit.
    pub fn new(header: Header, signatures: CommitSignatures) -> Self {
        Self { header, signatures }
    }

    /// Height of the signed header.
    pub fn height(&self) -> u64 {
        self.header.height
    }

    /// Validator set hash the header expects.
    pub fn validators_hash(&self) -> Hash {
        self.header.validators_hash
    }

    /// Block id the precommits refer to.
    pub fn block_id(&self) -> &BlockId {
        &self.signatures.block_id
    }

    /// Check the commit is well formed for `chain_id`.
    ///
    /// # Errors
    /// - `InvalidCommit` if the chain id differs
    /// - `InvalidCommit` if the precommit height differs from the header height
    /// - `InvalidCommit` if the precommits sign another header
    /// - `InvalidCommit` if the precommits are inconsistent
    pub fn validate_basic(&self, chain_id: &str) -> Result<()> {
        if self.header.chain_id != chain_id {
            return Err(LiteError::InvalidCommit(format!(
                "header belongs to another chain '{}' not '{}'",
                self.header.chain_id, chain_id
            )));
        }
        if self.signatures.height() != self.header.height {
            return Err(LiteError::InvalidCommit(format!(
                "header and commit height mismatch: {} vs {}",
                self.header.height,
                self.signatures.height()
            )));
        }
        let header_hash = self.header.hash();
        if self.signatures.block_id.hash != header_hash {
            return Err(LiteError::InvalidCommit(format!(
                "commit signs block {}, header is block {}",
                hex::encode(self.signatures.block_id.hash),
                hex::encode(header_hash)
            )));
        }
        self.signatures.validate_basic()
    }
}

/// A commit paired with the validator set its header references.
///
/// The atomic unit of storage in every provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullCommit {
    /// Signed header.
    pub commit: Commit,
    /// Validator set that signed it.
    pub validators: ValidatorSet,
}

impl FullCommit {
    /// Pair a commit with its validator set.
    pub fn new(commit: Commit, validators: ValidatorSet) -> Self {
        Self { commit, validators }
    }

    /// Height of the signed header.
    pub fn height(&self) -> u64 {
        self.commit.height()
    }

    /// Validator set hash the header expects.
    pub fn validators_hash(&self) -> Hash {
        self.commit.validators_hash()
    }

    /// Check the commit for `chain_id` and that the validator set is the one it references.
    pub fn validate_basic(&self, chain_id: &str) -> Result<()> {
        let vals_hash = self.validators.hash();
        if self.commit.header.validators_hash != vals_hash {
            return Err(LiteError::InvalidCommit(format!(
                "header has validators hash {}, but validator set hash is {}",
                hex::encode(self.commit.header.validators_hash),
                hex::encode(vals_hash)
            )));
        }
        self.commit.validate_basic(chain_id)
    }

    /// Validate against the chain id the header itself declares.
    pub fn validate_self(&self) -> Result<()> {
        self.validate_basic(&self.commit.header.chain_id)
    }
}
