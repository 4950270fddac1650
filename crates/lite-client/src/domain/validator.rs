//! # Validator Sets
//!
//! Ordered validators with voting power, and the two supermajority checks
//! every verifier is built on.

use std::collections::HashSet;
use std::sync::OnceLock;

use lite_crypto::{merkle_root, sha256_many, Ed25519PublicKey, Hash};
use serde::{Deserialize, Serialize};

use super::commit::{Address, BlockId, CommitSignatures};
use super::errors::{LiteError, Result};
use super::invariants::{has_supermajority, MAX_TOTAL_VOTING_POWER};

/// A single validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// Address derived from the public key.
    pub address: Address,
    /// Ed25519 public key.
    pub pub_key: Ed25519PublicKey,
    /// Voting power.
    pub voting_power: u64,
}

impl Validator {
    /// Create a validator, deriving its address from the key.
    pub fn new(pub_key: Ed25519PublicKey, voting_power: u64) -> Self {
        Self {
            address: pub_key.address(),
            pub_key,
            voting_power,
        }
    }

    /// Leaf hash used in the validator set Merkle tree.
    pub fn hash(&self) -> Hash {
        sha256_many(&[
            &self.address,
            self.pub_key.as_bytes(),
            &self.voting_power.to_be_bytes(),
        ])
    }
}

/// Validators sorted by address.
///
/// The set hash is computed on first use and cached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidatorSet {
    validators: Vec<Validator>,
    #[serde(skip)]
    hash: OnceLock<Hash>,
}

impl PartialEq for ValidatorSet {
    fn eq(&self, other: &Self) -> bool {
        self.validators == other.validators
    }
}

impl Eq for ValidatorSet {}

impl ValidatorSet {
    /// Create a set; validators are sorted by address.
    pub fn new(mut validators: Vec<Validator>) -> Self {
        validators.sort_by(|a, b| a.address.cmp(&b.address));
        Self {
            validators,
            hash: OnceLock::new(),
        }
    }

    /// Validators in address order.
    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    /// Number of validators.
    pub fn size(&self) -> usize {
        self.validators.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Sum of all voting power.
    ///
    /// # Errors
    /// - `InvalidCommit` if the sum exceeds [`MAX_TOTAL_VOTING_POWER`]
    pub fn total_voting_power(&self) -> Result<u64> {
        self.validators
            .iter()
            .try_fold(0u64, |acc, v| add_power(acc, v.voting_power))
    }

    /// Merkle root over validator hashes.
    pub fn hash(&self) -> Hash {
        *self.hash.get_or_init(|| {
            let leaves: Vec<Hash> = self.validators.iter().map(Validator::hash).collect();
            merkle_root(&leaves)
        })
    }

    /// Look up a validator and its index by address.
    pub fn get_by_address(&self, address: &Address) -> Option<(usize, &Validator)> {
        self.validators
            .binary_search_by(|v| v.address.cmp(address))
            .ok()
            .map(|idx| (idx, &self.validators[idx]))
    }

    /// Look up a validator by index.
    pub fn get_by_index(&self, index: usize) -> Option<&Validator> {
        self.validators.get(index)
    }

    /// Verify that strictly more than 2/3 of this set's voting power signed `block_id`.
    ///
    /// Every present precommit must carry a valid signature from the validator
    /// in its slot, even if it voted for another block.
    pub fn verify_commit(
        &self,
        chain_id: &str,
        block_id: &BlockId,
        height: u64,
        signatures: &CommitSignatures,
    ) -> Result<()> {
        if self.size() != signatures.size() {
            return Err(LiteError::InvalidCommit(format!(
                "wrong set size: {} vs {}",
                self.size(),
                signatures.size()
            )));
        }
        if height != signatures.height() {
            return Err(LiteError::InvalidCommit(format!(
                "wrong height: {} vs {}",
                height,
                signatures.height()
            )));
        }

        let total = self.total_voting_power()?;
        let round = signatures.round();
        let mut tallied: u64 = 0;

        for (idx, precommit) in signatures.precommits.iter().enumerate() {
            let Some(vote) = precommit else {
                continue;
            };
            if vote.height != height || vote.round != round {
                return Err(LiteError::InvalidCommit(format!(
                    "precommit {} is for height {} round {}, expected {} round {}",
                    idx, vote.height, vote.round, height, round
                )));
            }
            let val = &self.validators[idx];
            if vote.validator_address != val.address {
                return Err(LiteError::InvalidCommit(format!(
                    "precommit {} is not from the validator in that slot",
                    idx
                )));
            }
            val.pub_key.verify(&vote.sign_bytes(chain_id), &vote.signature)?;

            if vote.block_id != *block_id {
                continue;
            }
            tallied = add_power(tallied, val.voting_power)?;
        }

        if has_supermajority(tallied, total) {
            Ok(())
        } else {
            Err(LiteError::InvalidCommit(format!(
                "insufficient voting power: got {}, needed more than {}",
                tallied,
                total * 2 / 3
            )))
        }
    }

    /// Verify a commit signed by `new_set` also carries more than 2/3 of this set.
    ///
    /// Signers are matched to this set by address; power counts toward the
    /// new set only when the new set holds the same key in the signer's slot.
    /// Unknown and repeated signers are skipped.
    pub fn verify_commit_any(
        &self,
        new_set: &ValidatorSet,
        chain_id: &str,
        block_id: &BlockId,
        height: u64,
        signatures: &CommitSignatures,
    ) -> Result<()> {
        if new_set.size() != signatures.size() {
            return Err(LiteError::InvalidCommit(format!(
                "wrong set size: {} vs {}",
                new_set.size(),
                signatures.size()
            )));
        }
        if height != signatures.height() {
            return Err(LiteError::InvalidCommit(format!(
                "wrong height: {} vs {}",
                height,
                signatures.height()
            )));
        }

        let old_total = self.total_voting_power()?;
        let new_total = new_set.total_voting_power()?;
        let round = signatures.round();
        let mut old_power: u64 = 0;
        let mut new_power: u64 = 0;
        let mut seen = HashSet::new();

        for (idx, precommit) in signatures.precommits.iter().enumerate() {
            let Some(vote) = precommit else {
                continue;
            };
            if vote.height != height || vote.round != round {
                return Err(LiteError::InvalidCommit(format!(
                    "precommit {} is for height {} round {}, expected {} round {}",
                    idx, vote.height, vote.round, height, round
                )));
            }
            if vote.block_id != *block_id {
                continue;
            }

            let Some((old_idx, old_val)) = self.get_by_address(&vote.validator_address) else {
                continue;
            };
            if !seen.insert(old_idx) {
                continue;
            }

            old_val
                .pub_key
                .verify(&vote.sign_bytes(chain_id), &vote.signature)?;
            old_power = add_power(old_power, old_val.voting_power)?;

            if let Some(new_val) = new_set.get_by_index(idx) {
                if new_val.pub_key == old_val.pub_key {
                    new_power = add_power(new_power, new_val.voting_power)?;
                }
            }
        }

        if !has_supermajority(old_power, old_total) {
            return Err(LiteError::InvalidCommit(format!(
                "insufficient old voting power: got {}, needed more than {}",
                old_power,
                old_total * 2 / 3
            )));
        }
        if !has_supermajority(new_power, new_total) {
            return Err(LiteError::InvalidCommit(format!(
                "insufficient new voting power: got {}, needed more than {}",
                new_power,
                new_total * 2 / 3
            )));
        }
        Ok(())
    }
}

/// Add voting power, refusing sums past [`MAX_TOTAL_VOTING_POWER`].
fn add_power(acc: u64, power: u64) -> Result<u64> {
    acc.checked_add(power)
        .filter(|sum| *sum <= MAX_TOTAL_VOTING_POWER)
        .ok_or_else(|| {
            LiteError::InvalidCommit(format!(
                "total voting power exceeds {}",
                MAX_TOTAL_VOTING_POWER
            ))
        })
}
