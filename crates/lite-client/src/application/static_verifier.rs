//! # Static Verifier
//!
//! Accepts commits signed by one fixed validator set.

use crate::domain::{Commit, Hash, LiteError, Result, ValidatorSet};
use crate::ports::Certifier;

/// Verifier bound to a chain and a validator set that never changes.
#[derive(Clone, Debug)]
pub struct StaticVerifier {
    chain_id: String,
    validators: ValidatorSet,
}

impl StaticVerifier {
    /// Trust `validators` on `chain_id`.
    pub fn new(chain_id: impl Into<String>, validators: ValidatorSet) -> Self {
        Self {
            chain_id: chain_id.into(),
            validators,
        }
    }

    /// Trusted validator set.
    pub fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    /// Hash of the trusted validator set.
    pub fn validators_hash(&self) -> Hash {
        self.validators.hash()
    }

    /// Check `commit` without mutating anything.
    ///
    /// # Errors
    /// - `InvalidCommit` if the commit is malformed or lacks >2/3 of the power
    /// - `ValidatorsChanged` if the header references another validator set
    pub fn verify(&self, commit: &Commit) -> Result<()> {
        commit.validate_basic(&self.chain_id)?;

        if self.validators_hash() != commit.validators_hash() {
            return Err(LiteError::ValidatorsChanged);
        }

        self.validators.verify_commit(
            &self.chain_id,
            commit.block_id(),
            commit.height(),
            &commit.signatures,
        )
    }
}

impl Certifier for StaticVerifier {
    fn chain_id(&self) -> &str {
        &self.chain_id
    }

    fn certify(&mut self, commit: &Commit) -> Result<()> {
        self.verify(commit)
    }
}
