//! # Dynamic Verifier
//!
//! A static verifier whose trusted set can be replaced by a later full
//! commit, provided the transition is signed by more than 2/3 of both the
//! current set and the new one.

use tracing::{debug, info};

use crate::application::StaticVerifier;
use crate::domain::{Commit, FullCommit, Hash, LiteError, Result, ValidatorSet};
use crate::ports::Certifier;

/// Verifier that advances its trusted set one validated transition at a time.
#[derive(Clone, Debug)]
pub struct DynamicVerifier {
    cert: StaticVerifier,
    last_height: u64,
}

impl DynamicVerifier {
    /// Trust `validators` as of `height`.
    pub fn new(chain_id: impl Into<String>, validators: ValidatorSet, height: u64) -> Self {
        Self {
            cert: StaticVerifier::new(chain_id, validators),
            last_height: height,
        }
    }

    /// Currently trusted validator set.
    pub fn validators(&self) -> &ValidatorSet {
        self.cert.validators()
    }

    /// Hash of the currently trusted set.
    pub fn validators_hash(&self) -> Hash {
        self.cert.validators_hash()
    }

    /// Highest height verified so far.
    pub fn last_height(&self) -> u64 {
        self.last_height
    }

    /// Replace the trusted set with `fc.validators`.
    ///
    /// # Errors
    /// - `PastTime` if `fc` is not above the last verified height
    /// - `InvalidCommit` if `fc` fails basic validation
    /// - `TooMuchChange` if the commit lacks >2/3 of either set
    ///
    /// On error nothing changes.
    pub fn update(&mut self, fc: &FullCommit) -> Result<()> {
        if fc.height() <= self.last_height {
            return Err(LiteError::PastTime {
                height: fc.height(),
                last_height: self.last_height,
            });
        }

        let chain_id = self.cert.chain_id().to_string();
        fc.validate_basic(&chain_id)?;

        self.cert
            .validators()
            .verify_commit_any(
                &fc.validators,
                &chain_id,
                fc.commit.block_id(),
                fc.height(),
                &fc.commit.signatures,
            )
            .map_err(|e| {
                debug!("[lite] Transition to height {} rejected: {}", fc.height(), e);
                LiteError::TooMuchChange
            })?;

        self.cert = StaticVerifier::new(chain_id, fc.validators.clone());
        self.last_height = fc.height();

        info!(
            "[lite] Trusted validators advanced to height {} ({} validators)",
            self.last_height,
            self.cert.validators().size()
        );
        Ok(())
    }
}

impl Certifier for DynamicVerifier {
    fn chain_id(&self) -> &str {
        self.cert.chain_id()
    }

    /// Certify with the trusted set and raise the last height if needed.
    fn certify(&mut self, commit: &Commit) -> Result<()> {
        self.cert.certify(commit)?;
        self.last_height = self.last_height.max(commit.height());
        Ok(())
    }
}
