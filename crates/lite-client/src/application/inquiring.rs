//! # Inquiring Verifier
//!
//! A dynamic verifier that fetches the full commits it needs.
//!
//! Every trusted full commit lands in the `trusted` provider. When a commit
//! arrives signed by an unknown set, the verifier asks the `source` provider
//! for that set and walks towards it, bisecting the height range whenever a
//! single step changes too much.
//!
//! ## Bisection
//!
//! ```text
//! trusted@40 ──────────────────────────────▶ target@100   TooMuchChange
//! trusted@40 ─────────────▶ mid@70                        ok
//!                           trusted@70 ────▶ target@100   ok
//! ```

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::algorithms::bisection_midpoint;
use crate::application::DynamicVerifier;
use crate::domain::{Commit, FullCommit, Hash, LiteError, Result, ValidatorSet};
use crate::ports::{Certifier, Provider};

/// Verifier that consults a trusted store and an untrusted source.
pub struct InquiringVerifier {
    cert: DynamicVerifier,
    trusted: Arc<dyn Provider>,
    source: Arc<dyn Provider>,
}

impl InquiringVerifier {
    /// Seed trust with `seed` and remember it in `trusted`.
    ///
    /// # Errors
    /// - `InvalidCommit` if `seed` is malformed or belongs to another chain
    /// - Any error from storing the seed
    pub async fn new(
        chain_id: impl Into<String>,
        seed: FullCommit,
        trusted: Arc<dyn Provider>,
        source: Arc<dyn Provider>,
    ) -> Result<Self> {
        let chain_id = chain_id.into();
        seed.validate_basic(&chain_id)?;
        trusted.store_commit(&seed).await?;

        info!(
            "[lite] Inquiring verifier for {} seeded at height {}",
            chain_id,
            seed.height()
        );

        Ok(Self {
            cert: DynamicVerifier::new(chain_id, seed.validators, seed.commit.header.height),
            trusted,
            source,
        })
    }

    /// Chain this verifier accepts commits for.
    pub fn chain_id(&self) -> &str {
        self.cert.chain_id()
    }

    /// Currently trusted validator set.
    pub fn validators(&self) -> &ValidatorSet {
        self.cert.validators()
    }

    /// Hash of the currently trusted set.
    pub fn validators_hash(&self) -> Hash {
        self.cert.validators_hash()
    }

    /// Height of the currently trusted set.
    pub fn last_height(&self) -> u64 {
        self.cert.last_height()
    }

    /// Store of trusted full commits.
    pub fn trusted(&self) -> &Arc<dyn Provider> {
        &self.trusted
    }

    /// Source of candidate full commits.
    pub fn source(&self) -> &Arc<dyn Provider> {
        &self.source
    }

    /// Accept `commit`, fetching and validating intermediate sets if it was
    /// signed by a set other than the trusted one.
    ///
    /// On success the commit and its set are stored in `trusted`.
    pub async fn certify(&mut self, commit: &Commit) -> Result<()> {
        self.use_closest_trust(commit.height()).await?;

        match self.cert.certify(commit) {
            Ok(()) => {}
            Err(LiteError::ValidatorsChanged) => {
                debug!(
                    "[lite] Commit at height {} signed by an unknown set",
                    commit.height()
                );
                self.update_to_hash(&commit.validators_hash()).await?;
                self.cert.certify(commit)?;
            }
            Err(e) => return Err(e),
        }

        let fc = FullCommit::new(commit.clone(), self.cert.validators().clone());
        self.trusted.store_commit(&fc).await
    }

    /// Move trust to `fc` from the closest trusted commit below it, then
    /// store it in `trusted`.
    pub async fn update(&mut self, fc: &FullCommit) -> Result<()> {
        self.use_closest_trust(fc.height()).await?;
        self.cert.update(fc)?;
        self.trusted.store_commit(fc).await
    }

    /// Realign with the highest trusted commit at or below `height`.
    async fn use_closest_trust(&mut self, height: u64) -> Result<()> {
        let closest = self.trusted.get_by_height(height).await?;
        if closest.height() != self.cert.last_height() {
            debug!(
                "[lite] Realigning trust from height {} to {}",
                self.cert.last_height(),
                closest.height()
            );
            self.cert = DynamicVerifier::new(
                self.cert.chain_id().to_string(),
                closest.validators,
                closest.commit.header.height,
            );
        }
        Ok(())
    }

    /// Adopt the validator set with `hash`, bisecting if one step is too far.
    async fn update_to_hash(&mut self, hash: &Hash) -> Result<()> {
        let fc = self.source.get_by_hash(hash).await?;
        match self.cert.update(&fc) {
            Err(LiteError::TooMuchChange) => {
                warn!(
                    "[lite] Direct update to height {} changed too much, bisecting",
                    fc.height()
                );
                self.update_to_height(fc.height()).await
            }
            other => other,
        }
    }

    /// Advance trust to the source's commit at `height`.
    ///
    /// Targets form a stack: a step that changes too much pushes the
    /// midpoint, and a step that succeeds pops back to the previous target.
    async fn update_to_height(&mut self, height: u64) -> Result<()> {
        let mut targets = vec![height];

        while let Some(&target) = targets.last() {
            let fc = self.source.get_by_height(target).await?;
            let (start, end) = (self.cert.last_height(), fc.height());
            if end <= start {
                return Err(LiteError::NoPathFound);
            }

            match self.update(&fc).await {
                Ok(()) => {
                    targets.pop();
                }
                Err(LiteError::TooMuchChange) => {
                    let mid = bisection_midpoint(start, end);
                    debug!("[lite] Bisecting {}..{} at {}", start, end, mid);
                    targets.push(mid);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
