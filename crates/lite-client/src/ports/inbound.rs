//! # Inbound Ports
//!
//! What a verifier offers its caller.

use crate::domain::{Commit, Result};

/// Decides whether a commit is acceptable under a verifier's trusted set.
///
/// Implemented by the static and dynamic verifiers. The inquiring verifier
/// offers the same operations asynchronously because it consults providers.
pub trait Certifier {
    /// Chain this verifier accepts commits for.
    fn chain_id(&self) -> &str;

    /// Accept or reject `commit`.
    fn certify(&mut self, commit: &Commit) -> Result<()>;
}
