//! # Domain Errors
//!
//! Error taxonomy shared by verifiers and providers.
//!
//! Six kinds are structured and meant to be branched on. Everything else
//! (I/O, encoding, signature scheme, transport) passes through opaquely.

use lite_crypto::CryptoError;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LiteError>;

/// Light-client verification errors.
#[derive(Debug, Error)]
pub enum LiteError {
    /// Provider has no entry for the requested height or hash.
    #[error("Commit not found")]
    CommitNotFound,

    /// Commit was signed by a validator set other than the trusted one.
    #[error("Validators differ from the trusted set")]
    ValidatorsChanged,

    /// Transition lacks >2/3 approval from the trusted set or the new set.
    #[error("Too much change in the validator set")]
    TooMuchChange,

    /// Transition height is not above the last verified height.
    #[error("Update height {height} is not past the last verified height {last_height}")]
    PastTime {
        /// Height of the rejected update.
        height: u64,
        /// Last verified height at the time of rejection.
        last_height: u64,
    },

    /// Bisection could not bridge the gap to the requested height.
    #[error("No path found to the requested height")]
    NoPathFound,

    /// Two artefacts disagree on block height.
    #[error("Height mismatch: header {header} != commit {commit}")]
    HeightMismatch {
        /// Height of the checked header.
        header: u64,
        /// Height of the verified commit.
        commit: u64,
    },

    /// Commit failed basic validation or signature verification.
    #[error("Invalid commit: {0}")]
    InvalidCommit(String),

    /// Block or block meta does not match the verified commit.
    #[error("Invalid block: {0}")]
    InvalidBlock(String),

    /// Signature scheme failure.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary or JSON (de)serialization failure.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Remote node failure.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl LiteError {
    /// True for [`LiteError::CommitNotFound`].
    pub fn is_commit_not_found(&self) -> bool {
        matches!(self, LiteError::CommitNotFound)
    }

    /// True for [`LiteError::ValidatorsChanged`].
    pub fn is_validators_changed(&self) -> bool {
        matches!(self, LiteError::ValidatorsChanged)
    }

    /// True for [`LiteError::TooMuchChange`].
    pub fn is_too_much_change(&self) -> bool {
        matches!(self, LiteError::TooMuchChange)
    }

    /// True for [`LiteError::PastTime`].
    pub fn is_past_time(&self) -> bool {
        matches!(self, LiteError::PastTime { .. })
    }

    /// True for [`LiteError::NoPathFound`].
    pub fn is_no_path_found(&self) -> bool {
        matches!(self, LiteError::NoPathFound)
    }

    /// True for [`LiteError::HeightMismatch`].
    pub fn is_height_mismatch(&self) -> bool {
        matches!(self, LiteError::HeightMismatch { .. })
    }
}

impl From<bincode::Error> for LiteError {
    fn from(err: bincode::Error) -> Self {
        LiteError::Encoding(err.to_string())
    }
}

impl From<serde_json::Error> for LiteError {
    fn from(err: serde_json::Error) -> Self {
        LiteError::Encoding(err.to_string())
    }
}
