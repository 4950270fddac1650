//! # Lite Crypto
//!
//! Primitives the light-client core consumes but does not define.
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, binary Merkle root | Header, validator-set and block data hashes |
//! | `signatures` | Ed25519 | Validator precommit signatures |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{merkle_root, sha256, sha256_many, Hash, EMPTY_HASH};
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
