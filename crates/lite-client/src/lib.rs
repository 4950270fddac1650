//! # Lite Client
//!
//! Header verification for light clients of a BFT chain.
//!
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! Decide whether a signed header (a [`Commit`]) is trustworthy given a
//! previously trusted validator set, and move that trust forward as the
//! validator set evolves:
//! - [`StaticVerifier`] checks commits against one fixed set
//! - [`DynamicVerifier`] accepts set transitions signed by >2/3 of both sets
//! - [`InquiringVerifier`] fetches missing sets and bisects large gaps
//!
//! Trusted and candidate full commits live behind the [`Provider`] port:
//! in memory, on disk, layered in a cache, or read from a full node.
//!
//! ## Module Structure
//!
//! ```text
//! lite-client/
//! ├── domain/          # Commit, FullCommit, ValidatorSet, errors, constants
//! ├── algorithms/      # Height search, bisection midpoint, proxy validation
//! ├── ports/           # Certifier (inbound), Provider + NodeClient (outbound)
//! ├── adapters/        # Memory, file, cache and RPC providers, codec
//! ├── application/     # Static, dynamic and inquiring verifiers
//! └── config.rs        # LiteClientConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-exports
pub use adapters::{CacheProvider, FileProvider, MemoryProvider, RpcProvider};
pub use algorithms::{validate_block, validate_block_meta, validate_header};
pub use application::{DynamicVerifier, InquiringVerifier, StaticVerifier};
pub use config::{FileEncoding, LiteClientConfig};
pub use domain::{
    Block, BlockId, BlockMeta, Commit, CommitSignatures, FullCommit, Hash, Header, LiteError,
    Result, Validator, ValidatorSet, Vote,
};
pub use ports::{Certifier, MockNode, NodeClient, NodeStatus, Provider, ValidatorsAtHeight};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
