//! # Domain Module
//!
//! Core types for light-client verification: commits, validator sets,
//! blocks, errors and invariants.

pub mod block;
pub mod commit;
pub mod errors;
pub mod invariants;
pub mod validator;

pub use block::*;
pub use commit::*;
pub use errors::*;
pub use invariants::*;
pub use validator::*;

pub use lite_crypto::Hash;
