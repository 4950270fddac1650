//! # Lite Client Test Suite
//!
//! End-to-end flows across verifiers and providers.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── verifier_flows.rs   # Static, dynamic and inquiring verification
//!     └── provider_flows.rs   # Memory, file, cache and RPC providers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p lite-tests
//!
//! # By category
//! cargo test -p lite-tests integration::verifier_flows::
//! cargo test -p lite-tests integration::provider_flows::
//!
//! # With logs
//! RUST_LOG=lite_client=debug cargo test -p lite-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
