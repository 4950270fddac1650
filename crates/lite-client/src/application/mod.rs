//! # Application Layer
//!
//! The three verifiers, each building on the previous one.

pub mod dynamic;
pub mod inquiring;
pub mod static_verifier;

pub use dynamic::DynamicVerifier;
pub use inquiring::InquiringVerifier;
pub use static_verifier::StaticVerifier;
