//! # Integration Flows

pub mod provider_flows;
pub mod verifier_flows;
