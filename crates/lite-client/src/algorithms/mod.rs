//! # Algorithms Module
//!
//! Pure functions: height search over ordered commits and proxy checks of
//! node responses against verified commits.

pub mod height_search;
pub mod proxy_validate;

pub use height_search::{bisection_midpoint, search_binary, search_linear};
pub use proxy_validate::{validate_block, validate_block_meta, validate_header};
