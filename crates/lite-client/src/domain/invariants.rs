//! # Domain Invariants
//!
//! Constants and voting rules that must always hold.

/// Memory provider answers height queries with a linear scan up to this
/// many stored commits and with binary search above it.
pub const LINEAR_SEARCH_THRESHOLD: usize = 50;

/// Upper bound on bytes read for one stored full commit (1 MiB).
pub const MAX_FULL_COMMIT_SIZE: u64 = 1024 * 1024;

/// Height used by the file provider to answer "latest".
///
/// Kept at `i32::MAX - 1` for compatibility with checkpoint directories
/// written by earlier deployments. Heights past this bound are not reachable
/// through `latest_commit` and will need a migration (expected around 2077
/// at one block per second).
pub const LATEST_HEIGHT_BOUND: u64 = i32::MAX as u64 - 1;

/// Ceiling on a validator set's total voting power.
///
/// Leaves headroom for tallies and the 2/3 threshold to stay in `u64`.
pub const MAX_TOTAL_VOTING_POWER: u64 = i64::MAX as u64 / 8;

/// Zero-padded width of checkpoint file names.
pub const HEIGHT_PAD_WIDTH: usize = 12;

/// Heights at or above this value do not fit the padded checkpoint names.
pub const MAX_FILE_HEIGHT: u64 = 1_000_000_000_000;

/// Extension shared by all stored full commit files.
pub const FILE_EXT: &str = "tsd";

/// Invariant: supermajority is strictly more than two thirds of `total`.
///
/// Evaluated as `3 * power > 2 * total` in 128-bit arithmetic, which is
/// exactly `power > total * 2 / 3` under integer division.
pub fn has_supermajority(power: u64, total: u64) -> bool {
    (power as u128) * 3 > (total as u128) * 2
}
