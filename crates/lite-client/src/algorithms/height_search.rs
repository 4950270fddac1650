//! # Height Search
//!
//! Two ways to find the entry with the greatest height at or below a query
//! in a height-ordered slice. Both must return the same entry for every
//! query; the memory provider picks one by size.

use std::cmp::Ordering;

/// Scan from the top for the first entry with height `<= height`.
///
/// # Time Complexity: O(n)
pub fn search_linear<T>(sorted: &[T], height: u64, key: impl Fn(&T) -> u64) -> Option<&T> {
    sorted.iter().rev().find(|item| key(item) <= height)
}

/// Binary search for an exact match, else the greatest height below `height`.
///
/// # Time Complexity: O(log n)
pub fn search_binary<T>(sorted: &[T], height: u64, key: impl Fn(&T) -> u64) -> Option<&T> {
    let (mut low, mut high) = (0usize, sorted.len());

    while low < high {
        // Avoid an overflow: `low + high` can exceed the index range.
        let mid = low + (high - low) / 2;
        match key(&sorted[mid]).cmp(&height) {
            Ordering::Equal => return Some(&sorted[mid]),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }

    // `low` is now the first entry above `height`.
    low.checked_sub(1).map(|i| &sorted[i])
}

/// Midpoint of a bisection step, `floor((start + end) / 2)` for `start <= end`.
pub fn bisection_midpoint(start: u64, end: u64) -> u64 {
    // Avoid an overflow near the top of the height range.
    start + (end - start) / 2
}
