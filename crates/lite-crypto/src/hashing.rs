//! # SHA-256 Hashing
//!
//! One-shot hashing and the binary Merkle root shared by headers,
//! validator sets and block data.

use sha2::{Digest, Sha256};

/// SHA-256 output (256-bit).
pub type Hash = [u8; 32];

/// Root of an empty tree.
pub const EMPTY_HASH: Hash = [0u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    let result = Sha256::digest(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple inputs as one stream.
pub fn sha256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for input in inputs {
        hasher.update(input);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash two nodes together.
fn hash_concat(left: &Hash, right: &Hash) -> Hash {
    sha256_many(&[left, right])
}

/// Build a binary Merkle tree over `leaves` and return its root.
///
/// An odd node at the end of a level is paired with itself. The root of an
/// empty tree is [`EMPTY_HASH`] and the root of one leaf is the leaf.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return EMPTY_HASH;
    }

    let mut level: Vec<Hash> = leaves.to_vec();

    while level.len() > 1 {
        let mut next_level = Vec::with_capacity((level.len() + 1) / 2);

        for chunk in level.chunks(2) {
            let left = &chunk[0];
            let right = chunk.get(1).unwrap_or(left);
            next_level.push(hash_concat(left, right));
        }

        level = next_level;
    }

    level[0]
}
