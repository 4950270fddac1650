//! # Proxy Validation
//!
//! Cross-checks of header, block and block-meta responses against a commit
//! the caller has already verified. Pure checks, no I/O.

use crate::domain::{Block, BlockMeta, Commit, Header, LiteError, Result};

/// Check `header` is the header `commit` signed.
///
/// # Errors
/// - `InvalidBlock` if the header is missing
/// - `HeightMismatch` if the heights differ
/// - `InvalidBlock` if the header hashes differ
pub fn validate_header(header: Option<&Header>, commit: &Commit) -> Result<()> {
    let header =
        header.ok_or_else(|| LiteError::InvalidBlock("expecting a non-nil Header".to_string()))?;

    if header.height != commit.height() {
        return Err(LiteError::HeightMismatch {
            header: header.height,
            commit: commit.height(),
        });
    }

    if header.hash() != commit.header.hash() {
        return Err(LiteError::InvalidBlock("headers don't match".to_string()));
    }
    Ok(())
}

/// Check `block` carries the verified header and data matching its data hash.
pub fn validate_block(block: Option<&Block>, commit: &Commit) -> Result<()> {
    let block =
        block.ok_or_else(|| LiteError::InvalidBlock("expecting a non-nil Block".to_string()))?;

    validate_header(Some(&block.header), commit)?;

    if block.data.hash() != block.header.data_hash {
        return Err(LiteError::InvalidBlock(
            "data hash doesn't match header".to_string(),
        ));
    }
    Ok(())
}

/// Check `meta` carries the verified header.
pub fn validate_block_meta(meta: Option<&BlockMeta>, commit: &Commit) -> Result<()> {
    let meta = meta
        .ok_or_else(|| LiteError::InvalidBlock("expecting a non-nil BlockMeta".to_string()))?;
    validate_header(Some(&meta.header), commit)
}
