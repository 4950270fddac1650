//! # Full Commit Codec
//!
//! Binary (bincode) and JSON encodings of a full commit, and bounded,
//! atomic file I/O on top of them.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

use crate::config::FileEncoding;
use crate::domain::{FullCommit, LiteError, Result};

/// Encode with bincode.
pub fn encode_binary(fc: &FullCommit) -> Result<Vec<u8>> {
    Ok(bincode::serialize(fc)?)
}

/// Decode bincode bytes.
pub fn decode_binary(bytes: &[u8]) -> Result<FullCommit> {
    Ok(bincode::deserialize(bytes)?)
}

/// Encode as JSON.
pub fn encode_json(fc: &FullCommit) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(fc)?)
}

/// Decode JSON bytes.
pub fn decode_json(bytes: &[u8]) -> Result<FullCommit> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encode with the chosen format.
pub fn encode(fc: &FullCommit, encoding: FileEncoding) -> Result<Vec<u8>> {
    match encoding {
        FileEncoding::Binary => encode_binary(fc),
        FileEncoding::Json => encode_json(fc),
    }
}

/// Decode with the chosen format.
pub fn decode(bytes: &[u8], encoding: FileEncoding) -> Result<FullCommit> {
    match encoding {
        FileEncoding::Binary => decode_binary(bytes),
        FileEncoding::Json => decode_json(bytes),
    }
}

/// Write `fc` to `path`.
///
/// Bytes go to a uniquely named sibling first and are renamed into place, so
/// readers never observe a partial file and concurrent writers never share a
/// temporary.
pub async fn save_full_commit(fc: &FullCommit, path: &Path, encoding: FileEncoding) -> Result<()> {
    let bytes = encode(fc, encoding)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| std::io::Error::new(ErrorKind::InvalidInput, "path has no file name"))?;
    let temp_path = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(&bytes).await?;
    file.sync_all().await?;
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }
    Ok(())
}

/// Read a full commit from `path`, reading at most `max_size` bytes.
///
/// # Errors
/// - `CommitNotFound` if the file does not exist
/// - `Encoding` if the file is larger than `max_size` or fails to decode
pub async fn load_full_commit(
    path: &Path,
    encoding: FileEncoding,
    max_size: u64,
) -> Result<FullCommit> {
    let file = match fs::File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(LiteError::CommitNotFound),
        Err(e) => return Err(e.into()),
    };

    let mut bytes = Vec::new();
    file.take(max_size.saturating_add(1)).read_to_end(&mut bytes).await?;
    if bytes.len() as u64 > max_size {
        return Err(LiteError::Encoding(format!(
            "{} exceeds {} bytes",
            path.display(),
            max_size
        )));
    }

    decode(&bytes, encoding)
}
