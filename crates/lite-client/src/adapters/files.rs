//! # File Provider
//!
//! Full commits persisted under a root directory:
//!
//! ```text
//! <root>/
//! ├── checkpoints/000000000040.tsd   (by height, zero-padded)
//! └── validators/<hex hash>.tsd      (by validator-set hash)
//! ```
//!
//! Height lookups try the exact file first and fall back to a sorted listing
//! of `checkpoints/`. Padding keeps lexicographic and numeric order equal for
//! heights below 10^12, so larger heights are refused on store.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::adapters::codec::{load_full_commit, save_full_commit};
use crate::config::{FileEncoding, LiteClientConfig};
use crate::domain::{
    FullCommit, Hash, LiteError, Result, FILE_EXT, HEIGHT_PAD_WIDTH, MAX_FILE_HEIGHT,
};
use crate::ports::Provider;

const VALIDATORS_DIR: &str = "validators";
const CHECKPOINTS_DIR: &str = "checkpoints";

/// On-disk [`Provider`].
#[derive(Debug, Clone)]
pub struct FileProvider {
    val_dir: PathBuf,
    check_dir: PathBuf,
    encoding: FileEncoding,
    max_full_commit_size: u64,
    latest_height_bound: u64,
}

impl FileProvider {
    /// Open (or create) a store under `root` with default settings.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(root, &LiteClientConfig::default()).await
    }

    /// Open (or create) a store under `root`.
    pub async fn with_config(root: impl AsRef<Path>, config: &LiteClientConfig) -> Result<Self> {
        let root = root.as_ref();
        let val_dir = root.join(VALIDATORS_DIR);
        let check_dir = root.join(CHECKPOINTS_DIR);
        create_dir(&val_dir).await?;
        create_dir(&check_dir).await?;

        info!("[lite] File provider opened at {}", root.display());

        Ok(Self {
            val_dir,
            check_dir,
            encoding: config.file_encoding,
            max_full_commit_size: config.max_full_commit_size,
            latest_height_bound: config.latest_height_bound,
        })
    }

    /// Path of the by-hash file for `hash`.
    pub fn hash_path(&self, hash: &Hash) -> PathBuf {
        self.val_dir.join(encode_hash(hash))
    }

    /// Path of the by-height file for `height`.
    pub fn height_path(&self, height: u64) -> PathBuf {
        self.check_dir.join(encode_height(height))
    }

    async fn load(&self, path: &Path) -> Result<FullCommit> {
        load_full_commit(path, self.encoding, self.max_full_commit_size).await
    }

    /// Checkpoint file with the greatest height `<= height`.
    async fn search_for_height(&self, height: u64) -> Result<PathBuf> {
        let mut entries = fs::read_dir(&self.check_dir).await?;
        let suffix = format!(".{}", FILE_EXT);

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Ok(name) = entry.file_name().into_string() {
                // Skips in-flight temporaries, which end in `.tmp`.
                if name.ends_with(&suffix) && !name.starts_with('.') {
                    files.push(name);
                }
            }
        }
        files.sort();

        let desired = encode_height(height);
        match files.partition_point(|name| name.as_str() < desired.as_str()) {
            0 => Err(LiteError::CommitNotFound),
            i => Ok(self.check_dir.join(&files[i - 1])),
        }
    }
}

#[async_trait]
impl Provider for FileProvider {
    async fn store_commit(&self, fc: &FullCommit) -> Result<()> {
        fc.validate_self()?;
        if fc.height() >= MAX_FILE_HEIGHT {
            return Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("height {} does not fit a checkpoint name", fc.height()),
            )
            .into());
        }

        save_full_commit(fc, &self.height_path(fc.height()), self.encoding).await?;
        save_full_commit(fc, &self.hash_path(&fc.validators_hash()), self.encoding).await?;

        debug!("[lite] Stored commit at height {} on disk", fc.height());
        Ok(())
    }

    async fn get_by_height(&self, height: u64) -> Result<FullCommit> {
        // Nothing is stored at or above the limit.
        let height = height.min(MAX_FILE_HEIGHT - 1);
        match self.load(&self.height_path(height)).await {
            Err(LiteError::CommitNotFound) => {
                let path = self.search_for_height(height).await?;
                self.load(&path).await
            }
            other => other,
        }
    }

    async fn get_by_hash(&self, hash: &Hash) -> Result<FullCommit> {
        self.load(&self.hash_path(hash)).await
    }

    async fn latest_commit(&self) -> Result<FullCommit> {
        self.get_by_height(self.latest_height_bound).await
    }
}

async fn create_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder.create(dir).await?;
    Ok(())
}

fn encode_hash(hash: &Hash) -> String {
    format!("{}.{}", hex::encode(hash), FILE_EXT)
}

fn encode_height(height: u64) -> String {
    format!("{:0width$}.{}", height, FILE_EXT, width = HEIGHT_PAD_WIDTH)
}
