//! src/services/asset_store.rs
//!
//! Full-collection persistence for assets. A store only knows how to read the
//! whole collection and replace it wholesale; it has no notion of ids, HTTP or
//! validation. `JsonFileStore` is the production backend; `MemoryStore` keeps
//! the serialized bytes in memory so tests can exercise the same decoding
//! policy without touching disk.

use crate::models::asset::Asset;
use async_trait::async_trait;
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use thiserror::Error;
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize assets: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage port used by `AssetService`.
///
/// `load` never fails on missing or unreadable-as-JSON data; both come back as
/// an empty collection. Only genuine I/O failures are reported.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Read the full collection.
    async fn load(&self) -> StoreResult<Vec<Asset>>;

    /// Replace the full collection.
    async fn save(&self, assets: &[Asset]) -> StoreResult<()>;
}

/// Stores the collection as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp file in the same directory, so the final rename never
    /// crosses a filesystem boundary.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "assets".into());
        self.path
            .with_file_name(format!(".{}.tmp-{}", file_name, Uuid::new_v4()))
    }

    async fn write_temp(&self, tmp_path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = File::create(tmp_path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await
    }
}

#[async_trait]
impl AssetStore for JsonFileStore {
    async fn load(&self) -> StoreResult<Vec<Asset>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(decode_collection(&bytes, &self.path.display().to_string())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.path.display());
                Ok(Vec::new())
            }
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    /// Write to a temp file, fsync, then rename over the target. Readers see
    /// either the previous or the new collection, never a truncated file.
    async fn save(&self, assets: &[Asset]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(assets)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.temp_path();
        if let Err(err) = self.write_temp(&tmp_path, &bytes).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io(err));
        }

        if let Err(err) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::Io(err));
        }

        debug!("wrote {} assets to {}", assets.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the serialized collection in memory. Counts saves so callers can
/// check how many full rewrites an operation performed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: Mutex<Option<Vec<u8>>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from arbitrary raw contents, valid JSON or not.
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes.into())),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current raw contents, `None` if nothing was ever written.
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        // Poisoning leaves the bytes intact.
        self.bytes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AssetStore for MemoryStore {
    async fn load(&self) -> StoreResult<Vec<Asset>> {
        Ok(match self.lock().as_deref() {
            Some(bytes) => decode_collection(bytes, "memory store"),
            None => Vec::new(),
        })
    }

    async fn save(&self, assets: &[Asset]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(assets)?;
        *self.lock() = Some(bytes);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Parse a serialized collection, degrading to empty on anything unusable.
///
/// Blank contents are the normal first-run case and only logged at debug;
/// contents that fail to parse are reported at warn since they usually mean
/// the file was damaged or edited by hand.
fn decode_collection(bytes: &[u8], origin: &str) -> Vec<Asset> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        debug!("{} is empty, treating as no assets", origin);
        return Vec::new();
    }

    match serde_json::from_slice::<Vec<Asset>>(bytes) {
        Ok(assets) => assets,
        Err(err) => {
            warn!(
                "{} could not be parsed ({}), treating as no assets",
                origin, err
            );
            Vec::new()
        }
    }
}
