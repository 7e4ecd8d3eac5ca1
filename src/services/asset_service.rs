//! src/services/asset_service.rs
//!
//! AssetService: list/get/create/update/delete over an `AssetStore`.
//!
//! Every operation reloads the full collection; every mutation writes it back
//! in full. There is no cache between calls. Mutations hold a service-wide
//! lock across the whole load → modify → save sequence so concurrent requests
//! cannot overwrite each other's changes.

use crate::{
    models::asset::{Asset, AssetPatch, NewAsset, TIMESTAMP_FORMAT},
    services::asset_store::{AssetStore, StoreError},
};
use chrono::Local;
use std::{fmt, sync::Arc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset {0} not found")]
    NotFound(u64),
    #[error("asset payload is missing a name or status")]
    InvalidInput,
    #[error("no asset id left after {0}")]
    IdsExhausted(u64),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AssetResult<T> = Result<T, AssetError>;

/// Source of timestamps for `created_at` / `updated_at`.
pub trait Clock: Send + Sync {
    /// Current time rendered with [`TIMESTAMP_FORMAT`].
    fn now(&self) -> String;
}

/// Wall clock in local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

#[derive(Clone)]
pub struct AssetService {
    store: Arc<dyn AssetStore>,
    clock: Arc<dyn Clock>,
    /// Serializes mutations. Shared by every clone handed to handlers.
    write_lock: Arc<Mutex<()>>,
}

impl fmt::Debug for AssetService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetService").finish_non_exhaustive()
    }
}

impl AssetService {
    pub fn new(store: Arc<dyn AssetStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn AssetStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All assets in stored order.
    pub async fn list(&self) -> AssetResult<Vec<Asset>> {
        let assets = self.store.load().await?;
        debug!("listing {} assets", assets.len());
        Ok(assets)
    }

    /// First asset with the given id.
    pub async fn get(&self, id: u64) -> AssetResult<Asset> {
        let assets = self.store.load().await?;
        assets
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(AssetError::NotFound(id))
    }

    /// Validate `input`, assign `max(id) + 1` and persist the new asset.
    pub async fn create(&self, input: NewAsset) -> AssetResult<Asset> {
        let (name, status) = input.validated().ok_or(AssetError::InvalidInput)?;

        let _guard = self.write_lock.lock().await;
        let mut assets = self.store.load().await?;

        let max_id = assets.iter().map(|a| a.id).max().unwrap_or(0);
        let id = max_id
            .checked_add(1)
            .ok_or(AssetError::IdsExhausted(max_id))?;
        let now = self.clock.now();
        let asset = Asset {
            id,
            name,
            status,
            created_at: now.clone(),
            updated_at: now,
        };

        assets.push(asset.clone());
        self.store.save(&assets).await?;

        info!("created asset {} ({})", asset.id, asset.name);
        Ok(asset)
    }

    /// Merge `patch` onto the asset and bump `updated_at`, even when no field
    /// actually changed. Field values are not validated here.
    pub async fn update(&self, id: u64, patch: AssetPatch) -> AssetResult<Asset> {
        let _guard = self.write_lock.lock().await;
        let mut assets = self.store.load().await?;

        let asset = assets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(AssetError::NotFound(id))?;

        patch.apply_to(asset);
        // Never let a clock step backwards put updated_at before created_at.
        let now = self.clock.now();
        asset.updated_at = if now < asset.created_at {
            asset.created_at.clone()
        } else {
            now
        };
        let updated = asset.clone();

        self.store.save(&assets).await?;

        info!("updated asset {}", id);
        Ok(updated)
    }

    /// Remove the asset and hand it back to the caller.
    pub async fn delete(&self, id: u64) -> AssetResult<Asset> {
        let _guard = self.write_lock.lock().await;
        let mut assets = self.store.load().await?;

        let index = assets
            .iter()
            .position(|a| a.id == id)
            .ok_or(AssetError::NotFound(id))?;
        let removed = assets.remove(index);

        self.store.save(&assets).await?;

        info!("deleted asset {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    /// Used by `/readyz`: can the backing store be read at all.
    pub async fn count(&self) -> AssetResult<usize> {
        Ok(self.store.load().await?.len())
    }
}
