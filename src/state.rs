use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::storage::{JsonFileStorage, MemoryStorage, SnapshotStorage};
use crate::store::Store;

/// Shared handler state. The mutex is the single-writer guarantee the store
/// itself does not provide.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub config: Arc<AppConfig>,
    pub storage: Arc<dyn SnapshotStorage>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn SnapshotStorage> = match &config.data_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "using json snapshot");
                Arc::new(JsonFileStorage::new(path.clone()))
            }
            None => {
                tracing::warn!("BARISENSE_DATA_FILE not set; data is kept in memory only");
                Arc::new(MemoryStorage::default())
            }
        };

        let store = match storage.load().await? {
            Some(body) => Store::from_snapshot(&body, config.sensory_weights)?,
            None => Store::new(config.sensory_weights),
        };

        Ok(Self::from_parts(store, Arc::new(config), storage))
    }

    pub fn from_parts(store: Store, config: Arc<AppConfig>, storage: Arc<dyn SnapshotStorage>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config,
            storage,
        }
    }

    /// Empty store, default config, nothing written to disk.
    pub fn in_memory() -> Self {
        let config = AppConfig::default();
        let store = Store::new(config.sensory_weights);
        Self::from_parts(store, Arc::new(config), Arc::new(MemoryStorage::default()))
    }

    /// Write the current store through the snapshot storage.
    pub async fn persist(&self, store: &Store) -> anyhow::Result<()> {
        let body = store.to_snapshot()?;
        self.storage.save(body).await
    }
}
