use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use bytes::Bytes;

/// Where store snapshots go between restarts.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    async fn load(&self) -> anyhow::Result<Option<Bytes>>;
    async fn save(&self, body: Bytes) -> anyhow::Result<()>;
}

/// Snapshot kept in a single JSON file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotStorage for JsonFileStorage {
    async fn load(&self) -> anyhow::Result<Option<Bytes>> {
        match tokio::fs::read(&self.path).await {
            Ok(body) if body.iter().all(u8::is_ascii_whitespace) => Ok(None),
            Ok(body) => Ok(Some(Bytes::from(body))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read snapshot {}", self.path.display())),
        }
    }

    async fn save(&self, body: Bytes) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create snapshot dir {}", dir.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &body)
            .await
            .with_context(|| format!("write snapshot {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replace snapshot {}", self.path.display()))?;
        Ok(())
    }
}

/// Keeps the last snapshot in memory only.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    last: Mutex<Option<Bytes>>,
}

#[async_trait]
impl SnapshotStorage for MemoryStorage {
    async fn load(&self) -> anyhow::Result<Option<Bytes>> {
        let last = self.last.lock().map_err(|_| anyhow!("snapshot buffer poisoned"))?;
        Ok(last.clone())
    }

    async fn save(&self, body: Bytes) -> anyhow::Result<()> {
        let mut last = self.last.lock().map_err(|_| anyhow!("snapshot buffer poisoned"))?;
        *last = Some(body);
        Ok(())
    }
}
