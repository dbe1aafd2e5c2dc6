//! Retrieval of access logs from an [ObjectStore], with an optional cache
//! directory on the local file system.

use crate::config::LogStorageConfig;
use anyhow::Context;
use bytes::Bytes;
use object_store::http::HttpBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::ObjectStore;
use std::sync::Arc;
use tracing::instrument;

pub struct LogStore {
    source: Arc<dyn ObjectStore>,
    cache: Option<Arc<dyn ObjectStore>>,
}

impl LogStore {
    pub fn new(source: Arc<dyn ObjectStore>, cache: Option<Arc<dyn ObjectStore>>) -> Self {
        Self { source, cache }
    }

    /// Builds the source store from the [LogStorageConfig] and, if
    /// `cache_dir` is set, a cache store in that directory.
    ///
    /// The cache directory is created if it does not exist yet.
    pub fn from_config(
        config: &LogStorageConfig,
        cache_dir: Option<&std::path::Path>,
    ) -> anyhow::Result<Self> {
        let source = build_store(config).context("Failed to build object store")?;

        let cache = match cache_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create cache directory {dir:?}"))?;

                let store = LocalFileSystem::new_with_prefix(dir)?;
                Some(Arc::new(store) as Arc<dyn ObjectStore>)
            }
            None => None,
        };

        Ok(Self::new(source, cache))
    }

    pub fn source(&self) -> &Arc<dyn ObjectStore> {
        &self.source
    }

    /// Returns the contents of the file at `path`.
    ///
    /// If a cache is configured and already contains the file, the source
    /// store is not consulted at all. Otherwise the file is retrieved from
    /// the source store and written to the cache. Failing to read from or
    /// write to the cache is not fatal.
    #[instrument(skip(self))]
    pub async fn fetch(&self, path: &str) -> anyhow::Result<Bytes> {
        let path = Path::parse(path).with_context(|| format!("Failed to parse path: {path:?}"))?;

        if let Some(cache) = &self.cache {
            match get_bytes(cache.as_ref(), &path).await {
                Ok(bytes) => {
                    debug!(%path, "Using cached log file");
                    return Ok(bytes);
                }
                Err(object_store::Error::NotFound { .. }) => {}
                Err(error) => warn!(%path, "Failed to read cached log file: {error}"),
            }
        }

        info!(%path, "Downloading log file");
        let bytes = get_bytes(self.source.as_ref(), &path).await;
        let bytes = bytes.with_context(|| format!("Failed to retrieve {path}"))?;
        info!(%path, size = bytes.len(), "Downloaded log file");

        if let Some(cache) = &self.cache {
            if let Err(error) = cache.put(&path, bytes.clone().into()).await {
                warn!(%path, "Failed to cache log file: {error}");
            }
        }

        Ok(bytes)
    }
}

fn build_store(config: &LogStorageConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    match config {
        LogStorageConfig::Http { url } => {
            let store = HttpBuilder::new().with_url(url.as_str()).build()?;
            Ok(Arc::new(store))
        }
        LogStorageConfig::Local { path } => Ok(Arc::new(LocalFileSystem::new_with_prefix(path)?)),
        LogStorageConfig::Memory => Ok(Arc::new(InMemory::new())),
    }
}

async fn get_bytes(store: &dyn ObjectStore, path: &Path) -> object_store::Result<Bytes> {
    store.get(path).await?.bytes().await
}
