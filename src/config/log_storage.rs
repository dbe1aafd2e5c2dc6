use super::var;
use anyhow::Context;
use std::path::{Path, PathBuf};
use url::Url;

/// Where the access log is retrieved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogStorageConfig {
    /// A remote HTTP(S) location. Log files are resolved relative to `url`.
    Http { url: Url },
    /// A directory on the local file system.
    Local { path: PathBuf },
    /// An empty in-memory store, mostly useful for tests.
    Memory,
}

impl LogStorageConfig {
    pub fn http(url: Url) -> Self {
        Self::Http { url }
    }

    pub fn local(path: PathBuf) -> Self {
        Self::Local { path }
    }

    pub fn memory() -> Self {
        Self::Memory
    }

    /// Reads the configuration from `LOG_STORAGE_URL` or `LOG_STORAGE_PATH`.
    ///
    /// If neither is set, the `local_logs` directory in the current working
    /// directory is used if it exists, and an in-memory store otherwise.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Some(url) = var("LOG_STORAGE_URL")? {
            let url = Url::parse(&url).context("Failed to parse LOG_STORAGE_URL")?;
            return Ok(Self::http(url));
        }

        if let Some(path) = var("LOG_STORAGE_PATH")? {
            return Ok(Self::local(path.into()));
        }

        let current_dir = std::env::current_dir();
        let current_dir = current_dir.context("Failed to read the current directory")?;
        Ok(Self::fallback(&current_dir))
    }

    fn fallback(current_dir: &Path) -> Self {
        let path = current_dir.join("local_logs");
        let path_display = path.display();
        if path.exists() {
            info!("Falling back to local log storage at {path_display}");
            return Self::local(path);
        }

        warn!("Falling back to in-memory log storage because {path_display} does not exist");
        Self::memory()
    }
}
