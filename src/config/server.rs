use super::{LogStorageConfig, var, var_parsed};
use std::net::IpAddr;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8888;
const DEFAULT_LOG_FILE: &str = "NASA_access_log_Aug95.gz";

pub struct Server {
    pub ip: IpAddr,
    pub port: u16,

    /// Where the access log is retrieved from.
    pub log_storage: LogStorageConfig,

    /// Path of the access log, relative to the log storage root. The file
    /// extension selects the decompression algorithm.
    pub log_file: String,

    /// Directory to keep a copy of the retrieved log in, so that restarts
    /// don't have to download it again.
    pub log_cache_dir: Option<PathBuf>,
}

impl Server {
    /// Returns a default value for the application's config
    ///
    /// Sets the following default values:
    ///
    /// - `PORT`: `8888`
    /// - `LOG_FILE`: `NASA_access_log_Aug95.gz`
    ///
    /// Pulls values from the following environment variables:
    ///
    /// - `DEV_DOCKER`: Is present if server is running in a container, in
    ///   which case it listens on `0.0.0.0` instead of `127.0.0.1`.
    /// - `PORT`: The port the server listens on.
    /// - `LOG_STORAGE_URL`, `LOG_STORAGE_PATH`: See [LogStorageConfig::from_env].
    /// - `LOG_FILE`: Path of the access log within the log storage.
    /// - `LOG_CACHE_DIR`: Optional directory used to cache the access log.
    pub fn from_environment() -> anyhow::Result<Self> {
        let docker = var("DEV_DOCKER")?.is_some();

        let ip = if docker {
            [0, 0, 0, 0].into()
        } else {
            [127, 0, 0, 1].into()
        };

        let port = var_parsed("PORT")?.unwrap_or(DEFAULT_PORT);

        Ok(Server {
            ip,
            port,
            log_storage: LogStorageConfig::from_env()?,
            log_file: var("LOG_FILE")?.unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            log_cache_dir: var("LOG_CACHE_DIR")?.map(PathBuf::from),
        })
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            ip: [127, 0, 0, 1].into(),
            port: DEFAULT_PORT,
            log_storage: LogStorageConfig::memory(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            log_cache_dir: None,
        }
    }
}
