//! Application-wide components in a struct accessible from each request

use crate::config;
use crate::ingest;
use crate::storage::LogStore;
use access_log_engine::Statistics;
use arc_swap::ArcSwapOption;
use axum::extract::{FromRequestParts, State};
use derive_more::Deref;
use std::sync::Arc;
use tracing::instrument;

/// The `App` struct holds the main components of the application like
/// the configuration and the current statistics snapshot.
pub struct App {
    /// The server configuration
    pub config: Arc<config::Server>,

    /// The statistics of the most recently ingested log, or `None` while
    /// the first ingestion is still running or if it failed.
    statistics: ArcSwapOption<Statistics>,
}

impl App {
    pub fn new(config: config::Server) -> App {
        App {
            config: Arc::new(config),
            statistics: ArcSwapOption::empty(),
        }
    }

    /// Returns the current snapshot.
    ///
    /// The snapshot is immutable, so callers see a consistent set of views
    /// even if a new snapshot is published in the meantime.
    pub fn statistics(&self) -> Option<Arc<Statistics>> {
        self.statistics.load_full()
    }

    /// Atomically replaces the current snapshot.
    pub fn publish(&self, statistics: Statistics) {
        self.statistics.store(Some(Arc::new(statistics)));
    }

    /// Loads the configured log file from `store`, computes its statistics
    /// and publishes them.
    ///
    /// If the log can not be loaded or the statistics can not be computed,
    /// the current snapshot is left untouched.
    #[instrument(skip_all, fields(log_file = %self.config.log_file))]
    pub async fn refresh(&self, store: &LogStore) -> anyhow::Result<()> {
        let records = ingest::load(store, &self.config.log_file).await;
        let records = records.inspect_err(|error| error!("Failed to load access log: {error:#}"));

        // A log that could not be retrieved has no record sequence at all,
        // which the engine reports as invalid input.
        let statistics = Statistics::compute(records.as_deref().ok())?;

        info!(
            requests = statistics.state().all_requests(),
            successful = statistics.state().successful_requests(),
            "Publishing access log statistics"
        );

        self.publish(statistics);

        Ok(())
    }
}

#[derive(Clone, FromRequestParts, Deref)]
#[from_request(via(State))]
pub struct AppState(pub Arc<App>);

impl AppState {
    pub fn new(app: App) -> Self {
        Self(Arc::new(app))
    }
}
