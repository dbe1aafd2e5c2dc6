//! Web service and command line tooling around the `access_log_engine` crate.
//!
//! This crate retrieves an access log (optionally through a local cache),
//! decompresses it, feeds it through the engine and serves the resulting
//! statistics as JSON.

#[macro_use]
extern crate tracing;

pub mod app;
pub mod compression;
pub mod config;
pub mod controllers;
pub mod ingest;
pub mod router;
pub mod storage;
pub mod util;
pub mod views;

pub use crate::app::{App, AppState};
pub use crate::compression::Decompressor;
pub use crate::storage::LogStore;
