#[macro_use]
extern crate tracing;

use access_log_engine::Statistics;
use access_log_stats::Decompressor;
use access_log_stats::ingest::read_records;
use access_log_stats::util::tracing::init;
use access_log_stats::views;
use anyhow::Context;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::BufReader;

#[derive(clap::Parser, Debug)]
#[command(
    name = "report",
    about = "Print usage statistics of an access log as JSON.",
    long_about = "Print usage statistics of an access log as JSON. Files ending in `.gz` or \
        `.zst` are decompressed on the fly, all other files are read as plain text. \
        Lines that can not be parsed are reported on stderr."
)]
struct Options {
    /// Path to the access log file.
    path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    init();

    use clap::Parser;
    let options = Options::parse();
    let path = &options.path;

    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let extension = path.extension().and_then(|extension| extension.to_str());
    let decompressor = Decompressor::from_extension(BufReader::new(file), extension)?;

    let records = read_records(BufReader::new(decompressor)).await?;
    info!(records = records.len(), "Computing statistics");

    let statistics = Statistics::compute(Some(records.as_slice()))?;

    let json = serde_json::to_string_pretty(&views::logs(Some(&statistics)))?;
    println!("{json}");

    Ok(())
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Options::command().debug_assert();
}
