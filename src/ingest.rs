use crate::compression::Decompressor;
use crate::storage::LogStore;
use access_log_engine::RequestRecord;
use access_log_engine::parser::parse_and_report;
use std::io::Cursor;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::instrument;

/// Reads all lines from `reader` and parses them into [RequestRecord]s.
///
/// Lines are numbered from 1 for the diagnostic output. Bytes that are not
/// valid UTF-8 are replaced instead of aborting the whole log, and trailing
/// `\r\n` or `\n` line terminators are stripped.
#[instrument(skip_all)]
pub async fn read_records(
    mut reader: impl AsyncBufRead + Unpin,
) -> anyhow::Result<Vec<RequestRecord>> {
    let mut records = Vec::new();
    let mut unparsable = 0;

    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buffer);
        let line = line.trim_end_matches(['\r', '\n']);

        let record = parse_and_report(records.len() + 1, line);
        if !record.has_any_field() {
            unparsable += 1;
        }
        records.push(record);
    }

    info!(lines = records.len(), unparsable, "Finished reading access log");

    Ok(records)
}

/// Retrieves the log file at `path` from the [LogStore], decompresses it
/// based on its file extension and parses all of its lines.
#[instrument(skip(store))]
pub async fn load(store: &LogStore, path: &str) -> anyhow::Result<Vec<RequestRecord>> {
    let bytes = store.fetch(path).await?;

    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|extension| extension.to_str());

    let decompressor = Decompressor::from_extension(Cursor::new(bytes), extension)?;
    let reader = BufReader::new(decompressor);

    read_records(reader).await
}
