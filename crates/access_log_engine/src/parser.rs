//! # Access log line parsing
//!
//! Lines are expected in the Common Log Format, as used by e.g. the NASA
//! Kennedy Space Center traces:
//!
//! ```text
//! in24.inetnebr.com - - [01/Aug/1995:00:00:01 -0400] "GET /shuttle/missions/sts-68/news/sts-68-mcc-05.txt HTTP/1.0" 200 1839
//! ```
//!
//! see <https://httpd.apache.org/docs/current/logs.html#common>.

use crate::RequestRecord;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{instrument, warn};

/// `<host> - - [<timestamp>] "<VERB> <path> <protocol>" <status> <size>`
///
/// The timestamp, protocol and size fields are consumed but not captured.
static LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\S+)\s-\s-\s\[[^\]]+\]\s"([A-Z]+)\s(\S+)\s[^"]+"\s([0-9]+)\s(.+)$"#).unwrap()
});

/// Parses a single log line into a [RequestRecord].
///
/// This function never fails. Lines that don't match the log grammar result
/// in a record with all fields set to `None`.
pub fn parse_line(line: &str) -> RequestRecord {
    let Some(captures) = LINE_REGEX.captures(line) else {
        return RequestRecord::default();
    };

    let field = |index| captures.get(index).map(|m| m.as_str().to_string());

    RequestRecord {
        host: field(1),
        http_verb: field(2),
        resource: field(3),
        response_code: field(4),
    }
}

/// Parses a single log line and reports any [Anomaly] found in the result.
///
/// `line_number` is only used for the diagnostic output and is expected to
/// be 1-based.
pub fn parse_and_report(line_number: usize, line: &str) -> RequestRecord {
    let record = parse_line(line);
    report(line_number, line, &record);
    record
}

/// Parses all lines of a log, in order, reporting anomalies along the way.
#[instrument(level = "debug", skip_all)]
pub fn parse_lines<I, S>(lines: I) -> Vec<RequestRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| parse_and_report(index + 1, line.as_ref()))
        .collect()
}

/// A data-quality issue found in a parsed [RequestRecord].
///
/// Anomalies are advisory only. They are reported through `tracing` and never
/// change how a record is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anomaly {
    /// The line did not match the log grammar at all.
    Unparsable,
    /// The host does not contain a `.`.
    InvalidHost,
    InvalidHttpVerb,
    InvalidResource,
    InvalidResponseCode,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Anomaly::Unparsable => "Request could not be parsed",
            Anomaly::InvalidHost => "Invalid host",
            Anomaly::InvalidHttpVerb => "Invalid http verb",
            Anomaly::InvalidResource => "Invalid resource",
            Anomaly::InvalidResponseCode => "Invalid response code",
        })
    }
}

/// Checks a parsed record for anomalies.
///
/// If no field could be parsed at all, only [Anomaly::Unparsable] is
/// returned and the per-field checks are skipped.
pub fn validate(record: &RequestRecord) -> Vec<Anomaly> {
    if !record.has_any_field() {
        return vec![Anomaly::Unparsable];
    }

    let mut anomalies = Vec::new();
    if record.host.is_some() && !record.is_host_valid() {
        anomalies.push(Anomaly::InvalidHost);
    }
    if !record.is_http_verb_valid() {
        anomalies.push(Anomaly::InvalidHttpVerb);
    }
    if !record.is_resource_valid() {
        anomalies.push(Anomaly::InvalidResource);
    }
    if !record.is_response_code_valid() {
        anomalies.push(Anomaly::InvalidResponseCode);
    }
    anomalies
}

/// Emits one `warn` event per [Anomaly] found in `record`.
pub fn report(line_number: usize, line: &str, record: &RequestRecord) {
    for anomaly in validate(record) {
        let value = match anomaly {
            Anomaly::Unparsable => None,
            Anomaly::InvalidHost => record.host.as_deref(),
            Anomaly::InvalidHttpVerb => record.http_verb.as_deref(),
            Anomaly::InvalidResource => record.resource.as_deref(),
            Anomaly::InvalidResponseCode => record.response_code.as_deref(),
        };

        warn!(line = line_number, value, request = line, "{anomaly}");
    }
}
