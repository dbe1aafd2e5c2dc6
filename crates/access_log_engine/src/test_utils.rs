use crate::RequestRecord;
use tracing::dispatcher::DefaultGuard;
use tracing::subscriber;
use tracing_subscriber::fmt;

/// Enable tracing output for tests.
///
/// The tracing test output is only enabled as long as the returned guard
/// is not dropped.
pub fn enable_tracing_output() -> DefaultGuard {
    subscriber::set_default(fmt().compact().with_test_writer().finish())
}

/// Builds a successfully parsed record with `GET` as its verb.
pub fn record(host: &str, resource: &str, response_code: &str) -> RequestRecord {
    RequestRecord {
        host: Some(host.to_string()),
        http_verb: Some("GET".to_string()),
        resource: Some(resource.to_string()),
        response_code: Some(response_code.to_string()),
    }
}
