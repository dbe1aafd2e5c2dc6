use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initializes the `tracing` logging framework.
///
/// Regular CLI output is influenced by the
/// [`RUST_LOG`](tracing_subscriber::filter::EnvFilter) environment variable,
/// and defaults to the `INFO` level.
///
/// Log events are written to stderr. If the `LOG_FORMAT` environment variable
/// is set to `json`, they are emitted as JSON lines instead.
pub fn init() {
    init_with_default_level(LevelFilter::INFO)
}

/// Initializes the `tracing` logging framework with a custom default level.
///
/// See [init] for more details.
pub fn init_with_default_level(level: LevelFilter) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let json = dotenvy::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    let log_layer = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry().with(log_layer).init();
}

/// Enable tracing output for tests.
///
/// The tracing test output is only enabled as long as the returned guard
/// is not dropped.
pub fn init_for_test() -> DefaultGuard {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    let subscriber = fmt()
        .compact()
        .with_env_filter(env_filter)
        .without_time()
        .with_test_writer()
        .finish();

    tracing::subscriber::set_default(subscriber)
}
