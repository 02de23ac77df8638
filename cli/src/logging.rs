use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// Precedence: `--log-level`, then `RUST_LOG`, then the configured level, then `info`.
pub fn init(cli_level: Option<&str>, configured_level: Option<&str>) {
    let filter = cli_level
        .map(EnvFilter::try_new)
        .or_else(|| std::env::var("RUST_LOG").ok().map(EnvFilter::try_new))
        .or_else(|| configured_level.map(EnvFilter::try_new))
        .and_then(|filter| filter.ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    // Keep a subscriber that is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
