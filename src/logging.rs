use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins over the configured level; `--verbose` wins over both.
pub fn init(level: &str, verbose: bool) {
    let configured = EnvFilter::try_new(level);
    let level_is_valid = configured.is_ok();

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or(configured)
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if !level_is_valid {
        tracing::warn!(level = %level, "Invalid log level in config, using info");
    }
}
