use tracing_subscriber::EnvFilter;

/// Console logging; `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "pngviewer=debug" } else { "pngviewer=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
