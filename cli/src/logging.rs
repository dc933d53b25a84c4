use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive, overrides `-v`
pub const LOG_ENV: &str = "CHEMBALANCE_LOG";

/// Installs a stderr `fmt` subscriber filtered by [`LOG_ENV`] or the verbosity count.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
