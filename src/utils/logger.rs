use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("iserver_client={},warn", level)))
}

/// `--verbose` wins over the configured level.
fn effective_level(verbose: bool, level: &str) -> &str {
    if verbose {
        "debug"
    } else {
        level
    }
}

pub fn init_cli_logger(verbose: bool, level: &str) {
    let _ = tracing_subscriber::registry()
        .with(default_filter(effective_level(verbose, level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

/// Structured output for log collectors; `level` comes from `[logging]` in the config file.
pub fn init_json_logger(verbose: bool, level: &str) {
    let _ = tracing_subscriber::registry()
        .with(default_filter(effective_level(verbose, level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .try_init();
}
