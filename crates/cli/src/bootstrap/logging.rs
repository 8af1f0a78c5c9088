use signage_domain::Config;
use tracing_subscriber::EnvFilter;

/// RUST_LOG wins over the configured level. Output goes to stderr so the
/// prompts and the report on stdout stay readable.
fn build_env_filter(level: &str) -> EnvFilter {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::try_new(format!("{},sqlx=warn", level))
            .unwrap_or_else(|_| EnvFilter::new("warn,sqlx=warn"))
    }
}

pub fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(&config.logging.level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
