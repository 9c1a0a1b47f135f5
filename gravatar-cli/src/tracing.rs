//!
//! Module to initialize tracing logs.
//!
//! The filter is taken from the first of: the `--tracing-env-filter` flag,
//! `RUST_LOG`, the `[logging]` section of the config file, and
//! [`DEFAULT_FILTER`].
//!

use tracing_subscriber::EnvFilter;

use crate::config_toml::LoggingToml;

/// Filter used when nothing else is configured.
pub const DEFAULT_FILTER: &str = "gravatar=info,gravatar_cli=info";

fn filter_from_logging(logging: &LoggingToml) -> anyhow::Result<EnvFilter> {
    let directives = logging.directives();
    EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("invalid [logging] directives {directives:?}: {e}"))
}

/// Pick the filter. `rust_log` is the value of `RUST_LOG`, if set.
pub fn select_filter(
    cli_filter: Option<&str>,
    rust_log: Option<&str>,
    logging: Option<&LoggingToml>,
) -> anyhow::Result<EnvFilter> {
    if let Some(directives) = cli_filter {
        return EnvFilter::try_new(directives)
            .map_err(|e| anyhow::anyhow!("invalid --tracing-env-filter {directives:?}: {e}"));
    }
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::try_new(directives)
            .map_err(|e| anyhow::anyhow!("invalid RUST_LOG {directives:?}: {e}"));
    }
    match logging {
        Some(logging) => filter_from_logging(logging),
        None => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Initialize the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays machine readable.
pub fn init_tracing_logs(
    cli_filter: Option<&str>,
    logging: Option<&LoggingToml>,
) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = select_filter(cli_filter, rust_log.as_deref(), logging)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
