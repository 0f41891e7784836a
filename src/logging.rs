use crate::config::settings::AppConfig;
use crate::error::SparkError;

/// Initialize structured logging with tracing.
/// Called once at startup; `RUST_LOG` wins over the configured filter.
pub fn init_logging(config: &AppConfig) -> Result<(), SparkError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.log_json {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).compact())
            .try_init()
    };

    result.map_err(|e| {
        SparkError::new(format!("Failed to set global tracing subscriber: {}", e), "startup")
    })?;

    tracing::info!(json = config.log_json, "Structured logging initialized");
    Ok(())
}
