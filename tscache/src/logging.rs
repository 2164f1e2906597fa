use std::str::FromStr;
use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

/// Build the event filter for the cache's log output.
///
/// `RUST_LOG` wins when set. Otherwise a bare level such as `debug` scopes
/// that level to this crate (`tscache=debug`) and anything containing `=` or
/// `,` is used verbatim as a directive list.
pub fn env_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(directives(&config.level)?)?)
}

fn directives(level: &str) -> anyhow::Result<String> {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return Ok(level.to_string());
    }
    let level = LevelFilter::from_str(level)
        .map_err(|_| anyhow::anyhow!("Invalid log level: {level}"))?;
    Ok(format!("{}={level}", env!("CARGO_CRATE_NAME")))
}

/// Install the global subscriber for cache logs (eviction, segment and
/// playlist saves, storage traces).
///
/// `format` selects "json" or pretty output; `file_path` appends to a file
/// instead of stdout.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = env_filter(config)?;

    let writer = match &config.file_path {
        Some(file_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.format == "json" {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(false)
            .with_writer(writer)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}
