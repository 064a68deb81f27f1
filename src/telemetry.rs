use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Initialize structured logging on stderr.
/// RUST_LOG wins over the configured level when it is set.
pub fn init_telemetry(observability: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&observability.log_level))?;

    let registry = tracing_subscriber::registry().with(filter);

    if observability.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }

    tracing::debug!("marbles-view telemetry initialized");
    Ok(())
}

/// Create a span carrying the marble being rendered
pub fn create_render_span(operation: &str, marble_id: Option<&str>) -> tracing::Span {
    tracing::info_span!(
        "marble_render",
        operation = operation,
        marble.id = marble_id,
    )
}
