//! Structured logging with tracing.

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Install the global subscriber. `RUST_LOG` wins; `info` otherwise.
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init()
    }

    /// Emit one structured completion event with attached metadata.
    pub fn log_event(event_type: &str, metadata: Vec<KeyValue>) {
        let span = info_span!("estimator_event", event_type = event_type);
        let _guard = span.enter();
        tracing::info!(metadata = ?metadata, "Estimator event recorded");
    }
}
