//! # spana-telemetry
//!
//! Observability for the estimator: tracing-based structured logging and a
//! prometheus metrics registry counting what the replay saw and skipped.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
