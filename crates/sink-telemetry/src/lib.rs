//! Prometheus metrics and structured logging for the sink simulation.
//!
//! - Structured logging with tracing (JSON in production, pretty otherwise)
//! - Prometheus gauges and counters for inventory level, request intent
//!   and accepted trades

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
