//! Prometheus metrics for the sink simulation.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()`. A failure means duplicate metric
//! names, a startup bug that should crash immediately. These panics can
//! only happen during lazy static initialization.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge_vec, CounterVec, Encoder, GaugeVec, TextEncoder,
};

use crate::error::TelemetryResult;

/// Quantity currently held in each facility's inventory.
pub static INVENTORY_HELD: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "sink_inventory_held",
        "Quantity currently held in the facility inventory",
        &["facility"]
    )
    .unwrap()
});

/// Per-commodity amount a facility intends to request this period.
pub static REQUEST_AMOUNT: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "sink_request_amount",
        "Per-commodity request amount computed at tick",
        &["facility"]
    )
    .unwrap()
});

/// Accepted trades.
/// Labels: facility, kind (material/generic_resource)
pub static TRADES_ACCEPTED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "sink_trades_accepted_total",
        "Total trades accepted into inventory",
        &["facility", "kind"]
    )
    .unwrap()
});

/// Quantity received through accepted trades.
pub static RECEIVED_QUANTITY_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "sink_received_quantity_total",
        "Total quantity received through accepted trades",
        &["facility", "kind"]
    )
    .unwrap()
});

/// Recording helpers.
pub struct Metrics;

impl Metrics {
    /// Record current inventory level.
    pub fn inventory_held(facility: &str, held: f64) {
        INVENTORY_HELD.with_label_values(&[facility]).set(held);
    }

    /// Record the per-commodity request amount computed at tick.
    pub fn request_amount(facility: &str, amount: f64) {
        REQUEST_AMOUNT.with_label_values(&[facility]).set(amount);
    }

    /// Record one accepted trade of `quantity`.
    pub fn trade_accepted(facility: &str, kind: &str, quantity: f64) {
        TRADES_ACCEPTED_TOTAL
            .with_label_values(&[facility, kind])
            .inc();
        RECEIVED_QUANTITY_TOTAL
            .with_label_values(&[facility, kind])
            .inc_by(quantity);
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn gather_text() -> TelemetryResult<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
