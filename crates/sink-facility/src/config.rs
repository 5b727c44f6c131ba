//! Sink facility configuration.

use serde::{Deserialize, Serialize};
use sink_core::{Commodity, Quantity};

use crate::error::{FacilityError, FacilityResult};

/// Construction-time settings for a sink facility.
///
/// Omitted limits mean "unbounded".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Accepted commodities, in request order. Must not be empty.
    pub commodities: Vec<Commodity>,

    /// Maximum total quantity requested across all commodities per period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_capacity: Option<Quantity>,

    /// Maximum total quantity the inventory may ever hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_size: Option<Quantity>,
}

impl SinkConfig {
    /// Unbounded configuration for the given commodities.
    pub fn new(commodities: Vec<Commodity>) -> Self {
        Self {
            commodities,
            input_capacity: None,
            inventory_size: None,
        }
    }

    #[must_use]
    pub fn with_input_capacity(mut self, capacity: Quantity) -> Self {
        self.input_capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn with_inventory_size(mut self, size: Quantity) -> Self {
        self.inventory_size = Some(size);
        self
    }

    /// Per-period throughput limit, `Quantity::MAX` when unset.
    pub fn throughput_capacity(&self) -> Quantity {
        self.input_capacity.unwrap_or(Quantity::MAX)
    }

    /// Inventory capacity, `Quantity::MAX` when unset.
    pub fn max_inventory_size(&self) -> Quantity {
        self.inventory_size.unwrap_or(Quantity::MAX)
    }

    /// Reject configurations the request policy cannot work with.
    pub fn validate(&self) -> FacilityResult<()> {
        if self.commodities.is_empty() {
            return Err(FacilityError::InvalidConfig(
                "at least one commodity is required".to_string(),
            ));
        }
        if let Some(cap) = self.input_capacity {
            if !cap.is_positive() {
                return Err(FacilityError::InvalidConfig(format!(
                    "input_capacity must be positive, got {cap}"
                )));
            }
        }
        if let Some(size) = self.inventory_size {
            if !size.is_positive() {
                return Err(FacilityError::InvalidConfig(format!(
                    "inventory_size must be positive, got {size}"
                )));
            }
        }
        Ok(())
    }
}
