//! Facility error types.

use sink_core::{FacilityId, Quantity};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Accepting a batch of fills would overflow the inventory. The matcher
    /// allocated more than the facility's portfolios allowed.
    #[error(
        "Inventory capacity exceeded for facility {facility}: holding {held}, offered {offered}, capacity {capacity}"
    )]
    CapacityExceeded {
        facility: FacilityId,
        held: Quantity,
        offered: Quantity,
        capacity: Quantity,
    },

    #[error("Unknown prototype: {0}")]
    UnknownPrototype(String),

    #[error("Duplicate prototype: {0}")]
    DuplicatePrototype(String),

    #[error("Core error: {0}")]
    Core(#[from] sink_core::CoreError),
}

pub type FacilityResult<T> = Result<T, FacilityError>;
