//! Bounded inventory of received resources.
//!
//! Holds resource objects of either kind against a fixed capacity. The
//! held quantity only ever grows: nothing in the sink withdraws stock.

use sink_core::{Quantity, StoredResource};
use thiserror::Error;

/// A push would take the held quantity past capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("holding {held}, offered {offered}, capacity {capacity}")]
pub struct Overflow {
    pub held: Quantity,
    pub offered: Quantity,
    pub capacity: Quantity,
}

/// Capacity-bounded resource store.
///
/// Invariant: `quantity() <= capacity()`.
#[derive(Debug, Clone)]
pub struct ResourceBuffer {
    capacity: Quantity,
    quantity: Quantity,
    resources: Vec<StoredResource>,
}

impl ResourceBuffer {
    /// Create an empty buffer.
    pub fn new(capacity: Quantity) -> Self {
        Self {
            capacity,
            quantity: Quantity::ZERO,
            resources: Vec::new(),
        }
    }

    pub fn capacity(&self) -> Quantity {
        self.capacity
    }

    /// Total quantity currently held.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Remaining free space.
    pub fn space(&self) -> Quantity {
        self.capacity
            .checked_sub(self.quantity)
            .filter(|s| !s.inner().is_sign_negative())
            .unwrap_or(Quantity::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Number of resource objects held.
    pub fn count(&self) -> usize {
        self.resources.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredResource> {
        self.resources.iter()
    }

    /// Add one resource.
    pub fn push(&mut self, resource: StoredResource) -> Result<(), Overflow> {
        self.push_all(vec![resource])
    }

    /// Add a batch of resources, all or nothing.
    ///
    /// The whole batch is checked against remaining space before anything
    /// is stored, so a rejected batch leaves the buffer untouched.
    pub fn push_all(&mut self, resources: Vec<StoredResource>) -> Result<(), Overflow> {
        let offered = resources
            .iter()
            .try_fold(Quantity::ZERO, |acc, r| acc.checked_add(r.quantity()));

        let new_quantity = offered.and_then(|o| self.quantity.checked_add(o));
        match new_quantity {
            Some(total) if total <= self.capacity => {
                self.quantity = total;
                self.resources.extend(resources);
                Ok(())
            }
            _ => Err(Overflow {
                held: self.quantity,
                offered: offered.unwrap_or(Quantity::MAX),
                capacity: self.capacity,
            }),
        }
    }
}
