//! Capacity-bounded sink facility.
//!
//! A sink absorbs one or more commodities each period, up to a per-period
//! throughput and a total inventory capacity, and reports its intent to
//! the market truthfully.
//!
//! # Architecture
//!
//! ```text
//! tick ─→ request_amount(space, throughput, n)      (throughput)
//!          └─ build_requests::<R>()                 (requests)
//!               → one portfolio, one shared CapacityConstraint
//!                    ↓ [external matcher]
//!         accept_trades::<R>() → ResourceBuffer     (inventory)
//! tock ─→ report held quantity
//! ```

pub mod config;
pub mod error;
pub mod facility;
pub mod inventory;
pub mod registry;
pub mod requests;
pub mod throughput;

pub use config::SinkConfig;
pub use error::{FacilityError, FacilityResult};
pub use facility::SinkFacility;
pub use inventory::{Overflow, ResourceBuffer};
pub use registry::PrototypeRegistry;
pub use requests::build_requests;
pub use throughput::request_amount;
