//! Core domain types for the sink facility simulation.
//!
//! This crate provides fundamental types shared by the market boundary,
//! the facility and the simulation driver:
//! - `Quantity`: Precision-safe resource amounts with an "unbounded" sentinel
//! - `Commodity`, `FacilityId`, `Period`: Identifiers
//! - `Material`, `GenericResource`: The two resource kinds traded each period
//! - `Resource`: Capability trait that lets one algorithm serve both kinds

pub mod error;
pub mod ids;
pub mod quantity;
pub mod resource;

pub use error::{CoreError, Result};
pub use ids::{Commodity, FacilityId, Period, ResourceId};
pub use quantity::Quantity;
pub use resource::{
    Composition, GenericResource, Material, Resource, ResourceKind, StoredResource,
};
