//! Period-driven simulation runner for sink facilities.
//!
//! Composition root for the workspace:
//! - Loads a TOML run configuration
//! - Registers sink prototypes and builds facility instances
//! - Drives tick → material round → generic round → tock each period
//! - Reports a JSON summary of every facility at the end

pub mod app;
pub mod config;
pub mod error;
pub mod matcher;
pub mod report;

pub use app::{build_simulation, PeriodOutcome, Simulation};
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use matcher::{SupplyMatcher, Supplier};
pub use report::{FacilityReport, RunSummary};
