//! Simulation run configuration.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sink_core::{Commodity, Quantity, ResourceKind};
use sink_facility::SinkConfig;

use crate::error::{SimError, SimResult};

/// Named sink prototype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrototypeConfig {
    pub name: String,
    #[serde(flatten)]
    pub sink: SinkConfig,
}

/// Facility instances to build from a prototype.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityConfig {
    /// Instance name; suffixed with `_<n>` when `count > 1`.
    pub name: String,
    pub prototype: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl FacilityConfig {
    /// Names of the instances this entry builds.
    pub fn instance_names(&self) -> Vec<String> {
        if self.count > 1 {
            (1..=self.count)
                .map(|i| format!("{}_{}", self.name, i))
                .collect()
        } else {
            vec![self.name.clone()]
        }
    }
}

/// A source that offers a fixed amount of one commodity every period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierConfig {
    pub name: String,
    pub commodity: Commodity,
    #[serde(default = "default_kind")]
    pub kind: ResourceKind,
    pub supply_per_period: Quantity,
}

fn default_kind() -> ResourceKind {
    ResourceKind::Material
}

/// Top-level run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of periods to simulate.
    #[serde(default = "default_periods")]
    pub periods: u32,
    #[serde(default)]
    pub prototypes: Vec<PrototypeConfig>,
    #[serde(default)]
    pub facilities: Vec<FacilityConfig>,
    #[serde(default)]
    pub suppliers: Vec<SupplierConfig>,
}

fn default_periods() -> u32 {
    12
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            periods: default_periods(),
            prototypes: Vec::new(),
            facilities: Vec::new(),
            suppliers: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Load from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SimError::Config(format!("Failed to read config: {e}")))?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SimError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Cross-reference checks that serde cannot express.
    ///
    /// Prototype settings themselves are validated when registered.
    pub fn validate(&self) -> SimResult<()> {
        for facility in &self.facilities {
            if !self.prototypes.iter().any(|p| p.name == facility.prototype) {
                return Err(SimError::Config(format!(
                    "facility '{}' references unknown prototype '{}'",
                    facility.name, facility.prototype
                )));
            }
            if facility.count == 0 {
                return Err(SimError::Config(format!(
                    "facility '{}' has count 0",
                    facility.name
                )));
            }
        }

        // Metrics are labelled by instance name.
        let mut names = HashSet::new();
        for name in self.facilities.iter().flat_map(FacilityConfig::instance_names) {
            if !names.insert(name.clone()) {
                return Err(SimError::Config(format!(
                    "duplicate facility instance name '{name}'"
                )));
            }
        }

        let mut total_supply = Quantity::ZERO;
        for supplier in &self.suppliers {
            if supplier.supply_per_period.inner().is_sign_negative() {
                return Err(SimError::Config(format!(
                    "supplier '{}' has negative supply",
                    supplier.name
                )));
            }
            total_supply = total_supply
                .checked_add(supplier.supply_per_period)
                .filter(|t| !t.is_unbounded())
                .ok_or_else(|| {
                    SimError::Config(format!(
                        "total supply per period overflows at supplier '{}'",
                        supplier.name
                    ))
                })?;
        }
        Ok(())
    }
}
