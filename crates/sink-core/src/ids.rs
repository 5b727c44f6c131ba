//! Identifiers used across the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Simulation time step index (one period = one tick/tock cycle).
pub type Period = u32;

/// Facility identifier assigned by the host when an instance is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacilityId(pub u32);

impl FacilityId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for FacilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named category of interchangeable resource (e.g. "spent_fuel").
///
/// Order and duplicates are meaningful to callers that keep lists of
/// commodities, so no normalization is applied beyond trimming.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Commodity(String);

impl Commodity {
    /// Create a commodity name, rejecting blank strings.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidCommodity(
                "commodity name must not be blank".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Commodity {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Commodity {
    type Error = CoreError;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl From<Commodity> for String {
    fn from(c: Commodity) -> Self {
        c.0
    }
}

impl AsRef<str> for Commodity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identity of a tracked resource object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId(Uuid);

impl ResourceId {
    /// Allocate a fresh identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ResourceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commodity_trims_name() {
        let c = Commodity::new("  spent_fuel ").unwrap();
        assert_eq!(c.as_str(), "spent_fuel");
    }

    #[test]
    fn test_commodity_rejects_blank() {
        assert!(Commodity::new("").is_err());
        assert!(Commodity::new("   ").is_err());
    }

    #[test]
    fn test_commodity_deserialize_validates() {
        let ok: Commodity = serde_json::from_str("\"uox\"").unwrap();
        assert_eq!(ok.as_str(), "uox");
        assert!(serde_json::from_str::<Commodity>("\"\"").is_err());
    }

    #[test]
    fn test_resource_id_unique() {
        assert_ne!(ResourceId::new(), ResourceId::new());
    }
}
