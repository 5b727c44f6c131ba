//! Resource kinds exchanged between facilities.
//!
//! Two kinds exist: typed materials (identity + isotopic composition) and
//! generic resources (quantity + quality/unit labels). Capacity accounting
//! treats both the same; the matching process is kind-specific, so the
//! [`Resource`] trait lets one algorithm be instantiated for each kind.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::ResourceId;
use crate::quantity::Quantity;

/// Resource kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Material,
    GenericResource,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::GenericResource => "generic_resource",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability shared by both resource kinds.
pub trait Resource: Clone + fmt::Debug + Send + Sync + 'static {
    /// Which kind this type represents.
    const KIND: ResourceKind;

    /// Amount carried by this resource object.
    fn quantity(&self) -> Quantity;

    /// Untracked stand-in of the given size, used as a request target.
    fn placeholder(quantity: Quantity) -> Self;

    /// Wrap for storage in a mixed-kind inventory.
    fn into_stored(self) -> StoredResource;
}

/// Isotopic composition as nuclide id -> mass fraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition(BTreeMap<u32, Decimal>);

impl Composition {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_fractions(fractions: impl IntoIterator<Item = (u32, Decimal)>) -> Self {
        Self(fractions.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fraction(&self, nuclide: u32) -> Decimal {
        self.0.get(&nuclide).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &Decimal)> {
        self.0.iter()
    }
}

/// Typed material with optional tracked identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// `None` for untracked objects such as request placeholders.
    pub id: Option<ResourceId>,
    pub quantity: Quantity,
    pub composition: Composition,
}

impl Material {
    /// Create a tracked material.
    pub fn new(quantity: Quantity, composition: Composition) -> Self {
        Self {
            id: Some(ResourceId::new()),
            quantity,
            composition,
        }
    }

    /// Untracked material with an empty composition.
    pub fn blank(quantity: Quantity) -> Self {
        Self {
            id: None,
            quantity,
            composition: Composition::empty(),
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.id.is_some()
    }
}

impl Resource for Material {
    const KIND: ResourceKind = ResourceKind::Material;

    fn quantity(&self) -> Quantity {
        self.quantity
    }

    fn placeholder(quantity: Quantity) -> Self {
        Self::blank(quantity)
    }

    fn into_stored(self) -> StoredResource {
        StoredResource::Material(self)
    }
}

/// Untyped resource described only by labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericResource {
    pub id: Option<ResourceId>,
    pub quantity: Quantity,
    pub quality: String,
    pub units: String,
}

impl GenericResource {
    /// Create a tracked generic resource.
    pub fn new(quantity: Quantity, quality: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            id: Some(ResourceId::new()),
            quantity,
            quality: quality.into(),
            units: units.into(),
        }
    }

    /// Create an untracked generic resource.
    pub fn untracked(
        quantity: Quantity,
        quality: impl Into<String>,
        units: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            quantity,
            quality: quality.into(),
            units: units.into(),
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.id.is_some()
    }
}

impl Resource for GenericResource {
    const KIND: ResourceKind = ResourceKind::GenericResource;

    fn quantity(&self) -> Quantity {
        self.quantity
    }

    // Quality and unit labels have no agreed meaning yet, so both stay empty.
    fn placeholder(quantity: Quantity) -> Self {
        Self::untracked(quantity, "", "")
    }

    fn into_stored(self) -> StoredResource {
        StoredResource::Generic(self)
    }
}

/// A resource of either kind as held in an inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredResource {
    Material(Material),
    Generic(GenericResource),
}

impl StoredResource {
    pub fn quantity(&self) -> Quantity {
        match self {
            Self::Material(m) => m.quantity,
            Self::Generic(g) => g.quantity,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Material(_) => ResourceKind::Material,
            Self::Generic(_) => ResourceKind::GenericResource,
        }
    }
}
