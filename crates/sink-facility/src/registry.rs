//! Prototype registry.
//!
//! The composition root registers named prototypes once and stamps out
//! facility instances from them. Instances are fresh clones: same
//! configuration, empty inventory, their own id.

use std::collections::HashMap;

use sink_core::FacilityId;
use tracing::info;

use crate::config::SinkConfig;
use crate::error::{FacilityError, FacilityResult};
use crate::facility::SinkFacility;

/// Named sink prototypes and the id allocator for their instances.
#[derive(Debug, Default)]
pub struct PrototypeRegistry {
    prototypes: HashMap<String, SinkFacility>,
    next_id: u32,
}

impl PrototypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> FacilityId {
        let id = FacilityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Validate `config` and register it under `name`.
    pub fn register(&mut self, name: impl Into<String>, config: SinkConfig) -> FacilityResult<()> {
        let name = name.into();
        if self.prototypes.contains_key(&name) {
            return Err(FacilityError::DuplicatePrototype(name));
        }
        config.validate()?;
        let id = self.allocate_id();
        let prototype = SinkFacility::new(id, name.clone(), config)?;
        info!(prototype = %name, status = %prototype, "Registered sink prototype");
        self.prototypes.insert(name, prototype);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    pub fn prototype(&self, name: &str) -> Option<&SinkFacility> {
        self.prototypes.get(name)
    }

    /// Create a new instance of `prototype` called `instance_name`.
    pub fn build(
        &mut self,
        prototype: &str,
        instance_name: impl Into<String>,
    ) -> FacilityResult<SinkFacility> {
        let proto = self
            .prototypes
            .get(prototype)
            .ok_or_else(|| FacilityError::UnknownPrototype(prototype.to_string()))?;
        let instance = proto.clone_fresh(FacilityId::new(self.next_id), instance_name);
        self.next_id += 1;
        Ok(instance)
    }
}
