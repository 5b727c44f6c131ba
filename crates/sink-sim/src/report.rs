//! End-of-run summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sink_core::{FacilityId, Period, Quantity};
use sink_facility::SinkFacility;
use sink_market::Trader;

/// State of one facility at the end of a run.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityReport {
    pub id: FacilityId,
    pub name: String,
    pub held: Quantity,
    pub capacity: Quantity,
    pub resources: usize,
    pub status: String,
}

impl From<&SinkFacility> for FacilityReport {
    fn from(facility: &SinkFacility) -> Self {
        Self {
            id: facility.id(),
            name: facility.name().to_string(),
            held: facility.held_quantity(),
            capacity: facility.inventory().capacity(),
            resources: facility.inventory().count(),
            status: facility.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub periods: Period,
    pub facilities: Vec<FacilityReport>,
}

impl RunSummary {
    pub fn new(started_at: DateTime<Utc>, periods: Period, facilities: &[SinkFacility]) -> Self {
        Self {
            started_at,
            periods,
            facilities: facilities.iter().map(FacilityReport::from).collect(),
        }
    }

    /// Total held across all facilities.
    pub fn total_held(&self) -> Quantity {
        self.facilities.iter().map(|f| f.held).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
