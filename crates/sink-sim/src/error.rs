//! Simulation error types.

use sink_core::FacilityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Facility error: {0}")]
    Facility(#[from] sink_facility::FacilityError),

    /// A participant refused the fills delivered to it. Fatal for the run.
    #[error("Participant {facility} rejected trades: {source}")]
    Participant {
        facility: FacilityId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
