//! Interfaces the host scheduler and matcher call on a participant.

use sink_core::{FacilityId, GenericResource, Material, Period};

use crate::portfolio::Portfolios;
use crate::trade::TradeResponse;

/// A participant in the per-period resource exchange.
///
/// Request generation only reads participant state; trade acceptance
/// mutates it and must not run concurrently with itself for the same
/// participant.
pub trait Trader {
    /// Error raised when accepted trades cannot be committed.
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> FacilityId;

    /// Material request portfolios for this period.
    fn material_requests(&self) -> Portfolios<Material>;

    /// Generic-resource request portfolios for this period.
    fn generic_requests(&self) -> Portfolios<GenericResource>;

    /// Commit material fills chosen by the matcher.
    fn accept_material_trades(
        &mut self,
        responses: Vec<TradeResponse<Material>>,
    ) -> Result<(), Self::Error>;

    /// Commit generic-resource fills chosen by the matcher.
    fn accept_generic_trades(
        &mut self,
        responses: Vec<TradeResponse<GenericResource>>,
    ) -> Result<(), Self::Error>;
}

/// Per-period callbacks: `tick` before clearing, `tock` after.
pub trait TimeListener {
    fn tick(&self, period: Period);

    fn tock(&self, period: Period);
}
