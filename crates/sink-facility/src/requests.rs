//! Request portfolio construction.
//!
//! Written once against [`Resource`] and used for both materials and
//! generic resources.

use std::sync::Arc;

use sink_core::{Commodity, FacilityId, Quantity, Resource};
use sink_market::{CapacityConstraint, Portfolios, RequestPortfolio};

/// Build this period's portfolios for one resource kind.
///
/// Every commodity gets a line requesting the full `amount`, all pointing
/// at one shared placeholder, and the portfolio carries a single capacity
/// constraint of `amount`. The constraint, not the line size, bounds what
/// the matcher may allocate, so it is free to fill any mix of commodities.
///
/// Returns no portfolio when `amount` does not exceed [`Quantity::EPS`] or
/// there are no commodities.
pub fn build_requests<R: Resource>(
    requester: FacilityId,
    commodities: &[Commodity],
    amount: Quantity,
) -> Portfolios<R> {
    if !amount.exceeds_eps() || commodities.is_empty() {
        return Vec::new();
    }

    let target = Arc::new(R::placeholder(amount));
    let mut port = RequestPortfolio::new(requester);
    port.add_constraint(CapacityConstraint::new(amount));
    for commodity in commodities {
        port.add_request(Arc::clone(&target), commodity.clone());
    }

    vec![port]
}
