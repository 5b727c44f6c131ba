//! Trades produced by the matcher.

use sink_core::{Commodity, FacilityId, Quantity, Resource};

use crate::portfolio::Request;

/// A fill decision: `amount` of the requested commodity goes from
/// `supplier` to the request's owner.
#[derive(Debug, Clone)]
pub struct Trade<R> {
    request: Request<R>,
    supplier: String,
    amount: Quantity,
}

/// A trade paired with the resource object that settles it.
pub type TradeResponse<R> = (Trade<R>, R);

impl<R: Resource> Trade<R> {
    pub fn new(request: Request<R>, supplier: impl Into<String>, amount: Quantity) -> Self {
        Self {
            request,
            supplier: supplier.into(),
            amount,
        }
    }

    pub fn request(&self) -> &Request<R> {
        &self.request
    }

    pub fn requester(&self) -> FacilityId {
        self.request.requester()
    }

    pub fn commodity(&self) -> &Commodity {
        self.request.commodity()
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn amount(&self) -> Quantity {
        self.amount
    }
}
