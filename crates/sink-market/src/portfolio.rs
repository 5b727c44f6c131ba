//! Request portfolios and capacity constraints.

use std::sync::Arc;

use sink_core::{Commodity, FacilityId, Quantity, Resource};

/// Upper bound on the total quantity a matcher may allocate across every
/// request line of a portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityConstraint {
    capacity: Quantity,
}

impl CapacityConstraint {
    pub fn new(capacity: Quantity) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> Quantity {
        self.capacity
    }
}

/// One request line: "send me up to `target.quantity()` of `commodity`".
///
/// Lines of the same portfolio may share a single target through the `Arc`.
#[derive(Debug, Clone)]
pub struct Request<R> {
    target: Arc<R>,
    requester: FacilityId,
    commodity: Commodity,
}

impl<R: Resource> Request<R> {
    pub fn target(&self) -> &Arc<R> {
        &self.target
    }

    pub fn requester(&self) -> FacilityId {
        self.requester
    }

    pub fn commodity(&self) -> &Commodity {
        &self.commodity
    }

    /// Nominal amount of this line.
    pub fn quantity(&self) -> Quantity {
        self.target.quantity()
    }
}

/// Request lines submitted together by one requester, sharing constraints.
#[derive(Debug, Clone)]
pub struct RequestPortfolio<R> {
    requester: FacilityId,
    requests: Vec<Request<R>>,
    constraints: Vec<CapacityConstraint>,
}

/// Set of independent portfolios submitted for one resource kind.
pub type Portfolios<R> = Vec<RequestPortfolio<R>>;

impl<R: Resource> RequestPortfolio<R> {
    pub fn new(requester: FacilityId) -> Self {
        Self {
            requester,
            requests: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn requester(&self) -> FacilityId {
        self.requester
    }

    /// Append a request line owned by this portfolio's requester.
    pub fn add_request(&mut self, target: Arc<R>, commodity: Commodity) -> &Request<R> {
        self.requests.push(Request {
            target,
            requester: self.requester,
            commodity,
        });
        &self.requests[self.requests.len() - 1]
    }

    pub fn add_constraint(&mut self, constraint: CapacityConstraint) {
        self.constraints.push(constraint);
    }

    pub fn requests(&self) -> &[Request<R>] {
        &self.requests
    }

    pub fn constraints(&self) -> &[CapacityConstraint] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Sum of the nominal line amounts.
    pub fn requested_total(&self) -> Quantity {
        self.requests.iter().map(Request::quantity).sum()
    }

    /// Largest total a matcher may allocate to this portfolio.
    ///
    /// The tightest constraint wins; with no constraints the lines'
    /// nominal amounts are the only bound.
    pub fn max_allocatable(&self) -> Quantity {
        self.constraints
            .iter()
            .map(CapacityConstraint::capacity)
            .min()
            .unwrap_or_else(|| self.requested_total())
    }

    /// Check whether a proposed total allocation respects every constraint.
    pub fn admits(&self, total: Quantity) -> bool {
        total <= self.max_allocatable()
    }
}
