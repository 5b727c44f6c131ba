//! Minimal supply-side matcher.
//!
//! Fills portfolios in submission order from fixed per-period supplies.
//! Each portfolio receives at most its `max_allocatable()`, spread over its
//! request lines in order, so a portfolio's shared capacity constraint is
//! never exceeded however many lines it has.

use sink_core::{
    Commodity, Composition, GenericResource, Material, Quantity, Resource, ResourceKind,
};
use sink_market::{Portfolios, Trade, TradeResponse};
use tracing::debug;

use crate::config::SupplierConfig;

/// Resource kinds the matcher can mint when settling a trade.
pub trait Settle: Resource {
    /// Tracked resource object carrying `quantity`.
    fn settle(quantity: Quantity) -> Self;
}

impl Settle for Material {
    fn settle(quantity: Quantity) -> Self {
        Material::new(quantity, Composition::empty())
    }
}

impl Settle for GenericResource {
    fn settle(quantity: Quantity) -> Self {
        GenericResource::new(quantity, "", "")
    }
}

/// A source with a fixed stock per period.
#[derive(Debug, Clone)]
pub struct Supplier {
    pub name: String,
    pub commodity: Commodity,
    pub kind: ResourceKind,
    pub supply_per_period: Quantity,
    remaining: Quantity,
}

impl Supplier {
    pub fn new(
        name: impl Into<String>,
        commodity: Commodity,
        kind: ResourceKind,
        supply_per_period: Quantity,
    ) -> Self {
        Self {
            name: name.into(),
            commodity,
            kind,
            supply_per_period,
            remaining: supply_per_period,
        }
    }

    /// Stock left this period.
    pub fn remaining(&self) -> Quantity {
        self.remaining
    }

    fn offers(&self, commodity: &Commodity, kind: ResourceKind) -> bool {
        self.kind == kind && &self.commodity == commodity && self.remaining.is_positive()
    }
}

impl From<&SupplierConfig> for Supplier {
    fn from(cfg: &SupplierConfig) -> Self {
        Self::new(
            cfg.name.clone(),
            cfg.commodity.clone(),
            cfg.kind,
            cfg.supply_per_period,
        )
    }
}

/// Greedy first-come matcher over a set of suppliers.
#[derive(Debug, Clone, Default)]
pub struct SupplyMatcher {
    suppliers: Vec<Supplier>,
}

impl SupplyMatcher {
    pub fn new(suppliers: Vec<Supplier>) -> Self {
        Self { suppliers }
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    /// Reset every supplier to its full per-period stock.
    pub fn restock(&mut self) {
        for supplier in &mut self.suppliers {
            supplier.remaining = supplier.supply_per_period;
        }
    }

    /// Turn portfolios of one kind into trades against current stock.
    pub fn clear<R: Settle>(&mut self, portfolios: Portfolios<R>) -> Vec<TradeResponse<R>> {
        let mut responses = Vec::new();

        for port in portfolios {
            let mut allowance = port.max_allocatable();

            for req in port.requests() {
                if !allowance.is_positive() {
                    break;
                }
                let mut line_left = req.quantity().min(allowance);

                for supplier in &mut self.suppliers {
                    if !line_left.is_positive() {
                        break;
                    }
                    if !supplier.offers(req.commodity(), R::KIND) {
                        continue;
                    }
                    let amount = line_left.min(supplier.remaining);
                    supplier.remaining = supplier.remaining - amount;
                    line_left = line_left - amount;
                    allowance = allowance - amount;

                    debug!(
                        requester = %req.requester(),
                        supplier = %supplier.name,
                        commodity = %req.commodity(),
                        kind = %R::KIND,
                        amount = %amount,
                        "Matched"
                    );
                    responses.push((
                        Trade::new(req.clone(), supplier.name.clone(), amount),
                        R::settle(amount),
                    ));
                }
            }
        }

        responses
    }
}
