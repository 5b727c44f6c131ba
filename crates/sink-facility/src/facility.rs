//! The sink facility: a passive consumer of one or more commodities.
//!
//! Each period the facility asks for as much as it can reasonably take,
//! bounded by its per-period throughput and remaining inventory space, and
//! stores whatever the matcher sends back. It never gives anything away.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use sink_core::{
    Commodity, FacilityId, GenericResource, Material, Period, Quantity, Resource, StoredResource,
};
use sink_market::{Portfolios, TimeListener, TradeResponse, Trader};
use sink_telemetry::Metrics;
use tracing::{debug, error, trace};

use crate::config::SinkConfig;
use crate::error::{FacilityError, FacilityResult};
use crate::inventory::ResourceBuffer;
use crate::requests::build_requests;
use crate::throughput::request_amount;

/// Capacity-bounded sink.
#[derive(Debug)]
pub struct SinkFacility {
    id: FacilityId,
    name: String,
    config: SinkConfig,
    inventory: ResourceBuffer,
}

impl SinkFacility {
    /// Create a facility with an empty inventory.
    ///
    /// Fails if the configuration has no commodities or non-positive limits.
    pub fn new(id: FacilityId, name: impl Into<String>, config: SinkConfig) -> FacilityResult<Self> {
        config.validate()?;
        let inventory = ResourceBuffer::new(config.max_inventory_size());
        Ok(Self {
            id,
            name: name.into(),
            config,
            inventory,
        })
    }

    /// New instance with the same configuration and an empty inventory.
    pub fn clone_fresh(&self, id: FacilityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            config: self.config.clone(),
            inventory: ResourceBuffer::new(self.config.max_inventory_size()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    pub fn commodities(&self) -> &[Commodity] {
        &self.config.commodities
    }

    pub fn inventory(&self) -> &ResourceBuffer {
        &self.inventory
    }

    /// Quantity currently held.
    pub fn held_quantity(&self) -> Quantity {
        self.inventory.quantity()
    }

    /// Per-commodity amount the facility is willing to receive this period.
    pub fn request_amount(&self) -> Quantity {
        request_amount(
            self.inventory.space(),
            self.config.throughput_capacity(),
            self.config.commodities.len(),
        )
    }

    /// Portfolios of one resource kind for this period.
    pub fn requests<R: Resource>(&self) -> Portfolios<R> {
        let ports = build_requests::<R>(self.id, &self.config.commodities, self.request_amount());
        trace!(
            facility = %self.name,
            kind = %R::KIND,
            portfolios = ports.len(),
            "Built request portfolios"
        );
        ports
    }

    /// Commit fills of one resource kind into the inventory.
    ///
    /// The matcher is trusted to respect the portfolio constraint. If it
    /// did not and the batch would overflow the inventory, nothing is
    /// stored and `CapacityExceeded` is returned; quantities are never
    /// clamped.
    pub fn accept_trades<R: Resource>(
        &mut self,
        responses: Vec<TradeResponse<R>>,
    ) -> FacilityResult<()> {
        if responses.is_empty() {
            return Ok(());
        }

        let resources: Vec<StoredResource> = responses
            .into_iter()
            .map(|(trade, resource)| {
                trace!(
                    facility = %self.name,
                    commodity = %trade.commodity(),
                    supplier = trade.supplier(),
                    quantity = %resource.quantity(),
                    "Accepting trade"
                );
                resource.into_stored()
            })
            .collect();
        let quantities: Vec<Quantity> = resources.iter().map(StoredResource::quantity).collect();

        if let Err(overflow) = self.inventory.push_all(resources) {
            error!(
                facility = %self.name,
                id = %self.id,
                held = %overflow.held,
                offered = %overflow.offered,
                capacity = %overflow.capacity,
                "Matcher allocated beyond inventory capacity"
            );
            return Err(FacilityError::CapacityExceeded {
                facility: self.id,
                held: overflow.held,
                offered: overflow.offered,
                capacity: overflow.capacity,
            });
        }

        for qty in quantities {
            Metrics::trade_accepted(&self.name, R::KIND.as_str(), to_f64(qty));
        }
        Metrics::inventory_held(&self.name, to_f64(self.inventory.quantity()));
        Ok(())
    }
}

fn to_f64(q: Quantity) -> f64 {
    q.inner().to_f64().unwrap_or(f64::MAX)
}

impl fmt::Display for SinkFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id {}) accepts commodities ", self.name, self.id)?;
        for (i, commodity) in self.config.commodities.iter().enumerate() {
            f.write_str(if i == 0 { "{" } else { ", " })?;
            write!(f, "{commodity}")?;
        }
        write!(
            f,
            "}} until its inventory is full at {} kg.",
            self.inventory.capacity()
        )
    }
}

impl Trader for SinkFacility {
    type Error = FacilityError;

    fn id(&self) -> FacilityId {
        self.id
    }

    fn material_requests(&self) -> Portfolios<Material> {
        self.requests::<Material>()
    }

    fn generic_requests(&self) -> Portfolios<GenericResource> {
        self.requests::<GenericResource>()
    }

    fn accept_material_trades(
        &mut self,
        responses: Vec<TradeResponse<Material>>,
    ) -> FacilityResult<()> {
        self.accept_trades(responses)
    }

    fn accept_generic_trades(
        &mut self,
        responses: Vec<TradeResponse<GenericResource>>,
    ) -> FacilityResult<()> {
        self.accept_trades(responses)
    }
}

impl TimeListener for SinkFacility {
    fn tick(&self, period: Period) {
        let amount = self.request_amount();
        debug!(facility = %self.name, id = %self.id, period, "Tick");
        Metrics::request_amount(&self.name, to_f64(amount));

        if amount.exceeds_eps() {
            for commodity in &self.config.commodities {
                trace!(
                    facility = %self.name,
                    commodity = %commodity,
                    amount = %amount,
                    "Will request"
                );
            }
        }
    }

    fn tock(&self, period: Period) {
        let held = self.inventory.quantity();
        debug!(
            facility = %self.name,
            id = %self.id,
            period,
            held = %held,
            "Holding at close of period"
        );
        Metrics::inventory_held(&self.name, to_f64(held));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sink_market::Trade;

    fn commods(names: &[&str]) -> Vec<Commodity> {
        names.iter().map(|n| Commodity::new(*n).unwrap()).collect()
    }

    fn sink(capacity: Decimal, inventory: Decimal, names: &[&str]) -> SinkFacility {
        let config = SinkConfig::new(commods(names))
            .with_input_capacity(Quantity::new(capacity))
            .with_inventory_size(Quantity::new(inventory));
        SinkFacility::new(FacilityId::new(1), "sink", config).unwrap()
    }

    /// Fill the first line of the facility's material portfolio with `qty`.
    fn material_fill(facility: &SinkFacility, qty: Decimal) -> Vec<TradeResponse<Material>> {
        let ports = facility.material_requests();
        let req = ports[0].requests()[0].clone();
        let q = Quantity::new(qty);
        vec![(Trade::new(req, "source", q), Material::blank(q))]
    }

    #[test]
    fn test_initial_request_at_tie() {
        let f = sink(dec!(100), dec!(100), &["A"]);
        assert_eq!(f.request_amount(), Quantity::new(dec!(100)));
    }

    #[test]
    fn test_request_shrinks_after_accept() {
        let mut f = sink(dec!(100), dec!(100), &["A"]);
        let fill = material_fill(&f, dec!(40));
        f.accept_material_trades(fill).unwrap();

        assert_eq!(f.held_quantity(), Quantity::new(dec!(40)));
        assert_eq!(f.inventory().space(), Quantity::new(dec!(60)));
        assert_eq!(f.request_amount(), Quantity::new(dec!(60)));
    }

    #[test]
    fn test_throughput_split_over_commodities() {
        let f = sink(dec!(50), dec!(100), &["A", "B"]);
        assert_eq!(f.request_amount(), Quantity::new(dec!(25)));

        let ports = f.material_requests();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].len(), 2);
        assert_eq!(ports[0].max_allocatable(), Quantity::new(dec!(25)));
    }

    #[test]
    fn test_full_inventory_emits_nothing() {
        let mut f = sink(dec!(100), dec!(100), &["A"]);
        let fill = material_fill(&f, dec!(100));
        f.accept_material_trades(fill).unwrap();

        assert_eq!(f.request_amount(), Quantity::ZERO);
        assert!(f.material_requests().is_empty());
        assert!(f.generic_requests().is_empty());
    }

    #[test]
    fn test_empty_commodities_rejected() {
        let err = SinkFacility::new(FacilityId::new(1), "sink", SinkConfig::new(Vec::new()))
            .unwrap_err();
        assert!(matches!(err, FacilityError::InvalidConfig(_)));
    }

    #[test]
    fn test_both_kinds_share_inventory() {
        let mut f = sink(dec!(100), dec!(100), &["A"]);
        let fill = material_fill(&f, dec!(30));
        f.accept_material_trades(fill).unwrap();

        let ports = f.generic_requests();
        let req = ports[0].requests()[0].clone();
        let q = Quantity::new(dec!(20));
        f.accept_generic_trades(vec![(
            Trade::new(req, "source", q),
            GenericResource::new(q, "", "kg"),
        )])
        .unwrap();

        assert_eq!(f.held_quantity(), Quantity::new(dec!(50)));
        assert_eq!(f.inventory().count(), 2);
    }

    #[test]
    fn test_overflow_is_an_error_and_not_clamped() {
        let mut f = sink(dec!(100), dec!(50), &["A"]);
        let fill = material_fill(&f, dec!(80));

        let err = f.accept_material_trades(fill).unwrap_err();
        assert!(matches!(err, FacilityError::CapacityExceeded { .. }));
        assert_eq!(f.held_quantity(), Quantity::ZERO);
    }

    #[test]
    fn test_clone_fresh_copies_config_not_inventory() {
        let mut original = sink(dec!(50), dec!(100), &["A", "B"]);
        let fill = material_fill(&original, dec!(10));
        original.accept_material_trades(fill).unwrap();

        let mut clone = original.clone_fresh(FacilityId::new(2), "sink_2");
        assert_eq!(clone.config(), original.config());
        assert_eq!(clone.held_quantity(), Quantity::ZERO);
        assert_eq!(clone.id(), FacilityId::new(2));

        let fill = material_fill(&clone, dec!(20));
        clone.accept_material_trades(fill).unwrap();
        assert_eq!(original.held_quantity(), Quantity::new(dec!(10)));
        assert_eq!(clone.held_quantity(), Quantity::new(dec!(20)));
    }

    #[test]
    fn test_status_string() {
        let f = sink(dec!(50), dec!(100), &["A", "B"]);
        assert_eq!(
            f.to_string(),
            "sink (id 1) accepts commodities {A, B} until its inventory is full at 100 kg."
        );
    }

    #[test]
    fn test_hooks_do_not_mutate() {
        let f = sink(dec!(50), dec!(100), &["A"]);
        f.tick(0);
        f.tock(0);
        assert_eq!(f.held_quantity(), Quantity::ZERO);
        assert_eq!(f.request_amount(), Quantity::new(dec!(50)));
    }
}
