//! Shared fixtures for sink-sim integration tests.

#![allow(dead_code)]

use mockall::mock;
use rust_decimal::Decimal;
use sink_core::{Commodity, FacilityId, GenericResource, Material, Period, Quantity};
use sink_facility::FacilityError;
use sink_market::{Portfolios, TimeListener, TradeResponse, Trader};
use sink_sim::{SimConfig, Supplier};

mock! {
    pub Participant {}

    impl Trader for Participant {
        type Error = FacilityError;

        fn id(&self) -> FacilityId;
        fn material_requests(&self) -> Portfolios<Material>;
        fn generic_requests(&self) -> Portfolios<GenericResource>;
        fn accept_material_trades(
            &mut self,
            responses: Vec<TradeResponse<Material>>,
        ) -> Result<(), FacilityError>;
        fn accept_generic_trades(
            &mut self,
            responses: Vec<TradeResponse<GenericResource>>,
        ) -> Result<(), FacilityError>;
    }

    impl TimeListener for Participant {
        fn tick(&self, period: Period);
        fn tock(&self, period: Period);
    }
}

pub fn commodity(name: &str) -> Commodity {
    Commodity::new(name).unwrap()
}

pub fn qty(value: Decimal) -> Quantity {
    Quantity::new(value)
}

pub fn material_supplier(name: &str, commod: &str, per_period: Decimal) -> Supplier {
    Supplier::new(
        name,
        commodity(commod),
        sink_core::ResourceKind::Material,
        qty(per_period),
    )
}

/// Sum of traded amounts in a batch.
pub fn traded<R: sink_core::Resource>(responses: &[TradeResponse<R>]) -> Quantity {
    responses.iter().map(|(t, _)| t.amount()).sum()
}

/// One sink prototype fed by one material source.
pub fn single_sink_config(
    commodities: &[&str],
    input_capacity: &str,
    inventory_size: &str,
    supply: &str,
) -> SimConfig {
    let list = commodities
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    let toml_str = format!(
        r#"
        [[prototypes]]
        name = "sink"
        commodities = [{list}]
        input_capacity = "{input_capacity}"
        inventory_size = "{inventory_size}"

        [[facilities]]
        name = "repo"
        prototype = "sink"

        [[suppliers]]
        name = "source"
        commodity = "{first}"
        supply_per_period = "{supply}"
        "#,
        first = commodities[0],
    );
    SimConfig::from_toml(&toml_str).unwrap()
}
