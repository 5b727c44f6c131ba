//! Period loop.

use std::collections::HashMap;

use sink_core::{FacilityId, Period, Quantity, Resource};
use sink_facility::{PrototypeRegistry, SinkFacility};
use sink_market::{Portfolios, TimeListener, TradeResponse, Trader};
use tracing::{info, warn};

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::matcher::{Settle, Supplier, SupplyMatcher};

/// What one period moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodOutcome {
    pub period: Period,
    pub trades: usize,
    pub material_delivered: Quantity,
    pub generic_delivered: Quantity,
}

/// Drives participants through tick, clearing, acceptance and tock.
///
/// Participants are processed one at a time, so each participant's trade
/// acceptance is serialized with respect to its own inventory.
pub struct Simulation<P> {
    participants: Vec<P>,
    matcher: SupplyMatcher,
    period: Period,
}

impl<P> Simulation<P>
where
    P: Trader + TimeListener,
{
    pub fn new(participants: Vec<P>, matcher: SupplyMatcher) -> Self {
        Self {
            participants,
            matcher,
            period: 0,
        }
    }

    pub fn participants(&self) -> &[P] {
        &self.participants
    }

    /// Next period to run.
    pub fn period(&self) -> Period {
        self.period
    }

    /// Run one period.
    ///
    /// Material clears and settles before generic-resource requests are
    /// built, so the second round sees the space the first one used.
    pub fn step(&mut self) -> SimResult<PeriodOutcome> {
        let period = self.period;

        for p in &self.participants {
            p.tick(period);
        }

        self.matcher.restock();
        let (material_trades, material_delivered) = exchange(
            &mut self.participants,
            &mut self.matcher,
            P::material_requests,
            P::accept_material_trades,
        )?;
        let (generic_trades, generic_delivered) = exchange(
            &mut self.participants,
            &mut self.matcher,
            P::generic_requests,
            P::accept_generic_trades,
        )?;

        for p in &self.participants {
            p.tock(period);
        }

        self.period += 1;
        Ok(PeriodOutcome {
            period,
            trades: material_trades + generic_trades,
            material_delivered,
            generic_delivered,
        })
    }

    /// Run `periods` periods, stopping at the first fatal error.
    pub fn run(&mut self, periods: u32) -> SimResult<Vec<PeriodOutcome>> {
        let mut outcomes = Vec::with_capacity(periods as usize);
        for _ in 0..periods {
            let outcome = self.step()?;
            info!(
                period = outcome.period,
                trades = outcome.trades,
                material = %outcome.material_delivered,
                generic = %outcome.generic_delivered,
                "Period cleared"
            );
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

/// One clearing round for a single resource kind: collect, match, deliver.
fn exchange<P, R>(
    participants: &mut [P],
    matcher: &mut SupplyMatcher,
    requests: impl Fn(&P) -> Portfolios<R>,
    accept: impl Fn(&mut P, Vec<TradeResponse<R>>) -> Result<(), P::Error>,
) -> SimResult<(usize, Quantity)>
where
    P: Trader,
    R: Settle,
{
    let portfolios: Portfolios<R> = participants.iter().flat_map(&requests).collect();
    let responses = matcher.clear(portfolios);
    let trades = responses.len();
    let delivered: Quantity = responses.iter().map(|(trade, _)| trade.amount()).sum();

    let mut grouped = by_requester(responses);
    for p in participants.iter_mut() {
        let id = p.id();
        if let Some(batch) = grouped.remove(&id) {
            accept(p, batch).map_err(|e| participant_error(id, e))?;
        }
    }
    for id in grouped.keys() {
        warn!(requester = %id, kind = %R::KIND, "Dropping fills for unknown requester");
    }

    Ok((trades, delivered))
}

fn by_requester<R: Resource>(
    responses: Vec<TradeResponse<R>>,
) -> HashMap<FacilityId, Vec<TradeResponse<R>>> {
    let mut grouped: HashMap<FacilityId, Vec<TradeResponse<R>>> = HashMap::new();
    for response in responses {
        grouped
            .entry(response.0.requester())
            .or_default()
            .push(response);
    }
    grouped
}

fn participant_error<E>(facility: FacilityId, e: E) -> SimError
where
    E: std::error::Error + Send + Sync + 'static,
{
    SimError::Participant {
        facility,
        source: Box::new(e),
    }
}

/// Build sink facilities and suppliers from a run configuration.
pub fn build_simulation(config: &SimConfig) -> SimResult<Simulation<SinkFacility>> {
    config.validate()?;

    let mut registry = PrototypeRegistry::new();
    for proto in &config.prototypes {
        registry.register(proto.name.clone(), proto.sink.clone())?;
    }

    let mut facilities = Vec::new();
    for fac in &config.facilities {
        for name in fac.instance_names() {
            let facility = registry.build(&fac.prototype, name)?;
            info!(status = %facility, "Built facility");
            facilities.push(facility);
        }
    }

    let suppliers = config.suppliers.iter().map(Supplier::from).collect();
    Ok(Simulation::new(facilities, SupplyMatcher::new(suppliers)))
}
