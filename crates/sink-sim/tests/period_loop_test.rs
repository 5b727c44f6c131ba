//! Period loop integration tests.
//!
//! Tests the ordering the loop guarantees to a participant:
//! - tick first, then material and generic rounds, then tock
//! - fills delivered only to the participant that asked
//! - participant errors abort the period

mod integration;
use integration::common::{commodity, material_supplier, qty, traded, MockParticipant};

use mockall::predicate::eq;
use mockall::Sequence;
use rust_decimal_macros::dec;
use sink_core::{FacilityId, GenericResource, Material};
use sink_facility::{build_requests, FacilityError};
use sink_sim::{SimError, Simulation, SupplyMatcher};

fn requesting(id: u32, amount: rust_decimal::Decimal) -> MockParticipant {
    let mut p = MockParticipant::new();
    p.expect_id().return_const(FacilityId::new(id));
    p.expect_material_requests().returning(move || {
        build_requests::<Material>(FacilityId::new(id), &[commodity("A")], qty(amount))
    });
    p.expect_generic_requests().returning(Vec::new);
    p
}

#[test]
fn test_hooks_wrap_clearing_in_order() {
    let mut seq = Sequence::new();
    let mut p = MockParticipant::new();
    p.expect_id().return_const(FacilityId::new(1));

    p.expect_tick()
        .with(eq(0))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    p.expect_material_requests()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| build_requests::<Material>(FacilityId::new(1), &[commodity("A")], qty(dec!(10))));
    p.expect_accept_material_trades()
        .withf(|responses| traded(responses) == qty(dec!(10)))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    p.expect_generic_requests()
        .times(1)
        .in_sequence(&mut seq)
        .returning(Vec::new);
    p.expect_tock()
        .with(eq(0))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    p.expect_accept_generic_trades().never();

    let matcher = SupplyMatcher::new(vec![material_supplier("src", "A", dec!(50))]);
    let mut sim = Simulation::new(vec![p], matcher);

    let outcome = sim.step().unwrap();
    assert_eq!(outcome.trades, 1);
    assert_eq!(outcome.material_delivered, qty(dec!(10)));
}

#[test]
fn test_no_fills_means_no_accept_call() {
    let mut p = requesting(1, dec!(10));
    p.expect_tick().return_const(());
    p.expect_tock().return_const(());
    p.expect_accept_material_trades().never();
    p.expect_accept_generic_trades().never();

    // Nobody supplies commodity "A".
    let matcher = SupplyMatcher::new(vec![material_supplier("src", "B", dec!(50))]);
    let mut sim = Simulation::new(vec![p], matcher);

    let outcome = sim.step().unwrap();
    assert_eq!(outcome.trades, 0);
}

#[test]
fn test_fills_routed_to_requester() {
    let mut first = requesting(1, dec!(30));
    first.expect_tick().return_const(());
    first.expect_tock().return_const(());
    first
        .expect_accept_material_trades()
        .withf(|responses| {
            responses.iter().all(|(t, _)| t.requester() == FacilityId::new(1))
                && traded(responses) == qty(dec!(30))
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut second = requesting(2, dec!(30));
    second.expect_tick().return_const(());
    second.expect_tock().return_const(());
    second
        .expect_accept_material_trades()
        .withf(|responses| {
            responses.iter().all(|(t, _)| t.requester() == FacilityId::new(2))
                && traded(responses) == qty(dec!(10))
        })
        .times(1)
        .returning(|_| Ok(()));

    let matcher = SupplyMatcher::new(vec![material_supplier("src", "A", dec!(40))]);
    let mut sim = Simulation::new(vec![first, second], matcher);

    let outcome = sim.step().unwrap();
    assert_eq!(outcome.material_delivered, qty(dec!(40)));
}

#[test]
fn test_rejected_trades_abort_run() {
    let mut p = requesting(4, dec!(10));
    p.expect_tick().return_const(());
    p.expect_tock().never();
    p.expect_accept_material_trades().times(1).returning(|_| {
        Err(FacilityError::CapacityExceeded {
            facility: FacilityId::new(4),
            held: qty(dec!(95)),
            offered: qty(dec!(10)),
            capacity: qty(dec!(100)),
        })
    });

    let matcher = SupplyMatcher::new(vec![material_supplier("src", "A", dec!(50))]);
    let mut sim = Simulation::new(vec![p], matcher);

    let err = sim.run(3).unwrap_err();
    match err {
        SimError::Participant { facility, source } => {
            assert_eq!(facility, FacilityId::new(4));
            assert!(source.to_string().contains("capacity"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sim.period(), 0);
}

#[test]
fn test_unknown_requester_fills_dropped() {
    let mut p = MockParticipant::new();
    p.expect_id().return_const(FacilityId::new(1));
    p.expect_tick().return_const(());
    p.expect_tock().return_const(());
    // Portfolio claims a requester that is not in the simulation.
    p.expect_material_requests().returning(|| {
        build_requests::<Material>(FacilityId::new(99), &[commodity("A")], qty(dec!(5)))
    });
    p.expect_generic_requests()
        .returning(Vec::<sink_market::RequestPortfolio<GenericResource>>::new);
    p.expect_accept_material_trades().never();

    let matcher = SupplyMatcher::new(vec![material_supplier("src", "A", dec!(50))]);
    let mut sim = Simulation::new(vec![p], matcher);

    let outcome = sim.step().unwrap();
    assert_eq!(outcome.trades, 1);
    assert_eq!(sim.period(), 1);
}
