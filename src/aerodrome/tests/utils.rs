use crate::aerodrome::Aerodrome;
use crate::aircraft::{Aircraft, AircraftId};
use proptest::prelude::*;
use std::sync::Arc;

pub fn id(s: &str) -> AircraftId {
    Arc::from(s)
}

pub fn aerodrome(runways: usize) -> Aerodrome {
    Aerodrome::new(runways).unwrap()
}

pub fn add_aircraft(aerodrome: &mut Aerodrome, aircraft_id: &str, duration: i64, emergency: bool) -> usize {
    aerodrome
        .assign(Aircraft::new(aircraft_id, duration, emergency).unwrap())
        .unwrap()
}

pub fn queue_ids(aerodrome: &Aerodrome, runway: usize) -> Vec<AircraftId> {
    aerodrome.runways()[runway]
        .queue()
        .iter()
        .map(|ac| ac.id().clone())
        .collect()
}

pub fn queue_times(aerodrome: &Aerodrome, runway: usize) -> Vec<i64> {
    aerodrome.runways()[runway]
        .queue()
        .iter()
        .map(|ac| ac.remaining_time().0)
        .collect()
}

pub fn assert_invariants(aerodrome: &Aerodrome) {
    for (idx, runway) in aerodrome.runways().iter().enumerate() {
        let mut total = 0;
        for ac in runway.queue() {
            total += ac.nominal_duration().0;
            assert_eq!(
                total,
                ac.remaining_time().0,
                "prefix sum broken for {} on runway {}",
                ac.id(),
                idx
            );
        }
        let first_regular = runway
            .queue()
            .iter()
            .position(|ac| !ac.is_emergency())
            .unwrap_or(runway.len());
        assert!(
            runway.queue()[first_regular..].iter().all(|ac| !ac.is_emergency()),
            "emergency behind regular traffic on runway {}",
            idx
        );
    }
}

#[derive(Debug, Clone)]
pub enum Op {
    Add { id: AircraftId, duration: i64, emergency: bool },
    GoAround(AircraftId),
    Divert(AircraftId),
}

pub fn arb_id() -> impl Strategy<Value = AircraftId> {
    prop_oneof![
        Just(id("AN2-10")),
        Just(id("IL14-22")),
        Just(id("TU104-31")),
        Just(id("IL18-47")),
        Just(id("AN24-55")),
        Just(id("YAK40-68")),
    ]
}

pub fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (arb_id(), 1..60i64, any::<bool>())
            .prop_map(|(id, duration, emergency)| Op::Add { id, duration, emergency }),
        1 => arb_id().prop_map(Op::GoAround),
        1 => arb_id().prop_map(Op::Divert),
    ]
}
