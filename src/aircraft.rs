use crate::error::{AerodromeError, Result};
use crate::time::Time;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::Arc;

pub type AircraftId = Arc<str>;

const TYPES: [&str; 10] = [
    "AN-2", "IL-14", "TU-104", "IL-18", "AN-24", "TU-134", "IL-62", "YAK-40", "TU-144", "IL-86",
];

/// An aircraft waiting for a runway.
///
/// `remaining_time` is owned by whichever runway queues the aircraft: the runway
/// rewrites it whenever its queue changes and decrements it once per tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aircraft {
    id: AircraftId,
    nominal_duration: Time,
    remaining_time: Time,
    emergency: bool,
}

impl Aircraft {
    /// Upper bound on a single landing duration; keeps every queue's running sum
    /// far away from `i64` overflow.
    pub const MAX_DURATION: i64 = u32::MAX as i64;

    pub fn new(id: impl Into<AircraftId>, nominal_duration: i64, emergency: bool) -> Result<Aircraft> {
        let id = id.into();
        if !(1..=Self::MAX_DURATION).contains(&nominal_duration) {
            return Err(AerodromeError::InvalidDuration {
                id,
                duration: Time(nominal_duration),
            });
        }
        Ok(Aircraft {
            id,
            nominal_duration: Time(nominal_duration),
            remaining_time: Time(nominal_duration),
            emergency,
        })
    }

    /// Random inbound traffic: a type designator with a numeric suffix, 15 to 60
    /// units to land, emergency one time in two.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Aircraft {
        let kind = TYPES.choose(rng).copied().unwrap_or(TYPES[0]);
        let duration = Time(rng.gen_range(15..=60));
        Aircraft {
            id: format!("{}-{}", kind, rng.gen_range(10..=100u32)).into(),
            nominal_duration: duration,
            remaining_time: duration,
            emergency: rng.gen_bool(0.5),
        }
    }

    pub fn id(&self) -> &AircraftId {
        &self.id
    }

    pub fn nominal_duration(&self) -> Time {
        self.nominal_duration
    }

    pub fn remaining_time(&self) -> Time {
        self.remaining_time
    }

    pub fn is_emergency(&self) -> bool {
        self.emergency
    }

    pub fn has_landed(&self) -> bool {
        self.remaining_time.is_elapsed()
    }

    pub(crate) fn reduce_remaining(&mut self, delta: Time) {
        self.remaining_time -= delta;
    }

    pub(crate) fn set_remaining(&mut self, remaining: Time) {
        self.remaining_time = remaining;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_aircraft_starts_with_its_own_duration() {
        let ac = Aircraft::new("AN2-12", 20, false).unwrap();
        assert_eq!(Time(20), ac.nominal_duration());
        assert_eq!(Time(20), ac.remaining_time());
        assert!(!ac.is_emergency());
        assert!(!ac.has_landed());
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        assert!(matches!(
            Aircraft::new("IL14-20", 0, false),
            Err(AerodromeError::InvalidDuration { duration: Time(0), .. })
        ));
        assert!(matches!(
            Aircraft::new("IL14-20", -5, true),
            Err(AerodromeError::InvalidDuration { duration: Time(-5), .. })
        ));
    }

    #[test]
    fn test_rejects_duration_above_bound() {
        assert!(Aircraft::new("IL62-15", Aircraft::MAX_DURATION, false).is_ok());
        assert!(matches!(
            Aircraft::new("IL62-15", Aircraft::MAX_DURATION + 1, false),
            Err(AerodromeError::InvalidDuration { .. })
        ));
        assert!(matches!(
            Aircraft::new("IL62-15", i64::MAX, true),
            Err(AerodromeError::InvalidDuration { duration: Time(i64::MAX), .. })
        ));
    }

    #[test]
    fn test_random_aircraft_is_valid() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let ac = Aircraft::random(&mut rng);
            assert!((15..=60).contains(&ac.nominal_duration().0));
            assert_eq!(ac.nominal_duration(), ac.remaining_time());
            assert!(TYPES.iter().any(|t| ac.id().starts_with(&format!("{}-", t))));
        }
    }

    #[test]
    fn test_reduce_remaining_can_overshoot() {
        let mut ac = Aircraft::new("TU104-33", 3, false).unwrap();
        ac.reduce_remaining(Time(2));
        assert_eq!(Time(1), ac.remaining_time());
        ac.reduce_remaining(Time(2));
        assert_eq!(Time(-1), ac.remaining_time());
        assert!(ac.has_landed());
    }
}
