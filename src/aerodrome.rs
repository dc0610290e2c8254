use crate::aircraft::{Aircraft, AircraftId};
use crate::error::{AerodromeError, Result};
use crate::runway::Runway;
use crate::time::Time;
use serde::Serialize;


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Landing {
    pub runway: usize,
    pub id: AircraftId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transfer {
    pub id: AircraftId,
    pub from: usize,
    pub to: usize,
}

/// A fixed set of runways sharing one clock.
#[derive(Debug, Clone, Serialize)]
pub struct Aerodrome {
    runways: Vec<Runway>,
}

impl Aerodrome {
    pub const DEFAULT_RUNWAYS: usize = 2;

    pub fn new(runway_count: usize) -> Result<Aerodrome> {
        if runway_count == 0 {
            return Err(AerodromeError::NoRunways);
        }
        Ok(Aerodrome {
            runways: (0..runway_count).map(|_| Runway::new()).collect(),
        })
    }

    pub fn runway_count(&self) -> usize {
        self.runways.len()
    }

    pub fn runways(&self) -> &[Runway] {
        &self.runways
    }

    pub fn locate(&self, id: &str) -> Option<usize> {
        self.runways.iter().position(|r| r.contains(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    /// Puts the aircraft on the least loaded runway. Equal loads go to the lowest
    /// index. Returns the chosen runway.
    pub fn assign(&mut self, aircraft: Aircraft) -> Result<usize> {
        if self.contains(aircraft.id()) {
            tracing::warn!(id = %aircraft.id(), "rejected duplicate callsign");
            return Err(AerodromeError::DuplicateCallsign(aircraft.id().clone()));
        }

        let mut best = 0;
        let mut best_load = self.runways[0].total_landing_time();
        for (idx, runway) in self.runways.iter().enumerate().skip(1) {
            let load = runway.total_landing_time();
            if load < best_load {
                best = idx;
                best_load = load;
            }
        }

        tracing::debug!(
            id = %aircraft.id(),
            runway = best,
            load = best_load.0,
            emergency = aircraft.is_emergency(),
            "assigned aircraft"
        );
        self.runways[best].enqueue(aircraft);
        Ok(best)
    }

    pub fn send_for_second_round(&mut self, id: &str) -> bool {
        match self.locate(id) {
            Some(idx) => {
                tracing::debug!(id, runway = idx, "go-around");
                self.runways[idx].go_around(id)
            }
            None => false,
        }
    }

    /// Moves the aircraft to the next runway in order, wrapping around. The load on
    /// the destination is not considered.
    pub fn send_to_another_runway(&mut self, id: &str) -> Option<Transfer> {
        let from = self.locate(id)?;
        let to = (from + 1) % self.runway_count();
        let aircraft = self.runways[from].remove(id)?;
        let transfer = Transfer {
            id: aircraft.id().clone(),
            from,
            to,
        };
        self.runways[to].enqueue(aircraft);
        tracing::debug!(id, from, to, "transferred aircraft");
        Some(transfer)
    }

    /// Advances every runway by `delta`. Landings come out in runway order, then in
    /// queue order.
    pub fn tick(&mut self, delta: Time) -> Vec<Landing> {
        self.runways
            .iter_mut()
            .enumerate()
            .flat_map(|(runway, r)| {
                r.advance(delta)
                    .into_iter()
                    .map(move |id| Landing { runway, id })
            })
            .collect()
    }
}

impl Default for Aerodrome {
    fn default() -> Self {
        Aerodrome {
            runways: (0..Self::DEFAULT_RUNWAYS).map(|_| Runway::new()).collect(),
        }
    }
}
