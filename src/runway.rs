use crate::aircraft::{Aircraft, AircraftId};
use crate::time::Time;
use serde::Serialize;

/// A single runway and the approach queue in front of it. The front of the queue
/// lands first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Runway {
    queue: Vec<Aircraft>,
}

impl Runway {
    pub fn new() -> Runway {
        Runway::default()
    }

    pub fn queue(&self) -> &[Aircraft] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Emergencies jump to the front, everyone else joins the back.
    pub fn enqueue(&mut self, aircraft: Aircraft) {
        if aircraft.is_emergency() {
            self.queue.insert(0, aircraft);
        } else {
            self.queue.push(aircraft);
        }
        self.recalculate_landing_times();
    }

    /// Load metric used for runway selection.
    pub fn total_landing_time(&self) -> Time {
        self.queue.iter().map(|ac| ac.nominal_duration()).sum()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.queue.iter().position(|ac| &**ac.id() == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Aircraft> {
        let idx = self.position(id)?;
        let aircraft = self.queue.remove(idx);
        self.recalculate_landing_times();
        Some(aircraft)
    }

    /// Sends an aircraft around: it leaves the queue and joins it again under the
    /// usual placement rule, so a non-emergency ends up behind everyone.
    pub fn go_around(&mut self, id: &str) -> bool {
        match self.remove(id) {
            Some(aircraft) => {
                self.enqueue(aircraft);
                true
            }
            None => false,
        }
    }

    /// Moves the clock forward by `delta` and returns the callsigns that landed,
    /// front to back.
    pub fn advance(&mut self, delta: Time) -> Vec<AircraftId> {
        self.queue.iter_mut().for_each(|ac| ac.reduce_remaining(delta));

        let (landed, waiting): (Vec<Aircraft>, Vec<Aircraft>) =
            std::mem::take(&mut self.queue).into_iter().partition(|ac| ac.has_landed());
        self.queue = waiting;

        landed.into_iter().map(|ac| ac.id().clone()).collect()
    }

    fn recalculate_landing_times(&mut self) {
        let mut total = Time::ZERO;
        for aircraft in self.queue.iter_mut() {
            total += aircraft.nominal_duration();
            aircraft.set_remaining(total);
        }
        debug_assert!(self.holds_emergency_prefix());
    }

    fn holds_emergency_prefix(&self) -> bool {
        self.queue
            .iter()
            .skip_while(|ac| ac.is_emergency())
            .all(|ac| !ac.is_emergency())
    }
}
