use crate::aerodrome::Aerodrome;
use crate::aircraft::{Aircraft, AircraftId};
use crate::error::{AerodromeError, Result};
use crate::time::Time;
use crate::tower::validate_clock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAircraft {
    pub id: AircraftId,
    pub duration: i64,
    #[serde(default)]
    pub emergency: bool,
}

/// Start-up description of the field: how many runways, how fast the clock runs
/// and which traffic is already inbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub runways: usize,
    pub tick_period_ms: u64,
    pub tick_delta: i64,
    pub aircraft: Vec<ScenarioAircraft>,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            runways: Aerodrome::DEFAULT_RUNWAYS,
            tick_period_ms: 1000,
            tick_delta: 1,
            aircraft: vec![],
        }
    }
}

impl Scenario {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&data)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        if self.runways == 0 {
            return Err(AerodromeError::NoRunways);
        }
        validate_clock(self.tick_period(), self.tick_delta())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn tick_delta(&self) -> Time {
        Time(self.tick_delta)
    }

    /// Builds the aerodrome and assigns the inbound traffic in file order.
    pub fn build(&self) -> Result<Aerodrome> {
        self.validate()?;
        let aircraft = self
            .aircraft
            .iter()
            .map(|a| Aircraft::new(a.id.clone(), a.duration, a.emergency))
            .collect::<Result<Vec<_>>>()?;

        let mut aerodrome = Aerodrome::new(self.runways)?;
        for ac in aircraft {
            aerodrome.assign(ac)?;
        }
        Ok(aerodrome)
    }
}
