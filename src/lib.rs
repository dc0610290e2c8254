pub mod aerodrome;
pub mod aircraft;
pub mod board;
pub mod error;
pub mod journal;
pub mod runway;
pub mod scenario;
pub mod time;
pub mod tower;

pub use aerodrome::{Aerodrome, Landing, Transfer};
pub use aircraft::{Aircraft, AircraftId};
pub use error::{AerodromeError, Result};
pub use runway::Runway;
pub use scenario::Scenario;
pub use time::Time;
pub use tower::Tower;
