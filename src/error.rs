use crate::aircraft::AircraftId;
use crate::time::Time;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AerodromeError {
    #[error("aircraft {id}: landing duration {duration} is out of range")]
    InvalidDuration { id: AircraftId, duration: Time },

    #[error("aircraft {0} is already queued")]
    DuplicateCallsign(AircraftId),

    #[error("invalid clock: {0}")]
    Clock(String),

    #[error("an aerodrome needs at least one runway")]
    NoRunways,

    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AerodromeError>;
