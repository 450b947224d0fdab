use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::city::City;
use crate::clock::Timestamp;

/// Opaque booking identifier issued by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CabId(pub String);

impl CabId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CabId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CabId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One accepted journey, owned by the cab that accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trip {
    pub booking_id: BookingId,
    pub source: City,
    pub destination: City,
    /// Time the booking was accepted.
    pub booked_at: Timestamp,
    /// Set when the trip starts.
    pub started_at: Option<Timestamp>,
    /// Set when the trip ends.
    pub ended_at: Option<Timestamp>,
}

impl Trip {
    pub fn new(booking_id: BookingId, source: City, destination: City, booked_at: Timestamp) -> Self {
        Self {
            booking_id,
            source,
            destination,
            booked_at,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.started_at.is_none()
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_some()
    }

    /// Time from start to end, for completed trips only.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => Some(Duration::from_millis(end.saturating_sub(start))),
            _ => None,
        }
    }
}

/// Receipt returned to the caller for a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Booking {
    pub booking_id: BookingId,
    pub cab_id: CabId,
}
