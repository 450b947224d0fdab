use thiserror::Error;

use crate::city::City;
use crate::trip::{BookingId, CabId};

/// Caller-visible failures of the dispatch registry. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("cab {0} is already registered")]
    DuplicateCab(CabId),
    #[error("no cab available in {0}")]
    NoAvailability(City),
    #[error("unknown booking {0}")]
    UnknownBooking(BookingId),
    #[error("unknown cab {0}")]
    UnknownCab(CabId),
    #[error("booking {0} has already started")]
    TripAlreadyStarted(BookingId),
    #[error("booking {0} has not started")]
    TripNotStarted(BookingId),
    #[error("cab {cab_id} already holds booking {open}")]
    VehicleBusy { cab_id: CabId, open: BookingId },
}

pub type Result<T, E = DispatchError> = std::result::Result<T, E>;
