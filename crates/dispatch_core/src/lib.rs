pub mod city;
pub mod clock;
pub mod config;
pub mod error;
pub mod registry;
pub mod selection;
pub mod telemetry;
pub mod trip;
pub mod vehicle;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use city::City;
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::DispatchConfig;
pub use error::{DispatchError, Result};
pub use registry::DispatchRegistry;
pub use trip::{Booking, BookingId, CabId, Trip};
pub use vehicle::{Vehicle, VehicleState};
