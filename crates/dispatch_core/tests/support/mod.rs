#![allow(dead_code)]

use dispatch_core::{Booking, City, DispatchRegistry, ManualClock};

pub const PUNE_FLEET: [(&str, City); 3] = [("C1", City::Pune), ("C2", City::Pune), ("C3", City::Pune)];

/// Books a trip, starts it, lets `duration_ms` pass and ends it.
pub fn run_trip(
    registry: &DispatchRegistry,
    clock: &ManualClock,
    source: City,
    destination: City,
    duration_ms: u64,
) -> Booking {
    let booking = registry
        .query_booking(source, destination)
        .expect("a cab should be available");
    registry.start_trip(booking.booking_id).expect("start");
    clock.advance(duration_ms);
    registry.end_trip(booking.booking_id).expect("end");
    booking
}
