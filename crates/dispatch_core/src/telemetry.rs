//! Fleet-wide counts for reporting.

use serde::Serialize;

use crate::vehicle::{Vehicle, VehicleState};

/// Aggregated counts at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FleetCounts {
    pub cabs_idle: usize,
    pub cabs_on_trip: usize,
    /// Idle cabs holding a booking that has not started.
    pub cabs_pending: usize,
    /// Bookings that can still be started, ended or cancelled.
    pub open_bookings: usize,
    pub trips_completed: usize,
}

impl FleetCounts {
    pub fn add_vehicle(&mut self, vehicle: &Vehicle) {
        match vehicle.state() {
            VehicleState::Idle => {
                self.cabs_idle += 1;
                if vehicle.has_pending_booking() {
                    self.cabs_pending += 1;
                }
            }
            VehicleState::OnTrip => self.cabs_on_trip += 1,
        }
        self.trips_completed += vehicle.completed_trips();
    }

    pub fn total_cabs(&self) -> usize {
        self.cabs_idle + self.cabs_on_trip
    }
}
