//! A single cab and its trip lifecycle.
//!
//! States: `Idle --start--> OnTrip --end--> Idle`, and `cancel` rewinds either
//! state back to `Idle`. A cab is never retired; [`Vehicle::reset`] returns it
//! to the state it had right after registration.

use std::collections::HashMap;
use std::time::Duration;

use crate::city::City;
use crate::clock::Timestamp;
use crate::error::{DispatchError, Result};
use crate::trip::{BookingId, CabId, Trip};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleState {
    #[default]
    Idle,
    OnTrip,
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    id: CabId,
    state: VehicleState,
    /// Last known position. Only meaningful while idle.
    city: City,
    /// City the cab was registered at; `reset` returns it here.
    home_city: City,
    trips: HashMap<BookingId, Trip>,
    /// End time of the most recently completed trip, 0 if none.
    last_seen_at: Timestamp,
}

impl Vehicle {
    pub fn new(id: CabId, city: City) -> Self {
        Self {
            id,
            state: VehicleState::Idle,
            city,
            home_city: city,
            trips: HashMap::new(),
            last_seen_at: 0,
        }
    }

    pub fn id(&self) -> &CabId {
        &self.id
    }

    pub fn state(&self) -> VehicleState {
        self.state
    }

    pub fn home_city(&self) -> City {
        self.home_city
    }

    pub fn last_seen_at(&self) -> Timestamp {
        self.last_seen_at
    }

    pub fn in_transit(&self) -> bool {
        self.state == VehicleState::OnTrip
    }

    /// The city the cab can be dispatched from, or `None` while it is on a trip.
    pub fn current_city(&self) -> Option<City> {
        if self.in_transit() {
            None
        } else {
            Some(self.city)
        }
    }

    pub(crate) fn change_city(&mut self, city: City) {
        self.city = city;
    }

    pub(crate) fn change_state(&mut self, state: VehicleState) {
        self.state = state;
    }

    pub fn trip(&self, booking_id: BookingId) -> Option<&Trip> {
        self.trips.get(&booking_id)
    }

    /// Snapshot of every trip this cab holds, ordered by booking id.
    pub fn trips(&self) -> Vec<Trip> {
        let mut trips: Vec<Trip> = self.trips.values().cloned().collect();
        trips.sort_by_key(|trip| trip.booking_id);
        trips
    }

    pub fn completed_trips(&self) -> usize {
        self.trips.values().filter(|trip| trip.is_completed()).count()
    }

    /// The booking the cab is committed to: accepted and not yet ended.
    pub fn open_booking(&self) -> Option<BookingId> {
        self.trips
            .values()
            .find(|trip| trip.ended_at.is_none())
            .map(|trip| trip.booking_id)
    }

    /// True when a booking was accepted but has not started yet.
    pub fn has_pending_booking(&self) -> bool {
        self.trips.values().any(Trip::is_pending)
    }

    /// Records a new trip from the current city. A cab holds at most one
    /// open booking, so the trip always starts from the city it was booked in.
    pub(crate) fn book(
        &mut self,
        booking_id: BookingId,
        destination: City,
        now: Timestamp,
    ) -> Result<()> {
        if let Some(open) = self.open_booking() {
            return Err(DispatchError::VehicleBusy {
                cab_id: self.id.clone(),
                open,
            });
        }
        let trip = Trip::new(booking_id, self.city, destination, now);
        self.trips.insert(booking_id, trip);
        Ok(())
    }

    pub(crate) fn start(&mut self, booking_id: BookingId, now: Timestamp) -> Result<()> {
        let trip = self
            .trips
            .get_mut(&booking_id)
            .ok_or(DispatchError::UnknownBooking(booking_id))?;
        if trip.started_at.is_some() {
            return Err(DispatchError::TripAlreadyStarted(booking_id));
        }

        trip.started_at = Some(now);
        self.change_state(VehicleState::OnTrip);
        Ok(())
    }

    pub(crate) fn end(&mut self, booking_id: BookingId, now: Timestamp) -> Result<()> {
        let trip = self
            .trips
            .get_mut(&booking_id)
            .ok_or(DispatchError::UnknownBooking(booking_id))?;
        if trip.started_at.is_none() {
            return Err(DispatchError::TripNotStarted(booking_id));
        }
        if trip.ended_at.is_some() {
            return Err(DispatchError::UnknownBooking(booking_id));
        }

        trip.ended_at = Some(now);
        let destination = trip.destination;
        self.change_city(destination);
        self.change_state(VehicleState::Idle);
        self.last_seen_at = now;
        Ok(())
    }

    /// Drops the trip. The city is untouched because booking never moved it.
    pub(crate) fn cancel(&mut self, booking_id: BookingId) -> Result<()> {
        self.trips
            .remove(&booking_id)
            .ok_or(DispatchError::UnknownBooking(booking_id))?;
        self.change_state(VehicleState::Idle);
        Ok(())
    }

    /// Time in `[from, to]` not spent on completed trips.
    ///
    /// Only trips that lie strictly inside the window are subtracted; a trip
    /// that straddles either edge counts as idle time. This is an
    /// approximation and is kept as such.
    pub fn idle_time(&self, from: Timestamp, to: Timestamp) -> Duration {
        let window = to.saturating_sub(from);
        let busy: u64 = self
            .trips
            .values()
            .filter_map(|trip| match (trip.started_at, trip.ended_at) {
                (Some(start), Some(end)) if from < start && end < to => Some(end - start),
                _ => None,
            })
            .sum();
        Duration::from_millis(window.saturating_sub(busy))
    }

    pub(crate) fn reset(&mut self) {
        self.state = VehicleState::Idle;
        self.city = self.home_city;
        self.trips.clear();
        self.last_seen_at = 0;
    }
}
