//! The dispatch registry: owns every cab, hands out bookings and routes trip
//! lifecycle calls to the cab that accepted the booking.
//!
//! Cabs live in an arena (`Vec<Vehicle>`) and are never removed, so a slot
//! index is a stable handle. Both the cab-id index and the booking routing
//! table store slots rather than references.
//!
//! All state sits behind one `RwLock`. Every mutation, and in particular the
//! select-then-book sequence of [`DispatchRegistry::query_booking`], runs under
//! the write lock; read-only queries share the read lock. A booked cab leaves
//! the candidate set until its booking ends or is cancelled, so no cab is ever
//! handed to two open bookings.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::city::City;
use crate::clock::{Clock, SystemClock, Timestamp};
use crate::config::DispatchConfig;
use crate::error::{DispatchError, Result};
use crate::selection::{select_longest_idle, Candidate, RandomTieBreaker, TieBreaker};
use crate::telemetry::FleetCounts;
use crate::trip::{Booking, BookingId, CabId, Trip};
use crate::vehicle::Vehicle;

struct RegistryState {
    vehicles: Vec<Vehicle>,
    by_id: HashMap<CabId, usize>,
    /// Open bookings only; entries are dropped when a trip ends or is cancelled.
    bookings: HashMap<BookingId, usize>,
    next_booking_id: u64,
    tie_breaker: Box<dyn TieBreaker>,
}

impl RegistryState {
    fn slot_of_cab(&self, cab_id: &CabId) -> Result<usize> {
        self.by_id
            .get(cab_id)
            .copied()
            .ok_or_else(|| DispatchError::UnknownCab(cab_id.clone()))
    }

    fn slot_of_booking(&self, booking_id: BookingId) -> Result<usize> {
        self.bookings
            .get(&booking_id)
            .copied()
            .ok_or(DispatchError::UnknownBooking(booking_id))
    }

    /// Cabs standing idle in `source` with no open booking, in registration order.
    fn candidates(&self, source: City) -> Vec<Candidate> {
        self.vehicles
            .iter()
            .enumerate()
            .filter(|(_, vehicle)| vehicle.current_city() == Some(source))
            .filter(|(_, vehicle)| vehicle.open_booking().is_none())
            .map(|(slot, vehicle)| Candidate {
                slot,
                last_seen_at: vehicle.last_seen_at(),
            })
            .collect()
    }

    fn issue_booking_id(&mut self) -> BookingId {
        self.next_booking_id += 1;
        BookingId(self.next_booking_id)
    }
}

pub struct DispatchRegistry {
    state: RwLock<RegistryState>,
    clock: Arc<dyn Clock>,
}

impl Default for DispatchRegistry {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}

impl DispatchRegistry {
    /// Registry on the system clock with a random tie breaker seeded from `config`.
    pub fn new(config: DispatchConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: DispatchConfig, clock: Arc<dyn Clock>) -> Self {
        let tie_breaker = Box::new(RandomTieBreaker::new(config.tie_break_seed));
        Self::with_parts(clock, tie_breaker)
    }

    pub fn with_parts(clock: Arc<dyn Clock>, tie_breaker: Box<dyn TieBreaker>) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                vehicles: Vec::new(),
                by_id: HashMap::new(),
                bookings: HashMap::new(),
                next_booking_id: 0,
                tie_breaker,
            }),
            clock,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn len(&self) -> usize {
        self.state.read().vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds an idle cab at `city`. Fails without touching the existing entry
    /// when the id is taken.
    pub fn register_cab(&self, cab_id: impl Into<CabId>, city: City) -> Result<()> {
        let cab_id = cab_id.into();
        let mut state = self.state.write();
        if state.by_id.contains_key(&cab_id) {
            return Err(DispatchError::DuplicateCab(cab_id));
        }

        let slot = state.vehicles.len();
        state.vehicles.push(Vehicle::new(cab_id.clone(), city));
        state.by_id.insert(cab_id.clone(), slot);
        info!(cab = %cab_id, %city, "cab registered");
        Ok(())
    }

    /// Assigns the cab that has been idle longest in `source` to a new trip.
    pub fn query_booking(&self, source: City, destination: City) -> Result<Booking> {
        let mut state = self.state.write();
        let now = self.clock.now();

        let candidates = state.candidates(source);
        let Some(slot) = select_longest_idle(&candidates, state.tie_breaker.as_mut()) else {
            debug!(%source, %destination, "no cab available");
            return Err(DispatchError::NoAvailability(source));
        };

        let booking_id = state.issue_booking_id();
        // Slots come from the arena, which only grows.
        let vehicle = &mut state.vehicles[slot];
        vehicle.book(booking_id, destination, now)?;
        let cab_id = vehicle.id().clone();
        state.bookings.insert(booking_id, slot);

        debug!(
            booking = %booking_id,
            cab = %cab_id,
            %source,
            %destination,
            candidates = candidates.len(),
            "cab assigned"
        );
        Ok(Booking { booking_id, cab_id })
    }

    pub fn start_trip(&self, booking_id: BookingId) -> Result<()> {
        let mut state = self.state.write();
        let slot = state.slot_of_booking(booking_id)?;
        let now = self.clock.now();
        state.vehicles[slot].start(booking_id, now)?;
        debug!(booking = %booking_id, cab = %state.vehicles[slot].id(), "trip started");
        Ok(())
    }

    pub fn end_trip(&self, booking_id: BookingId) -> Result<()> {
        let mut state = self.state.write();
        let slot = state.slot_of_booking(booking_id)?;
        let now = self.clock.now();
        state.vehicles[slot].end(booking_id, now)?;
        state.bookings.remove(&booking_id);
        debug!(booking = %booking_id, cab = %state.vehicles[slot].id(), "trip ended");
        Ok(())
    }

    pub fn cancel_trip(&self, booking_id: BookingId) -> Result<()> {
        let mut state = self.state.write();
        let slot = state.slot_of_booking(booking_id)?;
        state.vehicles[slot].cancel(booking_id)?;
        state.bookings.remove(&booking_id);
        debug!(booking = %booking_id, cab = %state.vehicles[slot].id(), "trip cancelled");
        Ok(())
    }

    /// Read-only snapshot of a cab.
    pub fn vehicle(&self, cab_id: &CabId) -> Result<Vehicle> {
        let state = self.state.read();
        let slot = state.slot_of_cab(cab_id)?;
        Ok(state.vehicles[slot].clone())
    }

    pub fn trips(&self, cab_id: &CabId) -> Result<Vec<Trip>> {
        let state = self.state.read();
        let slot = state.slot_of_cab(cab_id)?;
        Ok(state.vehicles[slot].trips())
    }

    pub fn idle_time(&self, cab_id: &CabId, from: Timestamp, to: Timestamp) -> Result<Duration> {
        let state = self.state.read();
        let slot = state.slot_of_cab(cab_id)?;
        Ok(state.vehicles[slot].idle_time(from, to))
    }

    /// Wipes a cab's history and drops its open bookings.
    pub fn reset_cab(&self, cab_id: &CabId) -> Result<()> {
        let mut state = self.state.write();
        let slot = state.slot_of_cab(cab_id)?;
        state.vehicles[slot].reset();
        state.bookings.retain(|_, booked_slot| *booked_slot != slot);
        debug!(cab = %cab_id, "cab reset");
        Ok(())
    }

    /// Cabs that a booking from `city` could pick right now, longest idle first.
    pub fn idle_cabs_in(&self, city: City) -> Vec<CabId> {
        let state = self.state.read();
        let mut candidates = state.candidates(city);
        candidates.sort_by_key(|candidate| (candidate.last_seen_at, candidate.slot));
        candidates
            .into_iter()
            .map(|candidate| state.vehicles[candidate.slot].id().clone())
            .collect()
    }

    pub fn counts(&self) -> FleetCounts {
        let state = self.state.read();
        let mut counts = FleetCounts::default();
        for vehicle in &state.vehicles {
            counts.add_vehicle(vehicle);
        }
        counts.open_bookings = state.bookings.len();
        counts
    }
}
