mod support;

use std::time::Duration;

use dispatch_core::test_helpers::{register_fleet, seeded_registry, TEST_EPOCH_MS};
use dispatch_core::City;
use support::PUNE_FLEET;

/// Three cabs in Pune, bookings interleaved with starts and ends. The checks
/// must hold whichever cab the tie breaker picks first.
#[test]
fn three_cab_pune_scenario_holds_for_any_tie_break() {
    for seed in 0..16 {
        let (registry, clock) = seeded_registry(seed);
        register_fleet(&registry, &PUNE_FLEET);
        let window_start = TEST_EPOCH_MS;
        clock.advance(1_000);

        let booking = registry.query_booking(City::Pune, City::Mumbai).expect("first");
        registry.start_trip(booking.booking_id).expect("start first");
        let confirmed = booking.cab_id.clone();

        let booking1 = registry.query_booking(City::Pune, City::Mumbai).expect("second");
        assert_ne!(booking1.cab_id, confirmed, "seed {seed}");

        clock.advance(60_000);
        registry.end_trip(booking.booking_id).expect("end first");
        registry.start_trip(booking1.booking_id).expect("start second");

        let booking2 = registry.query_booking(City::Pune, City::Mumbai).expect("third");
        assert_ne!(booking2.cab_id, confirmed, "seed {seed}");
        assert_ne!(booking2.cab_id, booking1.cab_id, "seed {seed}");

        assert_eq!(
            registry.vehicle(&confirmed).expect("confirmed").current_city(),
            Some(City::Mumbai)
        );
        assert!(registry.vehicle(&booking1.cab_id).expect("second cab").in_transit());
        assert!(!registry.vehicle(&booking2.cab_id).expect("third cab").in_transit());

        clock.advance(30_000);
        registry.end_trip(booking1.booking_id).expect("end second");
        let second_cab = registry.vehicle(&booking1.cab_id).expect("second cab");
        assert_eq!(second_cab.current_city(), Some(City::Mumbai));
        assert!(!second_cab.in_transit());

        // Two cabs wait in Mumbai; the one that arrived first gets the trip.
        clock.advance(5_000);
        let onward = registry
            .query_booking(City::Mumbai, City::Bangaluru)
            .expect("mumbai booking");
        assert_eq!(onward.cab_id, confirmed, "seed {seed}");
        registry.start_trip(onward.booking_id).expect("start onward");
        clock.advance(45_000);
        registry.end_trip(onward.booking_id).expect("end onward");

        assert_eq!(registry.trips(&confirmed).expect("trips").len(), 2);

        let back = registry
            .query_booking(City::Bangaluru, City::Pune)
            .expect("bangaluru booking");
        assert_eq!(back.cab_id, confirmed, "seed {seed}");

        let now = clock.advance(1_000);
        let window = Duration::from_millis(now - window_start);
        // Both completed trips of `confirmed` lie strictly inside the window.
        assert_eq!(
            registry.idle_time(&confirmed, window_start, now).expect("idle"),
            window - Duration::from_millis(60_000 + 45_000)
        );
        // The third cab never completed a trip.
        assert_eq!(
            registry.idle_time(&booking2.cab_id, window_start, now).expect("idle"),
            window
        );
    }
}
