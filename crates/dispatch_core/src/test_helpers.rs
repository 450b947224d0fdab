//! Test helpers for building deterministic registries.
//!
//! Every registry built here runs on a [`ManualClock`] so tests decide exactly
//! when trips start and end.

use std::sync::Arc;

use crate::city::City;
use crate::clock::ManualClock;
use crate::config::DispatchConfig;
use crate::registry::DispatchRegistry;
use crate::selection::FirstRegisteredTieBreaker;

/// Start time for test clocks, far enough from zero that a cab with no
/// completed trips (last seen at 0) is always the oldest.
pub const TEST_EPOCH_MS: u64 = 1_700_000_000_000;

pub fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::starting_at(TEST_EPOCH_MS))
}

/// Registry whose ties always resolve to the earliest registered cab.
pub fn deterministic_registry() -> (DispatchRegistry, Arc<ManualClock>) {
    let clock = test_clock();
    let registry = DispatchRegistry::with_parts(clock.clone(), Box::new(FirstRegisteredTieBreaker));
    (registry, clock)
}

/// Registry with a seeded random tie breaker.
pub fn seeded_registry(seed: u64) -> (DispatchRegistry, Arc<ManualClock>) {
    let clock = test_clock();
    let config = DispatchConfig::default().with_seed(seed);
    let registry = DispatchRegistry::with_clock(config, clock.clone());
    (registry, clock)
}

/// Registers every `(id, city)` pair.
///
/// # Panics
///
/// Panics if an id appears twice.
pub fn register_fleet(registry: &DispatchRegistry, fleet: &[(&str, City)]) {
    for (id, city) in fleet {
        registry
            .register_cab(*id, *city)
            .expect("test fleet ids should be unique");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;

    #[test]
    fn deterministic_registry_starts_empty_on_test_epoch() {
        let (registry, clock) = deterministic_registry();
        assert!(registry.is_empty());
        assert_eq!(clock.now(), TEST_EPOCH_MS);
        assert_eq!(registry.now(), TEST_EPOCH_MS);
    }

    #[test]
    fn register_fleet_adds_every_cab() {
        let (registry, _) = seeded_registry(1);
        register_fleet(&registry, &[("C1", City::Pune), ("C2", City::Delhi)]);
        assert_eq!(registry.len(), 2);
    }
}
