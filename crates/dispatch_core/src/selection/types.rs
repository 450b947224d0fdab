use crate::clock::Timestamp;

/// A cab eligible for a booking, as seen by the selection step.
///
/// `slot` is the cab's position in the registry arena, so candidates built in
/// arena order are also in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub slot: usize,
    pub last_seen_at: Timestamp,
}
