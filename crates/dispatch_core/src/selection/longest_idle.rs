use super::tie_break::TieBreaker;
use super::types::Candidate;

/// Longest-idle-first selection.
///
/// Returns the slot of the candidate with the oldest `last_seen_at`. When
/// several candidates share that timestamp the tie breaker chooses among them,
/// in the order they were passed in. Returns `None` for an empty slice.
pub fn select_longest_idle(
    candidates: &[Candidate],
    tie_breaker: &mut dyn TieBreaker,
) -> Option<usize> {
    let oldest = candidates.iter().map(|c| c.last_seen_at).min()?;
    let tied: Vec<usize> = candidates
        .iter()
        .filter(|c| c.last_seen_at == oldest)
        .map(|c| c.slot)
        .collect();

    match tied.as_slice() {
        [only] => Some(*only),
        _ => {
            let pick = tie_breaker.pick(tied.len()).min(tied.len() - 1);
            Some(tied[pick])
        }
    }
}
