use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one of several cabs that have been idle for exactly the same time.
///
/// Implementations receive the number of tied candidates (always at least 2)
/// and return an index in `0..tied`.
pub trait TieBreaker: Send + Sync {
    fn pick(&mut self, tied: usize) -> usize;
}

/// Uniform random choice among tied cabs.
#[derive(Debug)]
pub struct RandomTieBreaker {
    rng: StdRng,
}

impl RandomTieBreaker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl Default for RandomTieBreaker {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TieBreaker for RandomTieBreaker {
    fn pick(&mut self, tied: usize) -> usize {
        self.rng.gen_range(0..tied)
    }
}

/// Always takes the earliest registered cab. Useful when tests need a fixed
/// answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstRegisteredTieBreaker;

impl TieBreaker for FirstRegisteredTieBreaker {
    fn pick(&mut self, _tied: usize) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_tie_breaker_is_reproducible() {
        let mut a = RandomTieBreaker::seeded(7);
        let mut b = RandomTieBreaker::seeded(7);
        let picks_a: Vec<usize> = (0..32).map(|_| a.pick(5)).collect();
        let picks_b: Vec<usize> = (0..32).map(|_| b.pick(5)).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|pick| *pick < 5));
    }

    #[test]
    fn random_tie_breaker_reaches_every_index() {
        let mut breaker = RandomTieBreaker::seeded(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[breaker.pick(3)] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
