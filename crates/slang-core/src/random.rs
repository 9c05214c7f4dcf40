use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Source of randomness for random entries and quizzes
pub trait RandomSource {
    /// Uniform index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Fair coin flip
    fn coin(&mut self) -> bool {
        self.next_index(2) == 0
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// In-place Fisher-Yates shuffle driven by `rng`
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Adapts any `rand` generator
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<SmallRng> {
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of picks, wrapping around. Values are reduced
/// modulo the requested bound.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    cursor: usize,
}

#[cfg(any(test, feature = "test-util"))]
impl ScriptedSource {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }
}

#[cfg(any(test, feature = "test-util"))]
impl RandomSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.picks.is_empty() || bound == 0 {
            return 0;
        }
        let pick = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        pick % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_source_stays_in_bounds() {
        let mut rng = RngSource::seeded(7);
        for bound in 1..20 {
            for _ in 0..50 {
                assert!(rng.next_index(bound) < bound);
            }
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = RngSource::seeded(42);
        let mut items: Vec<u32> = (0..10).collect();
        shuffle(&mut items, &mut rng);

        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_scripted_source_replays_picks() {
        let mut rng = ScriptedSource::new(vec![3, 1]);
        assert_eq!(rng.next_index(10), 3);
        assert_eq!(rng.next_index(10), 1);
        assert_eq!(rng.next_index(2), 1);
        assert!(!rng.coin());
    }

    #[test]
    fn test_scripted_zero_picks_rotate() {
        // Always swapping with index 0 rotates the slice
        let mut rng = ScriptedSource::new(vec![0]);
        let mut items = vec!['a', 'b', 'c', 'd'];
        shuffle(&mut items, &mut rng);
        assert_eq!(items, vec!['b', 'c', 'd', 'a']);
    }

    #[test]
    fn test_scripted_zero_bound_does_not_panic() {
        let mut rng = ScriptedSource::new(vec![5, 3]);
        assert_eq!(rng.next_index(0), 0);
        // A zero bound consumes nothing
        assert_eq!(rng.next_index(4), 1);
    }
}
