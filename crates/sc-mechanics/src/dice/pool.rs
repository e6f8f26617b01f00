//! Rolling d6 pools, including the zero-dice rule.

use rand::Rng;
use rand::rngs::StdRng;

/// Roll a single six-sided die.
fn d6(rng: &mut StdRng) -> u32 {
    rng.random_range(1..=6)
}

/// Roll a pool of `pool` six-sided dice.
///
/// A pool of zero (or less) rolls two dice and keeps only the lower
/// one, so the returned vector always holds exactly one die in that
/// case and exactly `pool` dice otherwise.
pub fn roll_pool(pool: i32, rng: &mut StdRng) -> Vec<u32> {
    if pool <= 0 {
        let a = d6(rng);
        let b = d6(rng);
        return vec![a.min(b)];
    }
    (0..pool).map(|_| d6(rng)).collect()
}
