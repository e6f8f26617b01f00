use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use sc_mechanics::{RollOutcome, classify, roll_pool};

pub fn run(rating: u32, bonus: u32, trials: u32, seed: u64) -> Result<(), String> {
    if trials == 0 {
        return Err("trials must be at least 1".to_string());
    }

    let pool = rating + bonus;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut counts = [0u32; 4];
    for _ in 0..trials {
        let rolls = roll_pool(pool as i32, &mut rng);
        let slot = match classify(&rolls) {
            RollOutcome::Bad => 0,
            RollOutcome::Mixed => 1,
            RollOutcome::Good => 2,
            RollOutcome::Crit => 3,
        };
        counts[slot] += 1;
    }

    println!(
        "  {} {pool} dice ({rating} rating + {bonus} bonus), {trials} rolls",
        "Pool".bold()
    );
    if pool == 0 {
        println!("  Zero dice: rolling two and keeping the lower.");
    }

    let labels = [
        "bad".red(),
        "mixed".yellow(),
        "good".green(),
        "crit".green().bold(),
    ];
    for (label, count) in labels.iter().zip(counts) {
        let pct = 100.0 * f64::from(count) / f64::from(trials);
        println!("  {label:>7}  {pct:5.1}%  ({count})");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_trials_is_an_error() {
        assert!(run(2, 0, 0, 42).is_err());
    }

    #[test]
    fn small_run_succeeds() {
        assert!(run(0, 0, 50, 42).is_ok());
        assert!(run(4, 1, 50, 42).is_ok());
    }
}
