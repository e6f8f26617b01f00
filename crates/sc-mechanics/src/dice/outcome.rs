//! Reading a rolled pool: best die, criticals, and the outcome tier.

use serde::{Deserialize, Serialize};

/// The outcome tier of an action roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollOutcome {
    /// Best die 1–3: it goes wrong.
    Bad,
    /// Best die 4–5: success with a complication.
    Mixed,
    /// Best die 6: clean success.
    Good,
    /// Two or more sixes: critical success.
    Crit,
}

impl RollOutcome {
    /// The lowercase token for this outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bad => "bad",
            Self::Mixed => "mixed",
            Self::Good => "good",
            Self::Crit => "crit",
        }
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The best (highest) die and whether the roll is a critical.
///
/// An empty roll has best 0 and is never a critical.
pub fn best_and_crit(rolls: &[u32]) -> (u32, bool) {
    let best = rolls.iter().copied().max().unwrap_or(0);
    let crit = rolls.iter().filter(|&&d| d == 6).count() >= 2;
    (best, crit)
}

/// Classify a rolled pool into its outcome tier.
pub fn classify(rolls: &[u32]) -> RollOutcome {
    let (best, crit) = best_and_crit(rolls);
    if crit {
        RollOutcome::Crit
    } else if best == 6 {
        RollOutcome::Good
    } else if best == 4 || best == 5 {
        RollOutcome::Mixed
    } else {
        RollOutcome::Bad
    }
}
