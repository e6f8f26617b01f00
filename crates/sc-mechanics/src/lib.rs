//! Game mechanics for Scoundrel: d6 pool resolution and the stress
//! ledger.
//!
//! Everything is deterministic given an injected [`rand::rngs::StdRng`];
//! nothing here performs I/O or touches shared state. Stress mutations
//! come back as [`sc_core::SessionPatch`] values plus audit events for
//! the workflow to record.

pub mod dice;
pub mod stress;

pub use dice::{RollOutcome, best_and_crit, classify, roll_pool};
pub use stress::{STRESS_MAX_DEFAULT, StressApplication, StressEvent, StressReason, apply_stress};
