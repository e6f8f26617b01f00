//! The stress ledger.
//!
//! Applies a stress delta to a character, detects overflow into
//! trauma, and describes the mutation as a [`SessionPatch`] plus an
//! audit [`StressEvent`]. The ledger never writes anywhere itself:
//! the workflow appends the event to its context and the session
//! manager merges the patch.

use serde::{Deserialize, Serialize};

use sc_core::{AttributeId, CharacterRef, SessionPatch};

/// Default stress track maximum when the character has no override.
pub const STRESS_MAX_DEFAULT: u32 = 9;

/// Why stress was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum StressReason {
    /// The character stepped in to assist the roll.
    Assist {
        /// The helper's user id.
        helper_user_id: String,
    },
    /// The initiator pushed themselves for an extra die.
    Push,
    /// The character resisted a consequence.
    Resist {
        /// The attribute rolled.
        attribute: AttributeId,
        /// Best die of the resistance roll.
        best: u32,
        /// Whether the resistance roll was a critical.
        crit: bool,
    },
}

/// Audit record for one stress application.
///
/// Appended to the workflow context so the wrap-up stage can show the
/// GM everything that happened to the track during the roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressEvent {
    /// The character whose track changed.
    pub character_id: String,
    /// Stress before the application.
    pub old: u32,
    /// Amount applied.
    pub delta: u32,
    /// Recorded stress afterwards (0 on overflow).
    pub new: u32,
    /// The track maximum in force.
    pub max: u32,
    /// Whether the track overflowed into trauma.
    pub overflow: bool,
    /// Why the stress was applied.
    pub reason: StressReason,
}

/// The full result of applying stress to a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressApplication {
    /// Recorded stress after the application.
    pub new_stress: u32,
    /// Whether the track overflowed; the workflow must then prompt
    /// for a trauma at wrap-up.
    pub overflow: bool,
    /// The audit record to append to the workflow context.
    pub event: StressEvent,
    /// The mutation for the session manager to merge.
    pub patch: SessionPatch,
}

/// Apply a stress delta to a character.
///
/// When `old + delta` reaches the track maximum (per-character
/// override or `default_max`), the recorded stress resets to 0 and
/// `overflow` is set — the trauma itself is chosen later, at wrap-up.
pub fn apply_stress(
    character: &CharacterRef,
    delta: u32,
    reason: StressReason,
    default_max: u32,
) -> StressApplication {
    let old = character.data.stress;
    let max = character.data.stress_limit(default_max);
    let raw = old + delta;

    let overflow = raw >= max;
    let new_stress = if overflow { 0 } else { raw };

    let event = StressEvent {
        character_id: character.id.clone(),
        old,
        delta,
        new: new_stress,
        max,
        overflow,
        reason,
    };

    StressApplication {
        new_stress,
        overflow,
        event,
        patch: SessionPatch::stress(character.id.as_str(), new_stress),
    }
}
