//! Character data as it appears in a scene snapshot.
//!
//! Only the fields the roll workflow consumes are modeled: action
//! ratings, the stress track, and the trauma list. The snapshot is
//! read-only from the engine's point of view; mutations travel back
//! to the caller as [`crate::SessionPatch`] values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::{ActionId, AttributeId};

/// A trauma condition a character can acquire when stress overflows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TraumaId {
    /// You lose your empathy and passion.
    Cold,
    /// You're plagued by something from your past.
    Haunted,
    /// You're enthralled by one thing above all else.
    Obsessed,
    /// You imagine danger everywhere.
    Paranoid,
    /// You have little regard for your own safety.
    Reckless,
    /// You lose your edge under pressure.
    Soft,
    /// Your moods swing without warning.
    Unstable,
    /// You seek out opportunities for violence.
    Vicious,
}

impl TraumaId {
    /// All eight trauma conditions.
    pub const ALL: [TraumaId; 8] = [
        Self::Cold,
        Self::Haunted,
        Self::Obsessed,
        Self::Paranoid,
        Self::Reckless,
        Self::Soft,
        Self::Unstable,
        Self::Vicious,
    ];

    /// The lowercase token for this trauma.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Haunted => "haunted",
            Self::Obsessed => "obsessed",
            Self::Paranoid => "paranoid",
            Self::Reckless => "reckless",
            Self::Soft => "soft",
            Self::Unstable => "unstable",
            Self::Vicious => "vicious",
        }
    }
}

impl std::fmt::Display for TraumaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mechanical state of a character relevant to action rolls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterData {
    /// Rating per action. Missing entries count as 0 (untrained).
    pub actions: BTreeMap<ActionId, u32>,
    /// Current stress (0 up to the track maximum).
    pub stress: u32,
    /// Per-character override of the stress track maximum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_max: Option<u32>,
    /// Acquired traumas. At most [`CharacterData::TRAUMA_LIMIT`] distinct values.
    pub traumas: Vec<TraumaId>,
}

impl CharacterData {
    /// The most distinct traumas a character can carry.
    pub const TRAUMA_LIMIT: usize = 4;

    /// The rating for an action, 0 if untrained.
    pub fn action_rating(&self, action: ActionId) -> u32 {
        self.actions.get(&action).copied().unwrap_or(0)
    }

    /// The attribute rating: how many of the attribute's actions are
    /// rated above zero. Used as the resistance dice pool.
    pub fn attribute_rating(&self, attribute: AttributeId) -> u32 {
        attribute
            .actions()
            .into_iter()
            .filter(|a| self.action_rating(*a) > 0)
            .count() as u32
    }

    /// The stress track maximum, honoring a positive per-character
    /// override and falling back to `default_max` otherwise.
    pub fn stress_limit(&self, default_max: u32) -> u32 {
        match self.stress_max {
            Some(n) if n > 0 => n,
            _ => default_max,
        }
    }

    /// Whether the character already carries the given trauma.
    pub fn has_trauma(&self, trauma: TraumaId) -> bool {
        self.traumas.contains(&trauma)
    }
}

/// A character as referenced from the scene snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRef {
    /// Stable character id, assigned by the session manager.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Mechanical data block.
    #[serde(default)]
    pub data: CharacterData,
}

impl CharacterRef {
    /// Create a character with the given id and name and empty data.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data: CharacterData::default(),
        }
    }

    /// Set an action rating (builder style, handy in tests and demos).
    pub fn with_action(mut self, action: ActionId, rating: u32) -> Self {
        self.data.actions.insert(action, rating);
        self
    }

    /// Set the current stress value.
    pub fn with_stress(mut self, stress: u32) -> Self {
        self.data.stress = stress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specialist() -> CharacterData {
        let mut data = CharacterData::default();
        data.actions.insert(ActionId::Finesse, 2);
        data.actions.insert(ActionId::Prowl, 1);
        data.actions.insert(ActionId::Study, 3);
        data
    }

    #[test]
    fn action_rating_defaults_to_zero() {
        let data = specialist();
        assert_eq!(data.action_rating(ActionId::Finesse), 2);
        assert_eq!(data.action_rating(ActionId::Wreck), 0);
    }

    #[test]
    fn attribute_rating_counts_rated_actions() {
        let data = specialist();
        // Finesse and Prowl rated > 0 under Prowess.
        assert_eq!(data.attribute_rating(AttributeId::Prowess), 2);
        // Only Study under Insight.
        assert_eq!(data.attribute_rating(AttributeId::Insight), 1);
        assert_eq!(data.attribute_rating(AttributeId::Resolve), 0);
    }

    #[test]
    fn zero_rating_does_not_count_toward_attribute() {
        let mut data = specialist();
        data.actions.insert(ActionId::Skirmish, 0);
        assert_eq!(data.attribute_rating(AttributeId::Prowess), 2);
    }

    #[test]
    fn stress_limit_override() {
        let mut data = CharacterData::default();
        assert_eq!(data.stress_limit(9), 9);
        data.stress_max = Some(12);
        assert_eq!(data.stress_limit(9), 12);
        // A zero override is ignored.
        data.stress_max = Some(0);
        assert_eq!(data.stress_limit(9), 9);
    }

    #[test]
    fn trauma_membership() {
        let mut data = CharacterData::default();
        assert!(!data.has_trauma(TraumaId::Haunted));
        data.traumas.push(TraumaId::Haunted);
        assert!(data.has_trauma(TraumaId::Haunted));
    }

    #[test]
    fn serde_shape() {
        let ch = CharacterRef::new("c1", "Nyx").with_action(ActionId::Finesse, 2);
        let json = serde_json::to_value(&ch).unwrap();
        assert_eq!(json["id"], "c1");
        assert_eq!(json["name"], "Nyx");
        assert_eq!(json["data"]["actions"]["finesse"], 2);
        assert_eq!(json["data"]["stress"], 0);
        // The optional override is omitted entirely when unset.
        assert!(json["data"].get("stressMax").is_none());
    }

    #[test]
    fn deserialize_with_missing_fields() {
        let ch: CharacterRef =
            serde_json::from_str(r#"{"id":"c2","name":"Vale"}"#).unwrap();
        assert_eq!(ch.data.stress, 0);
        assert!(ch.data.traumas.is_empty());
    }
}
