//! Action and attribute vocabulary.
//!
//! Twelve rated actions grouped four-apiece under three attributes,
//! plus the position/effect descriptors the GM assigns to an attempt.
//! The grouping is fixed by the game system and drives resistance
//! pools: an attribute's rating is the count of its actions rated
//! above zero.

use serde::{Deserialize, Serialize};

/// A rated action a character can attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    /// Track a target; gather information (Insight).
    Hunt,
    /// Research, examine, interpret (Insight).
    Study,
    /// Observe a situation, anticipate what's coming (Insight).
    Survey,
    /// Work with mechanisms and devices (Insight).
    Tinker,
    /// Employ dexterous manipulation or subtle misdirection (Prowess).
    Finesse,
    /// Move stealthily, traverse quietly (Prowess).
    Prowl,
    /// Fight in close combat (Prowess).
    Skirmish,
    /// Apply brute force or sabotage (Prowess).
    Wreck,
    /// Open your mind to the uncanny (Resolve).
    Attune,
    /// Lead through force of personality (Resolve).
    Command,
    /// Socialize with friends and contacts (Resolve).
    Consort,
    /// Influence with guile, charm, or argument (Resolve).
    Sway,
}

impl ActionId {
    /// All twelve actions, in attribute order.
    pub const ALL: [ActionId; 12] = [
        Self::Hunt,
        Self::Study,
        Self::Survey,
        Self::Tinker,
        Self::Finesse,
        Self::Prowl,
        Self::Skirmish,
        Self::Wreck,
        Self::Attune,
        Self::Command,
        Self::Consort,
        Self::Sway,
    ];

    /// The attribute this action is grouped under.
    pub fn attribute(self) -> AttributeId {
        match self {
            Self::Hunt | Self::Study | Self::Survey | Self::Tinker => AttributeId::Insight,
            Self::Finesse | Self::Prowl | Self::Skirmish | Self::Wreck => AttributeId::Prowess,
            Self::Attune | Self::Command | Self::Consort | Self::Sway => AttributeId::Resolve,
        }
    }

    /// The lowercase token for this action, as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hunt => "hunt",
            Self::Study => "study",
            Self::Survey => "survey",
            Self::Tinker => "tinker",
            Self::Finesse => "finesse",
            Self::Prowl => "prowl",
            Self::Skirmish => "skirmish",
            Self::Wreck => "wreck",
            Self::Attune => "attune",
            Self::Command => "command",
            Self::Consort => "consort",
            Self::Sway => "sway",
        }
    }

    /// Parse an action from its lowercase token.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute category; its rating is used as the resistance pool.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AttributeId {
    /// Perception and knowledge actions.
    Insight,
    /// Physical actions.
    Prowess,
    /// Willpower and social actions.
    Resolve,
}

impl AttributeId {
    /// All three attributes.
    pub const ALL: [AttributeId; 3] = [Self::Insight, Self::Prowess, Self::Resolve];

    /// The four actions grouped under this attribute.
    pub fn actions(self) -> [ActionId; 4] {
        match self {
            Self::Insight => [
                ActionId::Hunt,
                ActionId::Study,
                ActionId::Survey,
                ActionId::Tinker,
            ],
            Self::Prowess => [
                ActionId::Finesse,
                ActionId::Prowl,
                ActionId::Skirmish,
                ActionId::Wreck,
            ],
            Self::Resolve => [
                ActionId::Attune,
                ActionId::Command,
                ActionId::Consort,
                ActionId::Sway,
            ],
        }
    }

    /// The lowercase token for this attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insight => "insight",
            Self::Prowess => "prowess",
            Self::Resolve => "resolve",
        }
    }
}

impl std::fmt::Display for AttributeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GM-set risk descriptor for an attempted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// The attempt is safe; consequences are minor.
    Controlled,
    /// The standard spot: real danger, real reward.
    Risky,
    /// The attempt is a long shot with severe consequences.
    Desperate,
}

impl Position {
    /// All positions, mildest first.
    pub const ALL: [Position; 3] = [Self::Controlled, Self::Risky, Self::Desperate];

    /// The lowercase token for this position.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Controlled => "controlled",
            Self::Risky => "risky",
            Self::Desperate => "desperate",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GM-set reward descriptor for an attempted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// The attempt accomplishes less than usual.
    Limited,
    /// The usual scope of success.
    Standard,
    /// The attempt accomplishes more than usual.
    Great,
}

impl Effect {
    /// All effects, weakest first.
    pub const ALL: [Effect; 3] = [Self::Limited, Self::Standard, Self::Great];

    /// The lowercase token for this effect.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Limited => "limited",
            Self::Standard => "standard",
            Self::Great => "great",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_attribute_has_four_actions() {
        for attr in AttributeId::ALL {
            let actions = attr.actions();
            assert_eq!(actions.len(), 4);
            for action in actions {
                assert_eq!(action.attribute(), attr);
            }
        }
    }

    #[test]
    fn all_covers_every_action_once() {
        let mut seen = std::collections::BTreeSet::new();
        for action in ActionId::ALL {
            assert!(seen.insert(action), "{action} listed twice");
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn parse_round_trips() {
        for action in ActionId::ALL {
            assert_eq!(ActionId::parse(action.as_str()), Some(action));
        }
        assert_eq!(ActionId::parse("juggle"), None);
    }

    #[test]
    fn serde_tokens_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&ActionId::Finesse).unwrap(),
            "\"finesse\""
        );
        assert_eq!(
            serde_json::to_string(&AttributeId::Prowess).unwrap(),
            "\"prowess\""
        );
        assert_eq!(serde_json::to_string(&Position::Risky).unwrap(), "\"risky\"");
        assert_eq!(
            serde_json::to_string(&Effect::Standard).unwrap(),
            "\"standard\""
        );
    }

    #[test]
    fn serde_round_trip() {
        let action: ActionId = serde_json::from_str("\"wreck\"").unwrap();
        assert_eq!(action, ActionId::Wreck);
        assert_eq!(action.attribute(), AttributeId::Prowess);
    }

    #[test]
    fn display_matches_token() {
        assert_eq!(ActionId::Attune.to_string(), "attune");
        assert_eq!(Position::Desperate.to_string(), "desperate");
        assert_eq!(Effect::Great.to_string(), "great");
    }
}
