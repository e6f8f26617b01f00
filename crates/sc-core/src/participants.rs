//! Participant identity and role resolution for the current action.
//!
//! Roles gate every stage transition: the resolver is consulted at the
//! top of each submit, before any state is touched. A user unknown to
//! the directory still resolves to the `player` role, so the result of
//! [`ActionParticipants::roles_for`] is never empty.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A role a user can hold for the current action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActionRole {
    /// The moderator running the scene.
    Gm,
    /// The acting player who started the roll.
    Initiator,
    /// Any other participant at the table.
    Player,
    /// A participant invited to assist the roll.
    Assistant,
    /// A spectator with no stake in the action.
    Observer,
}

impl ActionRole {
    /// The lowercase token for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gm => "gm",
            Self::Initiator => "initiator",
            Self::Player => "player",
            Self::Assistant => "assistant",
            Self::Observer => "observer",
        }
    }
}

impl std::fmt::Display for ActionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One participant entry with explicitly granted roles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParticipant {
    /// The participant's user id.
    pub user_id: String,
    /// Roles granted beyond the implicit gm/initiator/player ones.
    #[serde(default)]
    pub roles: BTreeSet<ActionRole>,
    /// Free-form metadata carried for the caller's benefit.
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

/// Identity data for everyone involved in the current action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParticipants {
    /// The moderator's user id.
    #[serde(default)]
    pub gm_user_id: Option<String>,
    /// The acting player's user id.
    #[serde(default)]
    pub initiator_user_id: Option<String>,
    /// Explicit participant entries.
    #[serde(default)]
    pub participants: Vec<ActionParticipant>,
    /// Reserved slots not yet bound to a user.
    #[serde(default)]
    pub placeholders: BTreeMap<String, serde_json::Value>,
}

impl ActionParticipants {
    /// Create a directory with just a GM and an initiator.
    pub fn new(gm_user_id: impl Into<String>, initiator_user_id: impl Into<String>) -> Self {
        Self {
            gm_user_id: Some(gm_user_id.into()),
            initiator_user_id: Some(initiator_user_id.into()),
            participants: Vec::new(),
            placeholders: BTreeMap::new(),
        }
    }

    /// Add a participant entry with explicit roles (builder style).
    pub fn with_participant(
        mut self,
        user_id: impl Into<String>,
        roles: impl IntoIterator<Item = ActionRole>,
    ) -> Self {
        self.participants.push(ActionParticipant {
            user_id: user_id.into(),
            roles: roles.into_iter().collect(),
            meta: BTreeMap::new(),
        });
        self
    }

    /// Resolve every role the user holds for this action.
    ///
    /// Unions the implicit gm/initiator roles with any explicitly
    /// granted ones; a user with no match defaults to `player`.
    pub fn roles_for(&self, user_id: &str) -> BTreeSet<ActionRole> {
        let mut roles = BTreeSet::new();

        if self.gm_user_id.as_deref() == Some(user_id) {
            roles.insert(ActionRole::Gm);
        }
        if self.initiator_user_id.as_deref() == Some(user_id) {
            roles.insert(ActionRole::Initiator);
        }
        for p in &self.participants {
            if p.user_id == user_id {
                roles.extend(p.roles.iter().copied());
            }
        }

        if roles.is_empty() {
            roles.insert(ActionRole::Player);
        }
        roles
    }

    /// Whether the user holds the given role.
    pub fn has(&self, user_id: &str, role: ActionRole) -> bool {
        self.roles_for(user_id).contains(&role)
    }
}
