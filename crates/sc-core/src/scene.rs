//! Scene snapshots: the read-only character data supplied per call.
//!
//! The external scene store owns this data; the engine only looks
//! characters up in it. Characters are grouped by the user who owns
//! them, which is how the assist stage finds a helper's character.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::character::CharacterRef;

/// One player's slice of the scene: the characters they own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntry {
    /// Characters owned by this player, in sheet order.
    #[serde(default)]
    pub characters: Vec<CharacterRef>,
}

/// A read-only snapshot of the scene's characters, keyed by owning user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    /// Per-user character lists.
    #[serde(default)]
    pub players: BTreeMap<String, PlayerEntry>,
}

impl SceneSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player with their characters (builder style).
    pub fn with_player(
        mut self,
        user_id: impl Into<String>,
        characters: Vec<CharacterRef>,
    ) -> Self {
        self.players
            .insert(user_id.into(), PlayerEntry { characters });
        self
    }

    /// Find a character anywhere in the scene by id.
    pub fn find_character(&self, character_id: &str) -> Option<&CharacterRef> {
        self.players
            .values()
            .flat_map(|entry| entry.characters.iter())
            .find(|ch| ch.id == character_id)
    }

    /// The first character owned by the given user, if any.
    pub fn first_character_of(&self, user_id: &str) -> Option<&CharacterRef> {
        self.players.get(user_id)?.characters.first()
    }

    /// Mutable lookup by character id, for callers applying patches.
    pub fn find_character_mut(&mut self, character_id: &str) -> Option<&mut CharacterRef> {
        self.players
            .values_mut()
            .flat_map(|entry| entry.characters.iter_mut())
            .find(|ch| ch.id == character_id)
    }
}
