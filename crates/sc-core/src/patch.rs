//! Session patches: mutations described, never performed.
//!
//! The engine returns these alongside its results; the session manager
//! that owns the scene store merges them in. Only the fields a patch
//! names are touched — absent fields leave the sheet alone.

use serde::{Deserialize, Serialize};

use crate::character::TraumaId;
use crate::scene::SceneSnapshot;

/// Field-level changes to a character's persisted data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDataPatch {
    /// New stress value, if the patch changes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress: Option<u32>,
    /// Full replacement trauma list, if the patch changes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traumas: Option<Vec<TraumaId>>,
}

/// A patch against one character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPatch {
    /// The character to patch.
    pub id: String,
    /// The fields to change.
    pub data: CharacterDataPatch,
}

/// A described mutation to session character data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    /// Character patches, applied in order.
    pub characters: Vec<CharacterPatch>,
}

impl SessionPatch {
    /// A patch setting one character's stress.
    pub fn stress(character_id: impl Into<String>, stress: u32) -> Self {
        Self {
            characters: vec![CharacterPatch {
                id: character_id.into(),
                data: CharacterDataPatch {
                    stress: Some(stress),
                    traumas: None,
                },
            }],
        }
    }

    /// A patch replacing one character's trauma list.
    pub fn traumas(character_id: impl Into<String>, traumas: Vec<TraumaId>) -> Self {
        Self {
            characters: vec![CharacterPatch {
                id: character_id.into(),
                data: CharacterDataPatch {
                    stress: None,
                    traumas: Some(traumas),
                },
            }],
        }
    }

    /// Merge this patch into a scene snapshot.
    ///
    /// Convenience for callers that keep their scene in memory (tests,
    /// the demo CLI). Patches naming unknown characters are skipped.
    pub fn apply_to(&self, scene: &mut SceneSnapshot) {
        for patch in &self.characters {
            let Some(ch) = scene.find_character_mut(&patch.id) else {
                continue;
            };
            if let Some(stress) = patch.data.stress {
                ch.data.stress = stress;
            }
            if let Some(traumas) = &patch.data.traumas {
                ch.data.traumas = traumas.clone();
            }
        }
    }
}
