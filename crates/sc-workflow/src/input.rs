//! Stage inputs: one tagged record per stage.
//!
//! The union is keyed by the stage it addresses, so a submit carrying
//! the wrong record for the workflow's current stage is rejected
//! before any field is read. Unknown fields and mistyped values are
//! rejected by serde at the deserialization boundary.

use serde::{Deserialize, Serialize};

use sc_core::{ActionId, AttributeId, Effect, Position, TraumaId};

use crate::workflow::StageKey;

/// Input for choose_action: pick who rolls what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChooseActionInput {
    /// The acting character.
    pub character_id: String,
    /// The action to attempt.
    pub action: ActionId,
    /// An item to bring to bear, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

/// Input for gm_set_position_effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GmSetInput {
    /// Risk descriptor.
    pub position: Position,
    /// Reward descriptor.
    pub effect: Effect,
    /// Free-text sketch of what failure could cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence_hint: Option<String>,
}

/// Input for player_add_mods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PlayerModsInput {
    /// Push yourself for an extra die.
    pub push: bool,
    /// Take the devil's bargain for an extra die.
    pub devils_bargain: bool,
    /// Extra dice granted at the table (recorded, not rolled).
    pub bonus_dice: u32,
    /// Ask another player for help.
    pub help: bool,
    /// Who to ask; required when `help` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_user_id: Option<String>,
}

/// Input for assist_confirm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AssistConfirmInput {
    /// Whether the invited helper steps in.
    pub accept_help: bool,
}

/// Input for gm_finalize: allow, correct, or send back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GmFinalizeInput {
    /// Allow the roll to proceed; false sends it back to choose_action.
    pub allow: bool,
    /// Override the selected action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionId>,
    /// Override the selected item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    /// Override the position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Override the effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
    /// Override the consequence hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consequence_hint: Option<String>,
}

impl Default for GmFinalizeInput {
    fn default() -> Self {
        Self {
            allow: true,
            action: None,
            item_id: None,
            position: None,
            effect: None,
            consequence_hint: None,
        }
    }
}

/// The initiator's decision at the pre-roll gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrerollChoice {
    /// Roll the dice.
    #[default]
    Accept,
    /// Abandon the attempt and go back to action selection.
    Cancel,
}

/// Input for prerollconfirm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PrerollConfirmInput {
    /// Accept (roll) or cancel (back to choose_action).
    pub choice: PrerollChoice,
}

/// The initiator's decision when facing consequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigateChoice {
    /// Take the consequences as they stand.
    #[default]
    Accept,
    /// Resist them with an attribute roll.
    Resist,
}

/// Input for mitigate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MitigateInput {
    /// Accept the outcome or resist it.
    pub choice: MitigateChoice,
}

/// Input for resist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResistInput {
    /// The attribute to resist with.
    pub attribute: AttributeId,
    /// Confirm the resistance roll; false skips straight to wrap-up.
    #[serde(default = "confirm_default")]
    pub confirm: bool,
}

fn confirm_default() -> bool {
    true
}

/// Input for wrap_up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct WrapUpInput {
    /// Trauma to assign, required in spirit when a track overflowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trauma: Option<TraumaId>,
    /// Free-text summary of how the action shook out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Stage-specific input, tagged by the stage it addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageInput {
    /// Input for the choose_action stage.
    ChooseAction(ChooseActionInput),
    /// Input for the gm_set_position_effect stage.
    GmSetPositionEffect(GmSetInput),
    /// Input for the player_add_mods stage.
    PlayerAddMods(PlayerModsInput),
    /// Input for the assist_confirm stage.
    AssistConfirm(AssistConfirmInput),
    /// Input for the gm_finalize stage.
    GmFinalize(GmFinalizeInput),
    /// Input for the prerollconfirm stage.
    #[serde(rename = "prerollconfirm")]
    PrerollConfirm(PrerollConfirmInput),
    /// Input for the mitigate stage.
    Mitigate(MitigateInput),
    /// Input for the resist stage.
    Resist(ResistInput),
    /// Input for the wrap_up stage.
    WrapUp(WrapUpInput),
}

impl StageInput {
    /// The stage this input addresses.
    pub fn stage(&self) -> StageKey {
        match self {
            Self::ChooseAction(_) => StageKey::ChooseAction,
            Self::GmSetPositionEffect(_) => StageKey::GmSetPositionEffect,
            Self::PlayerAddMods(_) => StageKey::PlayerAddMods,
            Self::AssistConfirm(_) => StageKey::AssistConfirm,
            Self::GmFinalize(_) => StageKey::GmFinalize,
            Self::PrerollConfirm(_) => StageKey::PrerollConfirm,
            Self::Mitigate(_) => StageKey::Mitigate,
            Self::Resist(_) => StageKey::Resist,
            Self::WrapUp(_) => StageKey::WrapUp,
        }
    }
}
