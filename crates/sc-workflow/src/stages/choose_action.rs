//! choose_action: the initiator picks a character, an action, and
//! optionally an item. Every downstream decision is reset, so looping
//! back here always restarts the roll cleanly.

use serde_json::json;

use sc_core::{ActionParticipants, ActionRole, AttributeId, SceneSnapshot};

use crate::envelope::{Audience, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::StageInput;
use crate::workflow::{StageKey, Workflow};

use super::{StageCtx, StageEffects, authorize};

/// Build the initiator-facing envelope: the action menu plus the
/// initiator's own characters.
pub(crate) fn present(
    wf: &Workflow,
    scene: &SceneSnapshot,
    participants: &ActionParticipants,
) -> StageEnvelope {
    let characters: Vec<_> = participants
        .initiator_user_id
        .as_deref()
        .and_then(|uid| scene.players.get(uid))
        .map(|entry| {
            entry
                .characters
                .iter()
                .map(|ch| json!({ "id": ch.id, "name": ch.name }))
                .collect()
        })
        .unwrap_or_default();

    let action_groups: Vec<_> = AttributeId::ALL
        .into_iter()
        .map(|attr| {
            json!({
                "key": attr.as_str(),
                "name": group_name(attr),
                "color": group_color(attr),
                "actions": attr.actions().map(|a| a.as_str()),
            })
        })
        .collect();

    StageEnvelope {
        audience: vec![Audience::Initiator],
        stage: wf.stage,
        stage_data: json!({ "characters": characters }),
        ui: Some(UiSpec::new("rollAction.chooseAction").with_props(json!({
            "actionGroups": action_groups,
        }))),
        broadcasts: Vec::new(),
    }
}

fn group_name(attr: AttributeId) -> &'static str {
    match attr {
        AttributeId::Insight => "Insight",
        AttributeId::Prowess => "Prowess",
        AttributeId::Resolve => "Resolve",
    }
}

fn group_color(attr: AttributeId) -> &'static str {
    match attr {
        AttributeId::Insight => "#60a5fa",
        AttributeId::Prowess => "#34d399",
        AttributeId::Resolve => "#f472b6",
    }
}

/// Record the selection and hand the workflow to the GM.
pub(crate) fn submit(
    wf: &mut Workflow,
    ctx: &mut StageCtx<'_>,
    input: &StageInput,
) -> Result<StageEffects, WorkflowError> {
    authorize(ctx, ActionRole::Initiator, StageKey::ChooseAction)?;

    let StageInput::ChooseAction(input) = input else {
        return Err(WorkflowError::WrongInput {
            expected: StageKey::ChooseAction,
            got: input.stage(),
        });
    };

    if ctx.scene.find_character(&input.character_id).is_none() {
        return Err(WorkflowError::CharacterNotFound(input.character_id.clone()));
    }

    wf.context.character_id = Some(input.character_id.clone());
    wf.context.action = Some(input.action);
    wf.context.item_id = input.item_id.clone();
    wf.context.reset_downstream();

    wf.stage = StageKey::GmSetPositionEffect;
    Ok(StageEffects::default())
}
