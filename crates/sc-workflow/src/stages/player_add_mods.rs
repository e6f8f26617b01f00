//! player_add_mods: the initiator stacks the odds — push themselves,
//! take the devil's bargain, or call in help. Push and bargain are
//! mutually exclusive; asking for help requires naming a helper.

use serde_json::json;

use sc_core::{ActionParticipants, ActionRole};

use crate::envelope::{Audience, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::StageInput;
use crate::workflow::{HelpRequest, Mods, StageKey, Workflow};

use super::{StageCtx, StageEffects, authorize};

/// Build the initiator-facing envelope: the frame so far plus the
/// other users who could be asked for help.
pub(crate) fn present(wf: &Workflow, participants: &ActionParticipants) -> StageEnvelope {
    let initiator = participants.initiator_user_id.as_deref();
    let mut helpers: Vec<&str> = participants
        .participants
        .iter()
        .map(|p| p.user_id.as_str())
        .filter(|uid| Some(*uid) != initiator)
        .collect();
    helpers.dedup();

    StageEnvelope {
        audience: vec![Audience::Initiator],
        stage: wf.stage,
        stage_data: json!({
            "action": wf.context.action,
            "position": wf.context.position,
            "effect": wf.context.effect,
            "consequenceHint": wf.context.consequence_hint,
            "mods": wf.context.mods,
        }),
        ui: Some(UiSpec::new("rollAction.playerAddMods").with_props(json!({
            "helpers": helpers,
        }))),
        broadcasts: Vec::new(),
    }
}

/// Record the modifiers and route to the helper or straight to the GM.
pub(crate) fn submit(
    wf: &mut Workflow,
    ctx: &mut StageCtx<'_>,
    input: &StageInput,
) -> Result<StageEffects, WorkflowError> {
    authorize(ctx, ActionRole::Initiator, StageKey::PlayerAddMods)?;

    let StageInput::PlayerAddMods(input) = input else {
        return Err(WorkflowError::WrongInput {
            expected: StageKey::PlayerAddMods,
            got: input.stage(),
        });
    };

    if input.push && input.devils_bargain {
        return Err(WorkflowError::PushAndBargain);
    }

    let help = if input.help {
        let helper_user_id = input
            .helper_user_id
            .clone()
            .ok_or(WorkflowError::HelperMissing)?;
        Some(HelpRequest {
            helper_user_id,
            confirmed: false,
        })
    } else {
        None
    };

    let help_requested = help.is_some();
    wf.context.mods = Mods {
        push: input.push,
        devils_bargain: input.devils_bargain,
        bonus_dice: input.bonus_dice,
        help,
    };

    wf.stage = if help_requested {
        StageKey::AssistConfirm
    } else {
        StageKey::GmFinalize
    };
    Ok(StageEffects::default())
}
