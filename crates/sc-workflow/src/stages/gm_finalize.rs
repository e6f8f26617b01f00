//! gm_finalize: the GM's gate before dice hit the table. Deny sends
//! the whole roll back to action selection; allow may correct the
//! action, item, position, effect, or hint on the way through.

use serde_json::json;

use sc_core::ActionRole;

use crate::envelope::{Audience, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::StageInput;
use crate::workflow::{StageKey, Workflow};

use super::{StageCtx, StageEffects, authorize};

/// Build the GM-facing envelope with the full picture so far.
pub(crate) fn present(wf: &Workflow) -> StageEnvelope {
    StageEnvelope {
        audience: vec![Audience::Gm],
        stage: wf.stage,
        stage_data: json!({
            "action": wf.context.action,
            "characterId": wf.context.character_id,
            "position": wf.context.position,
            "effect": wf.context.effect,
            "consequenceHint": wf.context.consequence_hint,
            "mods": wf.context.mods,
        }),
        ui: Some(UiSpec::new("rollAction.gmFinalize")),
        broadcasts: Vec::new(),
    }
}

/// Deny back to choose_action, or allow (with optional corrections).
pub(crate) fn submit(
    wf: &mut Workflow,
    ctx: &mut StageCtx<'_>,
    input: &StageInput,
) -> Result<StageEffects, WorkflowError> {
    authorize(ctx, ActionRole::Gm, StageKey::GmFinalize)?;

    let StageInput::GmFinalize(input) = input else {
        return Err(WorkflowError::WrongInput {
            expected: StageKey::GmFinalize,
            got: input.stage(),
        });
    };

    if !input.allow {
        // The context is left as-is; choose_action resets it on the
        // initiator's next pick.
        wf.stage = StageKey::ChooseAction;
        return Ok(StageEffects::default());
    }

    if let Some(action) = input.action {
        wf.context.action = Some(action);
    }
    if let Some(item_id) = &input.item_id {
        wf.context.item_id = Some(item_id.clone());
    }
    if let Some(position) = input.position {
        wf.context.position = Some(position);
    }
    if let Some(effect) = input.effect {
        wf.context.effect = Some(effect);
    }
    if let Some(hint) = &input.consequence_hint {
        wf.context.consequence_hint = Some(hint.clone());
    }

    wf.stage = StageKey::PrerollConfirm;
    Ok(StageEffects::default())
}
