//! mitigate: the initiator looks the consequences in the eye and
//! either takes them or resists.

use serde_json::json;

use sc_core::ActionRole;

use crate::envelope::{Audience, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::{MitigateChoice, StageInput};
use crate::workflow::{StageKey, Workflow};

use super::{StageCtx, StageEffects, authorize};

/// Build the initiator-facing envelope with the roll on display.
pub(crate) fn present(wf: &Workflow) -> StageEnvelope {
    StageEnvelope {
        audience: vec![Audience::Initiator],
        stage: wf.stage,
        stage_data: json!({
            "action": wf.context.action,
            "position": wf.context.position,
            "effect": wf.context.effect,
            "consequenceHint": wf.context.consequence_hint,
            "roll": wf.context.roll,
        }),
        ui: Some(UiSpec::new("rollAction.mitigate")),
        broadcasts: Vec::new(),
    }
}

/// Accept (wrap up) or resist (GM picks the attribute next).
pub(crate) fn submit(
    wf: &mut Workflow,
    ctx: &mut StageCtx<'_>,
    input: &StageInput,
) -> Result<StageEffects, WorkflowError> {
    authorize(ctx, ActionRole::Initiator, StageKey::Mitigate)?;

    let StageInput::Mitigate(input) = input else {
        return Err(WorkflowError::WrongInput {
            expected: StageKey::Mitigate,
            got: input.stage(),
        });
    };

    wf.stage = match input.choice {
        MitigateChoice::Accept => StageKey::WrapUp,
        MitigateChoice::Resist => StageKey::Resist,
    };
    Ok(StageEffects::default())
}
