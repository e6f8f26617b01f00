//! wrap_up: the GM closes the roll — a summary for the record and,
//! when a track overflowed, the trauma that goes with it. The trauma
//! list is deduplicated and capped.

use serde_json::json;

use sc_core::{ActionRole, SessionPatch};

use crate::envelope::{Audience, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::StageInput;
use crate::workflow::{StageKey, Workflow, WorkflowStatus};

use super::{StageCtx, StageEffects, authorize};

/// Build the GM-facing envelope: the full trail of the roll.
pub(crate) fn present(wf: &Workflow) -> StageEnvelope {
    StageEnvelope {
        audience: vec![Audience::Gm],
        stage: wf.stage,
        stage_data: json!({
            "roll": wf.context.roll,
            "resist": wf.context.resist,
            "summary": wf.context.summary,
            "needsTrauma": wf.context.needs_trauma,
            "traumaCharacterId": wf.context.trauma_character_id,
            "stressEvents": wf.context.stress_events,
        }),
        ui: Some(UiSpec::new("rollAction.wrapUp")),
        broadcasts: Vec::new(),
    }
}

/// Record the summary and the trauma, then complete the workflow.
pub(crate) fn submit(
    wf: &mut Workflow,
    ctx: &mut StageCtx<'_>,
    input: &StageInput,
) -> Result<StageEffects, WorkflowError> {
    authorize(ctx, ActionRole::Gm, StageKey::WrapUp)?;

    let StageInput::WrapUp(input) = input else {
        return Err(WorkflowError::WrongInput {
            expected: StageKey::WrapUp,
            got: input.stage(),
        });
    };

    let mut patch = None;
    if let Some(trauma) = input.trauma {
        let target_id = wf
            .context
            .trauma_character_id
            .clone()
            .or_else(|| wf.context.character_id.clone())
            .ok_or(WorkflowError::TraumaTargetMissing)?;
        let character = ctx
            .scene
            .find_character(&target_id)
            .ok_or(WorkflowError::TraumaTargetMissing)?;

        let mut traumas = character.data.traumas.clone();
        if !traumas.contains(&trauma) {
            if traumas.len() >= ctx.config.trauma_limit {
                return Err(WorkflowError::TraumaListFull(target_id));
            }
            traumas.push(trauma);
        }
        patch = Some(SessionPatch::traumas(target_id.as_str(), traumas));

        wf.context.trauma = Some(trauma);
        wf.context.needs_trauma = false;
        wf.context.trauma_character_id = None;
    }

    if let Some(summary) = &input.summary {
        wf.context.summary = Some(summary.clone());
    }

    wf.stage = StageKey::Done;
    wf.status = WorkflowStatus::Completed;
    Ok(StageEffects {
        broadcasts: Vec::new(),
        patch,
    })
}
