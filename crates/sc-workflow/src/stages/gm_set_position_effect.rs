//! gm_set_position_effect: the GM frames the attempt — how dangerous
//! it is, how much it can accomplish, and what failure might cost.

use serde_json::json;

use sc_core::{ActionRole, Effect, Position};

use crate::envelope::{Audience, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::StageInput;
use crate::workflow::{StageKey, Workflow};

use super::{StageCtx, StageEffects, authorize};

/// Build the GM-facing envelope showing what the initiator picked.
pub(crate) fn present(wf: &Workflow) -> StageEnvelope {
    StageEnvelope {
        audience: vec![Audience::Gm],
        stage: wf.stage,
        stage_data: json!({
            "action": wf.context.action,
            "characterId": wf.context.character_id,
        }),
        ui: Some(
            UiSpec::new("rollAction.gmSetPositionEffect").with_props(json!({
                "positions": Position::ALL.map(|p| p.as_str()),
                "effects": Effect::ALL.map(|e| e.as_str()),
            })),
        ),
        broadcasts: Vec::new(),
    }
}

/// Record position, effect, and the consequence hint.
pub(crate) fn submit(
    wf: &mut Workflow,
    ctx: &mut StageCtx<'_>,
    input: &StageInput,
) -> Result<StageEffects, WorkflowError> {
    authorize(ctx, ActionRole::Gm, StageKey::GmSetPositionEffect)?;

    let StageInput::GmSetPositionEffect(input) = input else {
        return Err(WorkflowError::WrongInput {
            expected: StageKey::GmSetPositionEffect,
            got: input.stage(),
        });
    };

    wf.context.position = Some(input.position);
    wf.context.effect = Some(input.effect);
    wf.context.consequence_hint = Some(input.consequence_hint.clone().unwrap_or_default());

    wf.stage = StageKey::PlayerAddMods;
    Ok(StageEffects::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::GmSetInput;
    use crate::stages::testkit::{Fixture, workflow_at};

    fn set(position: Position, effect: Effect, hint: Option<&str>) -> StageInput {
        StageInput::GmSetPositionEffect(GmSetInput {
            position,
            effect,
            consequence_hint: hint.map(str::to_string),
        })
    }

    #[test]
    fn gm_records_the_frame() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("gm");
        let mut wf = workflow_at(StageKey::GmSetPositionEffect);

        submit(
            &mut wf,
            &mut ctx,
            &set(Position::Risky, Effect::Standard, Some("a noisy fall")),
        )
        .unwrap();

        assert_eq!(wf.stage, StageKey::PlayerAddMods);
        assert_eq!(wf.context.position, Some(Position::Risky));
        assert_eq!(wf.context.effect, Some(Effect::Standard));
        assert_eq!(wf.context.consequence_hint.as_deref(), Some("a noisy fall"));
    }

    #[test]
    fn missing_hint_is_stored_as_empty() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("gm");
        let mut wf = workflow_at(StageKey::GmSetPositionEffect);

        submit(&mut wf, &mut ctx, &set(Position::Controlled, Effect::Great, None)).unwrap();
        assert_eq!(wf.context.consequence_hint.as_deref(), Some(""));
    }

    #[test]
    fn initiator_cannot_set_the_frame() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::GmSetPositionEffect);
        let before = wf.clone();

        let err = submit(
            &mut wf,
            &mut ctx,
            &set(Position::Risky, Effect::Standard, None),
        )
        .unwrap_err();
        assert!(matches!(err, WorkflowError::Unauthorized { .. }));
        assert_eq!(wf, before);
    }

    #[test]
    fn present_shows_the_selection_to_the_gm() {
        let wf = workflow_at(StageKey::GmSetPositionEffect);
        let envelope = present(&wf);
        assert_eq!(envelope.audience, vec![Audience::Gm]);
        assert_eq!(envelope.stage_data["action"], "finesse");
        let props = &envelope.ui.as_ref().unwrap().props;
        assert_eq!(props["positions"][1], "risky");
        assert_eq!(props["effects"][2], "great");
    }
}
