//! assist_confirm: only the invited helper may answer. Accepting
//! costs the helper's character 1 stress immediately — which can
//! itself overflow and send the whole roll to wrap-up for a trauma.

use serde_json::json;

use sc_mechanics::{StressReason, apply_stress};

use crate::envelope::{Audience, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::StageInput;
use crate::workflow::{StageKey, Workflow};

use super::{StageCtx, StageEffects};

/// Build the helper-facing envelope. Falls back to the GM when no
/// helper is on record (a malformed workflow, but never invisible).
pub(crate) fn present(wf: &Workflow) -> StageEnvelope {
    let audience = match wf.context.mods.help.as_ref() {
        Some(help) => vec![Audience::User {
            user_id: help.helper_user_id.clone(),
        }],
        None => vec![Audience::Gm],
    };

    StageEnvelope {
        audience,
        stage: wf.stage,
        stage_data: json!({
            "action": wf.context.action,
            "characterId": wf.context.character_id,
        }),
        ui: Some(UiSpec::new("rollAction.assistConfirm")),
        broadcasts: Vec::new(),
    }
}

/// Accept or decline the invitation.
pub(crate) fn submit(
    wf: &mut Workflow,
    ctx: &mut StageCtx<'_>,
    input: &StageInput,
) -> Result<StageEffects, WorkflowError> {
    // Authorization here is by identity, not role: only the named
    // helper may answer.
    let helper_user_id = match wf.context.mods.help.as_ref() {
        Some(help) if help.helper_user_id == ctx.actor => help.helper_user_id.clone(),
        _ => return Err(WorkflowError::NotInvitedHelper),
    };

    let StageInput::AssistConfirm(input) = input else {
        return Err(WorkflowError::WrongInput {
            expected: StageKey::AssistConfirm,
            got: input.stage(),
        });
    };

    if !input.accept_help {
        wf.context.mods.help = None;
        wf.stage = StageKey::GmFinalize;
        return Ok(StageEffects::default());
    }

    let helper_character = ctx
        .scene
        .first_character_of(&helper_user_id)
        .ok_or_else(|| WorkflowError::HelperCharacterMissing(helper_user_id.clone()))?;

    let applied = apply_stress(
        helper_character,
        1,
        StressReason::Assist {
            helper_user_id: helper_user_id.clone(),
        },
        ctx.config.stress_max,
    );

    if let Some(help) = wf.context.mods.help.as_mut() {
        help.confirmed = true;
    }
    wf.context.record_stress(&applied);

    wf.stage = if applied.overflow {
        StageKey::WrapUp
    } else {
        StageKey::GmFinalize
    };

    Ok(StageEffects {
        broadcasts: Vec::new(),
        patch: Some(applied.patch),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::AssistConfirmInput;
    use crate::stages::testkit::{Fixture, workflow_at};
    use crate::workflow::HelpRequest;

    fn workflow_with_help() -> Workflow {
        let mut wf = workflow_at(StageKey::AssistConfirm);
        wf.context.mods.help = Some(HelpRequest {
            helper_user_id: "bob".into(),
            confirmed: false,
        });
        wf
    }

    fn answer(accept: bool) -> StageInput {
        StageInput::AssistConfirm(AssistConfirmInput {
            accept_help: accept,
        })
    }

    #[test]
    fn accepting_costs_one_stress_and_confirms() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("bob");
        let mut wf = workflow_with_help();

        let effects = submit(&mut wf, &mut ctx, &answer(true)).unwrap();
        assert_eq!(wf.stage, StageKey::GmFinalize);
        assert!(wf.context.mods.help_confirmed());

        // Bob's character c2 went from 0 to 1 stress.
        let event = &wf.context.stress_events[0];
        assert_eq!(event.character_id, "c2");
        assert_eq!(event.new, 1);
        assert!(!event.overflow);

        let patch = effects.patch.unwrap();
        assert_eq!(patch.characters[0].id, "c2");
        assert_eq!(patch.characters[0].data.stress, Some(1));
    }

    #[test]
    fn declining_clears_the_request() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("bob");
        let mut wf = workflow_with_help();

        let effects = submit(&mut wf, &mut ctx, &answer(false)).unwrap();
        assert_eq!(wf.stage, StageKey::GmFinalize);
        assert!(wf.context.mods.help.is_none());
        assert!(effects.patch.is_none());
        assert!(wf.context.stress_events.is_empty());
    }

    #[test]
    fn helper_overflow_detours_to_wrap_up() {
        let mut fixture = Fixture::new();
        fixture
            .scene
            .find_character_mut("c2")
            .unwrap()
            .data
            .stress = 8;
        let mut ctx = fixture.ctx("bob");
        let mut wf = workflow_with_help();

        submit(&mut wf, &mut ctx, &answer(true)).unwrap();
        assert_eq!(wf.stage, StageKey::WrapUp);
        assert!(wf.context.needs_trauma);
        assert_eq!(wf.context.trauma_character_id.as_deref(), Some("c2"));
        assert_eq!(wf.context.stress_events[0].new, 0);
    }

    #[test]
    fn only_the_invited_helper_may_answer() {
        let mut fixture = Fixture::new();
        let mut wf = workflow_with_help();
        let before = wf.clone();

        for intruder in ["alice", "gm", "carol"] {
            let mut ctx = fixture.ctx(intruder);
            let err = submit(&mut wf, &mut ctx, &answer(true)).unwrap_err();
            assert!(matches!(err, WorkflowError::NotInvitedHelper));
            assert_eq!(wf, before);
        }
    }

    #[test]
    fn missing_help_request_rejects_everyone() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("bob");
        let mut wf = workflow_at(StageKey::AssistConfirm);

        let err = submit(&mut wf, &mut ctx, &answer(true)).unwrap_err();
        assert!(matches!(err, WorkflowError::NotInvitedHelper));
    }

    #[test]
    fn helper_without_character_is_rejected_unconfirmed() {
        let mut fixture = Fixture::new();
        fixture.scene.players.remove("bob");
        let mut ctx = fixture.ctx("bob");
        let mut wf = workflow_with_help();
        let before = wf.clone();

        let err = submit(&mut wf, &mut ctx, &answer(true)).unwrap_err();
        assert!(matches!(err, WorkflowError::HelperCharacterMissing(_)));
        assert_eq!(wf, before);
    }

    #[test]
    fn present_targets_the_helper() {
        let wf = workflow_with_help();
        let envelope = present(&wf);
        assert_eq!(
            envelope.audience,
            vec![Audience::User {
                user_id: "bob".into()
            }]
        );
    }

    #[test]
    fn present_falls_back_to_gm_without_helper() {
        let wf = workflow_at(StageKey::AssistConfirm);
        let envelope = present(&wf);
        assert_eq!(envelope.audience, vec![Audience::Gm]);
    }
}
