//! resist: the GM picks the attribute, the attribute rating forms the
//! pool, and stress pays for the escape. Cost = max(0, 6 − best),
//! reduced by one on a critical (floored at zero) — rules as written.

use serde_json::json;

use sc_core::{ActionRole, AttributeId};
use sc_mechanics::{StressReason, apply_stress, best_and_crit, roll_pool};

use crate::envelope::{Audience, Broadcast, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::StageInput;
use crate::workflow::{ResistRollRecord, StageKey, Workflow};

use super::{StageCtx, StageEffects, authorize};

/// Build the GM-facing envelope: the roll being resisted and the
/// attribute menu.
pub(crate) fn present(wf: &Workflow) -> StageEnvelope {
    StageEnvelope {
        audience: vec![Audience::Gm],
        stage: wf.stage,
        stage_data: json!({
            "roll": wf.context.roll,
            "consequenceHint": wf.context.consequence_hint,
        }),
        ui: Some(UiSpec::new("rollAction.resist").with_props(json!({
            "attributes": AttributeId::ALL.map(|a| a.as_str()),
        }))),
        broadcasts: Vec::new(),
    }
}

/// Roll the resistance and charge its stress cost.
pub(crate) fn submit(
    wf: &mut Workflow,
    ctx: &mut StageCtx<'_>,
    input: &StageInput,
) -> Result<StageEffects, WorkflowError> {
    authorize(ctx, ActionRole::Gm, StageKey::Resist)?;

    let StageInput::Resist(input) = input else {
        return Err(WorkflowError::WrongInput {
            expected: StageKey::Resist,
            got: input.stage(),
        });
    };

    if !input.confirm {
        wf.stage = StageKey::WrapUp;
        return Ok(StageEffects::default());
    }

    let character_id = wf
        .context
        .character_id
        .clone()
        .ok_or_else(|| WorkflowError::CharacterNotFound(String::new()))?;
    let character = ctx
        .scene
        .find_character(&character_id)
        .ok_or_else(|| WorkflowError::CharacterNotFound(character_id.clone()))?;

    let pool = character.data.attribute_rating(input.attribute);
    let rolls = roll_pool(pool as i32, ctx.rng);
    let (best, crit) = best_and_crit(&rolls);
    let stress_cost = resist_cost(best, crit);

    let record = ResistRollRecord {
        attribute: input.attribute,
        pool,
        rolls,
        best,
        crit,
        stress_cost,
    };

    let broadcasts = vec![Broadcast::resistance_roll(record.clone())];
    wf.context.resist = Some(record);

    let applied = apply_stress(
        character,
        stress_cost,
        StressReason::Resist {
            attribute: input.attribute,
            best,
            crit,
        },
        ctx.config.stress_max,
    );
    wf.context.record_stress(&applied);

    wf.stage = StageKey::WrapUp;
    Ok(StageEffects {
        broadcasts,
        patch: Some(applied.patch),
    })
}

/// Stress paid for a resistance roll: max(0, 6 − best), one less on a
/// critical, never below zero.
pub(crate) fn resist_cost(best: u32, crit: bool) -> u32 {
    let cost = 6u32.saturating_sub(best);
    if crit { cost.saturating_sub(1) } else { cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ResistInput;
    use crate::stages::testkit::{Fixture, workflow_at};

    fn resist(attribute: AttributeId) -> StageInput {
        StageInput::Resist(ResistInput {
            attribute,
            confirm: true,
        })
    }

    #[test]
    fn resistance_uses_the_attribute_rating_as_pool() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("gm");
        let mut wf = workflow_at(StageKey::Resist);

        let effects = submit(&mut wf, &mut ctx, &resist(AttributeId::Prowess)).unwrap();
        assert_eq!(wf.stage, StageKey::WrapUp);

        // Nyx has Finesse and Prowl rated: Prowess rating 2.
        let record = wf.context.resist.as_ref().unwrap();
        assert_eq!(record.pool, 2);
        assert_eq!(record.rolls.len(), 2);
        assert_eq!(record.stress_cost, resist_cost(record.best, record.crit));

        assert_eq!(effects.broadcasts.len(), 1);
        assert!(effects.patch.is_some());
    }

    #[test]
    fn unrated_attribute_rolls_the_zero_pool() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("gm");
        let mut wf = workflow_at(StageKey::Resist);

        submit(&mut wf, &mut ctx, &resist(AttributeId::Resolve)).unwrap();
        let record = wf.context.resist.as_ref().unwrap();
        assert_eq!(record.pool, 0);
        assert_eq!(record.rolls.len(), 1);
    }

    #[test]
    fn stress_cost_lands_in_the_ledger() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("gm");
        let mut wf = workflow_at(StageKey::Resist);

        submit(&mut wf, &mut ctx, &resist(AttributeId::Insight)).unwrap();
        let record = wf.context.resist.clone().unwrap();
        let event = &wf.context.stress_events[0];
        assert_eq!(event.delta, record.stress_cost);
        assert_eq!(event.character_id, "c1");
    }

    #[test]
    fn declining_the_confirmation_skips_the_roll() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("gm");
        let mut wf = workflow_at(StageKey::Resist);

        let effects = submit(
            &mut wf,
            &mut ctx,
            &StageInput::Resist(ResistInput {
                attribute: AttributeId::Prowess,
                confirm: false,
            }),
        )
        .unwrap();
        assert_eq!(wf.stage, StageKey::WrapUp);
        assert!(wf.context.resist.is_none());
        assert!(effects.patch.is_none());
    }

    #[test]
    fn resistance_overflow_still_wraps_up_with_trauma_flagged() {
        let mut fixture = Fixture::new();
        fixture
            .scene
            .find_character_mut("c1")
            .unwrap()
            .data
            .stress = 8;
        let mut ctx = fixture.ctx("gm");
        let mut wf = workflow_at(StageKey::Resist);

        submit(&mut wf, &mut ctx, &resist(AttributeId::Resolve)).unwrap();
        let record = wf.context.resist.as_ref().unwrap();
        if record.stress_cost >= 1 {
            assert!(wf.context.needs_trauma);
            assert_eq!(wf.context.trauma_character_id.as_deref(), Some("c1"));
        }
        assert_eq!(wf.stage, StageKey::WrapUp);
    }

    #[test]
    fn only_the_gm_chooses_the_attribute() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::Resist);
        let before = wf.clone();

        let err = submit(&mut wf, &mut ctx, &resist(AttributeId::Prowess)).unwrap_err();
        assert!(matches!(err, WorkflowError::Unauthorized { .. }));
        assert_eq!(wf, before);
    }

    #[test]
    fn cost_table() {
        assert_eq!(resist_cost(6, false), 0);
        // The crit discount never goes below zero.
        assert_eq!(resist_cost(6, true), 0);
        assert_eq!(resist_cost(5, false), 1);
        assert_eq!(resist_cost(4, false), 2);
        assert_eq!(resist_cost(1, false), 5);
        assert_eq!(resist_cost(0, false), 6);
    }

    #[test]
    fn present_offers_the_attribute_menu() {
        let wf = workflow_at(StageKey::Resist);
        let envelope = present(&wf);
        assert_eq!(envelope.audience, vec![Audience::Gm]);
        let props = &envelope.ui.as_ref().unwrap().props;
        assert_eq!(props["attributes"][0], "insight");
        assert_eq!(props["attributes"][2], "resolve");
    }
}
