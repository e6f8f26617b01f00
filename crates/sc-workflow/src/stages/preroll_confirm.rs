//! prerollconfirm: the point of no return. Cancel walks everything
//! back to action selection; accept builds the pool, rolls it,
//! records and broadcasts the result, and charges the push cost.
//!
//! Pool = action rating + 1 per push, confirmed help, and devil's
//! bargain. Table-granted bonus dice are recorded but stay out of the
//! pool. A pool of zero still rolls: two dice, keep the lower.

use serde_json::json;

use sc_core::ActionRole;
use sc_mechanics::{StressReason, apply_stress, best_and_crit, classify, roll_pool};

use crate::envelope::{Audience, Broadcast, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::{PrerollChoice, StageInput};
use crate::workflow::{ActionRollRecord, StageKey, Workflow};

use super::{StageCtx, StageEffects, authorize};

/// Build the initiator-facing envelope with everything on the line.
pub(crate) fn present(wf: &Workflow) -> StageEnvelope {
    StageEnvelope {
        audience: vec![Audience::Initiator],
        stage: wf.stage,
        stage_data: json!({
            "action": wf.context.action,
            "characterId": wf.context.character_id,
            "position": wf.context.position,
            "effect": wf.context.effect,
            "consequenceHint": wf.context.consequence_hint,
            "mods": wf.context.mods,
        }),
        ui: Some(UiSpec::new("rollAction.preRollConfirm")),
        broadcasts: Vec::new(),
    }
}

/// Cancel back to choose_action, or roll the dice.
pub(crate) fn submit(
    wf: &mut Workflow,
    ctx: &mut StageCtx<'_>,
    input: &StageInput,
) -> Result<StageEffects, WorkflowError> {
    authorize(ctx, ActionRole::Initiator, StageKey::PrerollConfirm)?;

    let StageInput::PrerollConfirm(input) = input else {
        return Err(WorkflowError::WrongInput {
            expected: StageKey::PrerollConfirm,
            got: input.stage(),
        });
    };

    if input.choice == PrerollChoice::Cancel {
        wf.context.reset_downstream();
        wf.stage = StageKey::ChooseAction;
        return Ok(StageEffects::default());
    }

    let action = wf.context.action.ok_or(WorkflowError::NoActionSelected)?;
    let character_id = wf
        .context
        .character_id
        .clone()
        .ok_or_else(|| WorkflowError::CharacterNotFound(String::new()))?;
    let character = ctx
        .scene
        .find_character(&character_id)
        .ok_or_else(|| WorkflowError::CharacterNotFound(character_id.clone()))?;

    let base = character.data.action_rating(action);
    let push = wf.context.mods.push;
    let bonus = u32::from(push)
        + u32::from(wf.context.mods.help_confirmed())
        + u32::from(wf.context.mods.devils_bargain);

    let pool = base + bonus;
    let rolls = roll_pool(pool as i32, ctx.rng);
    let (best, crit) = best_and_crit(&rolls);
    let outcome = classify(&rolls);

    let record = ActionRollRecord {
        character_id: character_id.clone(),
        character_name: character.name.clone(),
        action,
        base,
        bonus,
        pool,
        rolls,
        best,
        crit,
        outcome,
        position: wf.context.position,
        effect: wf.context.effect,
    };

    let broadcasts = vec![Broadcast::action_roll(record.clone())];
    wf.context.roll = Some(record);

    let mut patch = None;
    let mut overflow = false;
    if push {
        let applied = apply_stress(character, 2, StressReason::Push, ctx.config.stress_max);
        overflow = applied.overflow;
        wf.context.record_stress(&applied);
        patch = Some(applied.patch);
    }

    wf.stage = if overflow {
        StageKey::WrapUp
    } else {
        StageKey::Mitigate
    };

    Ok(StageEffects { broadcasts, patch })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PrerollConfirmInput;
    use crate::stages::testkit::{Fixture, workflow_at};
    use crate::workflow::HelpRequest;
    use sc_core::Position;
    use sc_mechanics::RollOutcome;

    fn decide(choice: PrerollChoice) -> StageInput {
        StageInput::PrerollConfirm(PrerollConfirmInput { choice })
    }

    #[test]
    fn accept_rolls_the_rated_pool() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);

        let effects = submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap();
        assert_eq!(wf.stage, StageKey::Mitigate);

        let roll = wf.context.roll.as_ref().unwrap();
        // Finesse 2, no bonuses.
        assert_eq!(roll.base, 2);
        assert_eq!(roll.bonus, 0);
        assert_eq!(roll.pool, 2);
        assert_eq!(roll.rolls.len(), 2);
        assert!(roll.rolls.iter().all(|d| (1..=6).contains(d)));
        assert_eq!(roll.position, Some(Position::Risky));

        // The roll is broadcast to the table; no stress was charged.
        assert_eq!(effects.broadcasts.len(), 1);
        assert!(effects.patch.is_none());
    }

    #[test]
    fn push_adds_a_die_and_costs_two_stress() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);
        wf.context.mods.push = true;

        let effects = submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap();

        let roll = wf.context.roll.as_ref().unwrap();
        assert_eq!(roll.pool, 3);
        assert_eq!(roll.rolls.len(), 3);

        let event = &wf.context.stress_events[0];
        assert_eq!(event.delta, 2);
        assert_eq!(event.new, 2);
        assert_eq!(
            effects.patch.unwrap().characters[0].data.stress,
            Some(2)
        );
        assert_eq!(wf.stage, StageKey::Mitigate);
    }

    #[test]
    fn confirmed_help_and_bargain_each_add_a_die() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);
        wf.context.mods.devils_bargain = true;
        wf.context.mods.help = Some(HelpRequest {
            helper_user_id: "bob".into(),
            confirmed: true,
        });

        submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap();
        let roll = wf.context.roll.as_ref().unwrap();
        assert_eq!(roll.bonus, 2);
        assert_eq!(roll.pool, 4);
    }

    #[test]
    fn unconfirmed_help_does_not_count() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);
        wf.context.mods.help = Some(HelpRequest {
            helper_user_id: "bob".into(),
            confirmed: false,
        });

        submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap();
        assert_eq!(wf.context.roll.as_ref().unwrap().bonus, 0);
    }

    #[test]
    fn bonus_dice_stay_out_of_the_pool() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);
        wf.context.mods.bonus_dice = 3;

        submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap();
        assert_eq!(wf.context.roll.as_ref().unwrap().pool, 2);
    }

    #[test]
    fn zero_pool_rolls_one_desperate_die() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);
        // Sway is unrated on Nyx's sheet.
        wf.context.action = Some(sc_core::ActionId::Sway);

        submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap();
        let roll = wf.context.roll.as_ref().unwrap();
        assert_eq!(roll.pool, 0);
        assert_eq!(roll.rolls.len(), 1);
        assert!((1..=6).contains(&roll.rolls[0]));
    }

    #[test]
    fn push_overflow_skips_mitigation() {
        let mut fixture = Fixture::new();
        fixture
            .scene
            .find_character_mut("c1")
            .unwrap()
            .data
            .stress = 8;
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);
        wf.context.mods.push = true;

        submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap();
        assert_eq!(wf.stage, StageKey::WrapUp);
        assert!(wf.context.needs_trauma);
        assert_eq!(wf.context.trauma_character_id.as_deref(), Some("c1"));
    }

    #[test]
    fn cancel_resets_and_returns_to_choose_action() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);
        wf.context.mods.push = true;

        let effects = submit(&mut wf, &mut ctx, &decide(PrerollChoice::Cancel)).unwrap();
        assert_eq!(wf.stage, StageKey::ChooseAction);
        assert!(!wf.context.mods.push);
        assert!(wf.context.position.is_none());
        // The selection survives for re-editing.
        assert_eq!(wf.context.character_id.as_deref(), Some("c1"));
        assert!(effects.broadcasts.is_empty());
    }

    #[test]
    fn outcome_matches_the_rolled_dice() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);

        submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap();
        let roll = wf.context.roll.as_ref().unwrap();
        let expected = match (roll.crit, roll.best) {
            (true, _) => RollOutcome::Crit,
            (false, 6) => RollOutcome::Good,
            (false, 4 | 5) => RollOutcome::Mixed,
            _ => RollOutcome::Bad,
        };
        assert_eq!(roll.outcome, expected);
    }

    #[test]
    fn gm_cannot_trigger_the_roll() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.ctx("gm");
        let mut wf = workflow_at(StageKey::PrerollConfirm);
        let before = wf.clone();

        let err = submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap_err();
        assert!(matches!(err, WorkflowError::Unauthorized { .. }));
        assert_eq!(wf, before);
    }

    #[test]
    fn missing_character_is_a_referential_failure() {
        let mut fixture = Fixture::new();
        fixture.scene.players.remove("alice");
        let mut ctx = fixture.ctx("alice");
        let mut wf = workflow_at(StageKey::PrerollConfirm);

        let err = submit(&mut wf, &mut ctx, &decide(PrerollChoice::Accept)).unwrap_err();
        assert!(matches!(err, WorkflowError::CharacterNotFound(_)));
        assert!(wf.context.roll.is_none());
    }
}
