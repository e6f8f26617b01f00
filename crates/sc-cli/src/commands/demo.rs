use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use sc_core::{
    ActionId, ActionParticipants, AttributeId, CharacterRef, Effect, Position, SceneSnapshot,
    TraumaId,
};
use sc_mechanics::RollOutcome;
use sc_workflow::{
    AssistConfirmInput, Broadcast, ChooseActionInput, DiceBroadcast, EngineConfig,
    GmFinalizeInput, GmSetInput, MitigateChoice, MitigateInput, PlayerModsInput, PrerollChoice,
    PrerollConfirmInput, ResistInput, RollEngine, StageInput, StageKey, Workflow, WrapUpInput,
};

const GM: &str = "marta";
const INITIATOR: &str = "jules";
const HELPER: &str = "petra";

pub fn run(seed: u64, push: bool, bargain: bool, helper: bool, resist: bool) -> Result<(), String> {
    let mut scene = demo_scene();
    let participants = ActionParticipants::new(GM, INITIATOR);
    let engine = RollEngine::new(EngineConfig::default());
    let mut rng = StdRng::seed_from_u64(seed);

    println!("  {} action roll (seed {seed})", "Starting".bold());
    println!("  GM {GM}, initiator {INITIATOR}, helper {HELPER}\n");

    let start = engine.start(&participants);
    let mut wf = start.workflow.ok_or("start returned no workflow")?;

    // The stage machine decides the path; the flags only shape inputs.
    let mut steps = 0;
    while wf.is_active() {
        steps += 1;
        if steps > 20 {
            return Err("demo did not reach the terminal stage".to_string());
        }

        let (actor, input) = next_input(&wf, push, bargain, helper, resist)?;
        println!("  {} {} — {actor} acts", "Stage".bold(), wf.stage);

        let result = engine.submit(&scene, actor, &participants, wf, &input, &mut rng);
        if !result.ok {
            let issues: Vec<String> = result
                .issues
                .iter()
                .map(|i| format!("{}: {}", i.path, i.message))
                .collect();
            return Err(issues.join("; "));
        }

        for broadcast in &result.broadcasts {
            print_broadcast(broadcast);
        }
        if let Some(patch) = &result.session_patch {
            patch.apply_to(&mut scene);
        }
        wf = result.workflow.ok_or("accepted submit carried no workflow")?;
    }

    print_summary(&wf, &scene);
    Ok(())
}

/// The built-in two-player scene.
fn demo_scene() -> SceneSnapshot {
    SceneSnapshot::new()
        .with_player(
            INITIATOR,
            vec![
                CharacterRef::new("nyx", "Nyx")
                    .with_action(ActionId::Finesse, 2)
                    .with_action(ActionId::Prowl, 1),
            ],
        )
        .with_player(HELPER, vec![CharacterRef::new("vale", "Vale")])
}

/// Pick the next actor and input for whatever stage the workflow is in.
fn next_input(
    wf: &Workflow,
    push: bool,
    bargain: bool,
    helper: bool,
    resist: bool,
) -> Result<(&'static str, StageInput), String> {
    let step = match wf.stage {
        StageKey::ChooseAction => (
            INITIATOR,
            StageInput::ChooseAction(ChooseActionInput {
                character_id: "nyx".into(),
                action: ActionId::Finesse,
                item_id: None,
            }),
        ),
        StageKey::GmSetPositionEffect => (
            GM,
            StageInput::GmSetPositionEffect(GmSetInput {
                position: Position::Risky,
                effect: Effect::Standard,
                consequence_hint: Some("the whole house hears it".into()),
            }),
        ),
        StageKey::PlayerAddMods => (
            INITIATOR,
            StageInput::PlayerAddMods(PlayerModsInput {
                push,
                devils_bargain: bargain,
                bonus_dice: 0,
                help: helper,
                helper_user_id: helper.then(|| HELPER.to_string()),
            }),
        ),
        StageKey::AssistConfirm => (
            HELPER,
            StageInput::AssistConfirm(AssistConfirmInput { accept_help: true }),
        ),
        StageKey::GmFinalize => (GM, StageInput::GmFinalize(GmFinalizeInput::default())),
        StageKey::PrerollConfirm => (
            INITIATOR,
            StageInput::PrerollConfirm(PrerollConfirmInput {
                choice: PrerollChoice::Accept,
            }),
        ),
        StageKey::Mitigate => (
            INITIATOR,
            StageInput::Mitigate(MitigateInput {
                choice: if resist {
                    MitigateChoice::Resist
                } else {
                    MitigateChoice::Accept
                },
            }),
        ),
        StageKey::Resist => (
            GM,
            StageInput::Resist(ResistInput {
                attribute: AttributeId::Prowess,
                confirm: true,
            }),
        ),
        StageKey::WrapUp => (
            GM,
            StageInput::WrapUp(WrapUpInput {
                trauma: wf.context.needs_trauma.then_some(TraumaId::Haunted),
                summary: Some("the job is done".into()),
            }),
        ),
        StageKey::Done => return Err("no input for the terminal stage".to_string()),
    };
    Ok(step)
}

fn print_broadcast(broadcast: &Broadcast) {
    match broadcast {
        Broadcast::DiceRoll(DiceBroadcast::Action(roll)) => {
            println!(
                "  {} {} rolls {} with {} dice: {:?} → {}",
                "Dice".bold(),
                roll.character_name,
                roll.action,
                roll.pool,
                roll.rolls,
                outcome_label(roll.outcome),
            );
        }
        Broadcast::DiceRoll(DiceBroadcast::Resistance(roll)) => {
            println!(
                "  {} resistance via {} with {} dice: {:?} → {} stress",
                "Dice".bold(),
                roll.attribute,
                roll.pool,
                roll.rolls,
                roll.stress_cost,
            );
        }
    }
}

fn outcome_label(outcome: RollOutcome) -> colored::ColoredString {
    match outcome {
        RollOutcome::Crit => "critical".green().bold(),
        RollOutcome::Good => "good".green(),
        RollOutcome::Mixed => "mixed".yellow(),
        RollOutcome::Bad => "bad".red(),
    }
}

fn print_summary(wf: &Workflow, scene: &SceneSnapshot) {
    println!("\n  {} {}", "Finished".bold(), outcome_line(wf));

    if !wf.context.stress_events.is_empty() {
        println!("  Stress trail:");
        for event in &wf.context.stress_events {
            let overflow = if event.overflow { " (overflow!)" } else { "" };
            println!(
                "    {}: {} → {} of {}{overflow}",
                event.character_id, event.old, event.new, event.max
            );
        }
    }

    println!("  Sheets:");
    for entry in scene.players.values() {
        for ch in &entry.characters {
            let traumas: Vec<&str> = ch.data.traumas.iter().map(|t| t.as_str()).collect();
            println!(
                "    {} — stress {}, traumas [{}]",
                ch.name,
                ch.data.stress,
                traumas.join(", ")
            );
        }
    }
}

/// One-line outcome description for the summary header.
fn outcome_line(wf: &Workflow) -> String {
    match &wf.context.roll {
        Some(roll) => format!("{} on {} (best die {})", roll.outcome, roll.action, roll.best),
        None => "no roll was made".to_string(),
    }
}
