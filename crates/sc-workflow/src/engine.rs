//! The workflow engine: stage dispatch, protocol checks, and audience
//! visibility.
//!
//! The engine is a plain value constructed once with its config and
//! shared by reference — no process-wide registry, no singletons. All
//! three operations are pure functions of their arguments (plus the
//! injected RNG): the caller owns the workflow, persists it, delivers
//! broadcasts, and merges patches.

use rand::rngs::StdRng;
use serde_json::json;

use sc_core::{ActionParticipants, CharacterData, SceneSnapshot};
use sc_mechanics::STRESS_MAX_DEFAULT;

use crate::envelope::{Audience, StageEnvelope, UiSpec};
use crate::error::WorkflowError;
use crate::input::StageInput;
use crate::result::SubmitResult;
use crate::stages::{self, StageCtx};
use crate::workflow::{StageKey, Workflow};

/// Tunables for the roll engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Default stress track maximum (characters may override upward).
    pub stress_max: u32,
    /// Most distinct traumas a character can carry.
    pub trauma_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stress_max: STRESS_MAX_DEFAULT,
            trauma_limit: CharacterData::TRAUMA_LIMIT,
        }
    }
}

impl EngineConfig {
    /// Set the default stress maximum.
    pub fn with_stress_max(mut self, stress_max: u32) -> Self {
        self.stress_max = stress_max;
        self
    }

    /// Set the trauma cap.
    pub fn with_trauma_limit(mut self, trauma_limit: usize) -> Self {
        self.trauma_limit = trauma_limit;
        self
    }
}

/// The roll-action workflow engine.
#[derive(Debug, Clone, Default)]
pub struct RollEngine {
    config: EngineConfig,
}

impl RollEngine {
    /// Create an engine with the given config.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's config.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Start a fresh workflow at choose_action.
    ///
    /// The new state is visible to the initiator only; everyone else
    /// learns about the roll when their stage comes around.
    pub fn start(&self, participants: &ActionParticipants) -> SubmitResult {
        let workflow = Workflow::new();
        let participant_ids = participants.initiator_user_id.iter().cloned().collect();
        SubmitResult {
            ok: true,
            issues: Vec::new(),
            workflow: Some(workflow),
            next: None,
            broadcasts: Vec::new(),
            participant_ids,
            session_patch: None,
        }
    }

    /// Project the current stage for its audience.
    ///
    /// Read-only and idempotent: call it as often as needed, nothing
    /// moves. Envelopes are addressed by audience selectors; mapping
    /// those to user ids is [`visible_user_ids`]'s job.
    pub fn present(
        &self,
        scene: &SceneSnapshot,
        participants: &ActionParticipants,
        workflow: &Workflow,
    ) -> StageEnvelope {
        match workflow.stage {
            StageKey::ChooseAction => stages::choose_action::present(workflow, scene, participants),
            StageKey::GmSetPositionEffect => stages::gm_set_position_effect::present(workflow),
            StageKey::PlayerAddMods => stages::player_add_mods::present(workflow, participants),
            StageKey::AssistConfirm => stages::assist_confirm::present(workflow),
            StageKey::GmFinalize => stages::gm_finalize::present(workflow),
            StageKey::PrerollConfirm => stages::preroll_confirm::present(workflow),
            StageKey::Mitigate => stages::mitigate::present(workflow),
            StageKey::Resist => stages::resist::present(workflow),
            StageKey::WrapUp => stages::wrap_up::present(workflow),
            StageKey::Done => done_envelope(workflow),
        }
    }

    /// Submit the actor's input against the workflow's current stage.
    ///
    /// Protocol checks first (active status, non-terminal stage), then
    /// the stage handler authorizes, validates, and advances. Failures
    /// come back as structured issues with no workflow attached — the
    /// caller keeps its unchanged copy and can re-prompt the actor.
    pub fn submit(
        &self,
        scene: &SceneSnapshot,
        actor_user_id: &str,
        participants: &ActionParticipants,
        workflow: Workflow,
        input: &StageInput,
        rng: &mut StdRng,
    ) -> SubmitResult {
        let mut wf = workflow;

        if !wf.is_active() {
            return SubmitResult::rejected(
                vec![WorkflowError::NotActive.into_issue()],
                visible_user_ids(participants, &wf),
            );
        }

        let mut ctx = StageCtx {
            scene,
            actor: actor_user_id,
            participants,
            config: &self.config,
            rng,
        };

        let handled = match wf.stage {
            StageKey::ChooseAction => stages::choose_action::submit(&mut wf, &mut ctx, input),
            StageKey::GmSetPositionEffect => {
                stages::gm_set_position_effect::submit(&mut wf, &mut ctx, input)
            }
            StageKey::PlayerAddMods => stages::player_add_mods::submit(&mut wf, &mut ctx, input),
            StageKey::AssistConfirm => stages::assist_confirm::submit(&mut wf, &mut ctx, input),
            StageKey::GmFinalize => stages::gm_finalize::submit(&mut wf, &mut ctx, input),
            StageKey::PrerollConfirm => stages::preroll_confirm::submit(&mut wf, &mut ctx, input),
            StageKey::Mitigate => stages::mitigate::submit(&mut wf, &mut ctx, input),
            StageKey::Resist => stages::resist::submit(&mut wf, &mut ctx, input),
            StageKey::WrapUp => stages::wrap_up::submit(&mut wf, &mut ctx, input),
            StageKey::Done => Err(WorkflowError::TerminalStage),
        };

        match handled {
            Ok(effects) => {
                let participant_ids = visible_user_ids(participants, &wf);
                let next = self.present(scene, participants, &wf);
                SubmitResult {
                    ok: true,
                    issues: Vec::new(),
                    workflow: Some(wf),
                    next: Some(next),
                    broadcasts: effects.broadcasts,
                    participant_ids,
                    session_patch: effects.patch,
                }
            }
            Err(err) => SubmitResult::rejected(
                vec![err.into_issue()],
                visible_user_ids(participants, &wf),
            ),
        }
    }
}

/// The users allowed to see the workflow in its current stage.
///
/// Initiator-facing stages show only the initiator, GM-facing stages
/// only the GM; the assist prompt goes to the invited helper (GM if
/// none is on record), and the finished roll goes to both GM and
/// initiator, deduplicated when they are the same person.
pub fn visible_user_ids(participants: &ActionParticipants, workflow: &Workflow) -> Vec<String> {
    let gm = participants.gm_user_id.clone();
    let initiator = participants.initiator_user_id.clone();

    match workflow.stage {
        StageKey::ChooseAction
        | StageKey::PlayerAddMods
        | StageKey::PrerollConfirm
        | StageKey::Mitigate => initiator.into_iter().collect(),
        StageKey::GmSetPositionEffect
        | StageKey::GmFinalize
        | StageKey::Resist
        | StageKey::WrapUp => gm.into_iter().collect(),
        StageKey::AssistConfirm => match workflow.context.mods.help.as_ref() {
            Some(help) => vec![help.helper_user_id.clone()],
            None => gm.into_iter().collect(),
        },
        StageKey::Done => {
            let mut ids: Vec<String> = gm.into_iter().collect();
            if let Some(initiator) = initiator
                && !ids.contains(&initiator)
            {
                ids.push(initiator);
            }
            ids
        }
    }
}

/// The completed-summary projection for the terminal stage.
fn done_envelope(workflow: &Workflow) -> StageEnvelope {
    StageEnvelope {
        audience: vec![Audience::All],
        stage: workflow.stage,
        stage_data: json!({
            "roll": workflow.context.roll,
            "resist": workflow.context.resist,
            "summary": workflow.context.summary,
            "trauma": workflow.context.trauma,
            "stressEvents": workflow.context.stress_events,
        }),
        ui: Some(UiSpec::new("rollAction.completedSummary")),
        broadcasts: Vec::new(),
    }
}
