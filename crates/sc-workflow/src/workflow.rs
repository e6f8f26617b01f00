//! The workflow instance and its typed context.
//!
//! The context is the accumulated record of every decision made during
//! the roll. Each field is written by exactly one stage; later stages
//! only read it. Stages that loop back (`gm_finalize` deny, the
//! pre-roll cancel) clear the downstream fields through
//! [`RollContext::reset_downstream`] so a restarted roll never sees
//! stale decisions.

use serde::{Deserialize, Serialize};

use sc_core::{ActionId, AttributeId, Effect, Position, TraumaId};
use sc_mechanics::{RollOutcome, StressApplication, StressEvent};

/// Identifier of the stage currently owning the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKey {
    /// The initiator picks a character, an action, and optionally an item.
    ChooseAction,
    /// The GM sets position and effect and sketches the consequences.
    GmSetPositionEffect,
    /// The initiator attaches modifiers (push / bargain / help).
    PlayerAddMods,
    /// The invited helper accepts or declines.
    AssistConfirm,
    /// The GM allows the roll, corrects it, or sends it back.
    GmFinalize,
    /// The initiator confirms and the dice are rolled.
    #[serde(rename = "prerollconfirm")]
    PrerollConfirm,
    /// The initiator accepts the outcome or chooses to resist.
    Mitigate,
    /// The GM picks the resistance attribute and the cost is rolled.
    Resist,
    /// The GM records the summary and any trauma.
    WrapUp,
    /// Terminal stage; the workflow is complete.
    Done,
}

impl StageKey {
    /// The wire token for this stage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChooseAction => "choose_action",
            Self::GmSetPositionEffect => "gm_set_position_effect",
            Self::PlayerAddMods => "player_add_mods",
            Self::AssistConfirm => "assist_confirm",
            Self::GmFinalize => "gm_finalize",
            Self::PrerollConfirm => "prerollconfirm",
            Self::Mitigate => "mitigate",
            Self::Resist => "resist",
            Self::WrapUp => "wrap_up",
            Self::Done => "done",
        }
    }

    /// Whether this stage ends the workflow.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl std::fmt::Display for StageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a workflow instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    /// The roll is in progress.
    #[default]
    Active,
    /// The roll ran to its terminal stage.
    Completed,
    /// The roll was abandoned by the table.
    Canceled,
}

/// A request for help from another player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    /// The user asked to help.
    pub helper_user_id: String,
    /// Set once the helper accepts; only confirmed help adds a die.
    pub confirmed: bool,
}

/// Modifiers the initiator attached to the roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mods {
    /// Push yourself: +1 die, 2 stress after the roll.
    pub push: bool,
    /// Devil's bargain: +1 die for a GM-imposed complication.
    pub devils_bargain: bool,
    /// Extra dice granted at the table. Recorded and shown to the GM
    /// but not added to the computed pool.
    pub bonus_dice: u32,
    /// Pending or confirmed help from another player.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<HelpRequest>,
}

impl Mods {
    /// Whether confirmed help is contributing a die.
    pub fn help_confirmed(&self) -> bool {
        self.help.as_ref().is_some_and(|h| h.confirmed)
    }
}

/// The recorded action roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRollRecord {
    /// The rolling character.
    pub character_id: String,
    /// Display name, captured for broadcasts.
    pub character_name: String,
    /// The attempted action.
    pub action: ActionId,
    /// The character's rating in that action.
    pub base: u32,
    /// Dice added by modifiers (push, confirmed help, bargain).
    pub bonus: u32,
    /// Total pool size that was rolled.
    pub pool: u32,
    /// The dice as rolled.
    pub rolls: Vec<u32>,
    /// Best die.
    pub best: u32,
    /// Whether two or more sixes came up.
    pub crit: bool,
    /// Outcome tier.
    pub outcome: RollOutcome,
    /// Position in force at roll time.
    pub position: Option<Position>,
    /// Effect in force at roll time.
    pub effect: Option<Effect>,
}

/// The recorded resistance roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResistRollRecord {
    /// The attribute the GM chose.
    pub attribute: AttributeId,
    /// The attribute rating that formed the pool.
    pub pool: u32,
    /// The dice as rolled.
    pub rolls: Vec<u32>,
    /// Best die.
    pub best: u32,
    /// Whether the resistance roll was a critical.
    pub crit: bool,
    /// Stress paid: max(0, 6 − best), less one on a critical.
    pub stress_cost: u32,
}

/// Everything decided so far in the roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RollContext {
    /// The acting character, set by choose_action.
    pub character_id: Option<String>,
    /// The selected action, set by choose_action.
    pub action: Option<ActionId>,
    /// The selected item, if any.
    pub item_id: Option<String>,
    /// GM-set position.
    pub position: Option<Position>,
    /// GM-set effect.
    pub effect: Option<Effect>,
    /// GM's free-text sketch of what failure could cost.
    pub consequence_hint: Option<String>,
    /// Modifiers attached by the initiator.
    pub mods: Mods,
    /// The action roll, once made.
    pub roll: Option<ActionRollRecord>,
    /// The resistance roll, once made.
    pub resist: Option<ResistRollRecord>,
    /// GM's wrap-up summary.
    pub summary: Option<String>,
    /// The trauma assigned at wrap-up, if any.
    pub trauma: Option<TraumaId>,
    /// Audit log of every stress change during this roll.
    pub stress_events: Vec<StressEvent>,
    /// Set when a stress track overflowed; wrap-up should assign a trauma.
    pub needs_trauma: bool,
    /// The character owed a trauma, when `needs_trauma` is set.
    pub trauma_character_id: Option<String>,
}

impl RollContext {
    /// Clear everything decided after action selection.
    ///
    /// Keeps the character/action/item picks; used by the pre-roll
    /// cancel path and by choose_action itself after re-selection.
    pub fn reset_downstream(&mut self) {
        self.position = None;
        self.effect = None;
        self.consequence_hint = None;
        self.mods = Mods::default();
        self.roll = None;
        self.resist = None;
        self.summary = None;
        self.trauma = None;
        self.stress_events.clear();
        self.needs_trauma = false;
        self.trauma_character_id = None;
    }

    /// Record a stress application: append the audit event and raise
    /// the trauma flag on overflow.
    pub fn record_stress(&mut self, applied: &StressApplication) {
        if applied.overflow {
            self.needs_trauma = true;
            self.trauma_character_id = Some(applied.event.character_id.clone());
        }
        self.stress_events.push(applied.event.clone());
    }
}

/// A roll-action workflow instance.
///
/// Created by the engine's `start`, advanced only by `submit` on the
/// stage it currently sits in, and never resurrected once completed or
/// canceled. The engine treats it as transient input/output; owning
/// and persisting it is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Fixed tag identifying the workflow kind.
    pub action_key: String,
    /// The stage currently owning the workflow.
    #[serde(rename = "stageKey")]
    pub stage: StageKey,
    /// Accumulated decisions.
    pub context: RollContext,
    /// Lifecycle status.
    pub status: WorkflowStatus,
}

impl Workflow {
    /// The action key for roll-action workflows.
    pub const ACTION_KEY: &'static str = "scoundrel.roll_action";

    /// A fresh workflow at choose_action with an empty context.
    pub fn new() -> Self {
        Self {
            action_key: Self::ACTION_KEY.to_string(),
            stage: StageKey::ChooseAction,
            context: RollContext::default(),
            status: WorkflowStatus::Active,
        }
    }

    /// Whether the workflow can still accept submits.
    pub fn is_active(&self) -> bool {
        self.status == WorkflowStatus::Active
    }

    /// Abandon the workflow. Terminal: a canceled workflow rejects
    /// every further submit.
    pub fn cancel(&mut self) {
        self.status = WorkflowStatus::Canceled;
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}
