//! The action-roll workflow engine.
//!
//! A roll is a negotiation between the GM, the acting player, and
//! sometimes a helper, driven through ten stages by an explicit state
//! machine. The engine is synchronous and owns nothing: the caller
//! hands in the workflow value, the scene snapshot, and the actor, and
//! gets back the updated workflow plus descriptions of every side
//! effect (broadcasts, session patches, audience visibility). Nothing
//! is persisted or delivered here.
//!
//! Randomness enters only through an injected [`rand::rngs::StdRng`],
//! so every transition is deterministic under test.

pub mod engine;
pub mod envelope;
pub mod error;
pub mod input;
pub mod result;
pub mod stages;
pub mod workflow;

pub use engine::{EngineConfig, RollEngine, visible_user_ids};
pub use envelope::{Audience, Broadcast, DiceBroadcast, StageEnvelope, UiSpec};
pub use error::WorkflowError;
pub use input::{
    AssistConfirmInput, ChooseActionInput, GmFinalizeInput, GmSetInput, MitigateChoice,
    MitigateInput, PlayerModsInput, PrerollChoice, PrerollConfirmInput, ResistInput, StageInput,
    WrapUpInput,
};
pub use result::{Issue, Severity, SubmitResult};
pub use workflow::{
    ActionRollRecord, HelpRequest, Mods, ResistRollRecord, RollContext, StageKey, Workflow,
    WorkflowStatus,
};
