//! Stage handlers: one module per stage of the roll.
//!
//! Every handler follows the same discipline: authorize the actor,
//! validate the input, and only then mutate the context and advance
//! the stage. An error return therefore guarantees the workflow value
//! is exactly as it arrived.

pub mod assist_confirm;
pub mod choose_action;
pub mod gm_finalize;
pub mod gm_set_position_effect;
pub mod mitigate;
pub mod player_add_mods;
pub mod preroll_confirm;
pub mod resist;
pub mod wrap_up;

use rand::rngs::StdRng;

use sc_core::{ActionParticipants, ActionRole, SceneSnapshot, SessionPatch};

use crate::engine::EngineConfig;
use crate::envelope::Broadcast;
use crate::error::WorkflowError;
use crate::workflow::StageKey;

/// Everything a stage's submit needs besides the workflow itself.
pub(crate) struct StageCtx<'a> {
    /// Read-only scene snapshot for this call.
    pub scene: &'a SceneSnapshot,
    /// The user making the submit.
    pub actor: &'a str,
    /// Identity directory for role resolution.
    pub participants: &'a ActionParticipants,
    /// Engine tunables (stress maximum, trauma cap).
    pub config: &'a EngineConfig,
    /// Injected randomness for the rolling stages.
    pub rng: &'a mut StdRng,
}

/// Side effects a successful submit hands back to the engine.
#[derive(Debug, Default)]
pub(crate) struct StageEffects {
    /// Broadcasts to deliver to the whole table.
    pub broadcasts: Vec<Broadcast>,
    /// Character mutation for the session manager.
    pub patch: Option<SessionPatch>,
}

/// Reject the submit unless the actor holds `role`.
pub(crate) fn authorize(
    ctx: &StageCtx<'_>,
    role: ActionRole,
    stage: StageKey,
) -> Result<(), WorkflowError> {
    if ctx.participants.has(ctx.actor, role) {
        Ok(())
    } else {
        Err(WorkflowError::Unauthorized { role, stage })
    }
}
