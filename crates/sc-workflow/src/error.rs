//! Error types for the workflow engine.
//!
//! Every variant is recoverable at the caller level: the engine turns
//! it into a structured issue inside a failed result and leaves the
//! workflow untouched, so the same actor can be re-prompted.

use sc_core::ActionRole;

use crate::result::Issue;
use crate::workflow::StageKey;

/// Errors raised while validating or handling a submit.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The actor lacks the role the current stage requires.
    #[error("only the {role} may act during {stage}")]
    Unauthorized {
        /// The role the stage requires.
        role: ActionRole,
        /// The stage that rejected the actor.
        stage: StageKey,
    },

    /// Someone other than the invited helper answered the assist prompt.
    #[error("only the invited helper may answer the assist prompt")]
    NotInvitedHelper,

    /// The submitted input is for a different stage than the current one.
    #[error("expected input for stage {expected}, got {got}")]
    WrongInput {
        /// The stage currently owning the workflow.
        expected: StageKey,
        /// The stage the input addresses.
        got: StageKey,
    },

    /// Push and devil's bargain were both requested.
    #[error("push and devil's bargain are mutually exclusive")]
    PushAndBargain,

    /// Help was requested without naming a helper.
    #[error("help requested without naming a helper")]
    HelperMissing,

    /// No action has been selected yet.
    #[error("no action selected")]
    NoActionSelected,

    /// A referenced character is not in the scene snapshot.
    #[error("character '{0}' not found in scene")]
    CharacterNotFound(String),

    /// The confirmed helper has no character in the scene.
    #[error("helper '{0}' has no character in scene")]
    HelperCharacterMissing(String),

    /// A trauma was submitted but no character is on record for it.
    #[error("no character on record for the trauma")]
    TraumaTargetMissing,

    /// The character already carries the maximum number of traumas.
    #[error("character '{0}' already carries the maximum number of traumas")]
    TraumaListFull(String),

    /// The workflow is not active (completed or canceled).
    #[error("workflow is not active")]
    NotActive,

    /// The workflow is already at its terminal stage.
    #[error("workflow is already finished")]
    TerminalStage,
}

impl WorkflowError {
    /// The issue path this error anchors to.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } | Self::NotInvitedHelper => "actor",
            Self::WrongInput { .. } | Self::PushAndBargain => "input",
            Self::HelperMissing => "input.helperUserId",
            Self::NoActionSelected => "context.action",
            Self::CharacterNotFound(_) => "input.characterId",
            Self::HelperCharacterMissing(_) => "context.mods.help.helperUserId",
            Self::TraumaTargetMissing | Self::TraumaListFull(_) => "context.traumaCharacterId",
            Self::NotActive => "status",
            Self::TerminalStage => "stageKey",
        }
    }

    /// Convert this error into the issue reported to the caller.
    pub fn into_issue(self) -> Issue {
        Issue::error(self.path(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = WorkflowError::Unauthorized {
            role: ActionRole::Gm,
            stage: StageKey::Resist,
        };
        assert_eq!(err.to_string(), "only the gm may act during resist");

        let err = WorkflowError::CharacterNotFound("c9".into());
        assert_eq!(err.to_string(), "character 'c9' not found in scene");
    }

    #[test]
    fn issue_conversion_keeps_the_path() {
        let issue = WorkflowError::HelperMissing.into_issue();
        assert_eq!(issue.path, "input.helperUserId");
        assert!(issue.message.contains("helper"));
    }
}
