//! Submit results and structured issues.

use serde::{Deserialize, Serialize};

use sc_core::SessionPatch;

use crate::envelope::{Broadcast, StageEnvelope};
use crate::workflow::Workflow;

/// How serious a reported issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The submit was rejected because of this issue.
    Error,
    /// Advisory only; the submit still went through.
    Warning,
}

/// A structured problem report attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Where the problem sits ("input.helperUserId", "status", ...).
    pub path: String,
    /// Human-readable description.
    pub message: String,
    /// How serious it is.
    pub severity: Severity,
}

impl Issue {
    /// An error-severity issue at the given path.
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// The transactional outcome of one `start` or `submit` call.
///
/// On success the updated workflow travels back here together with
/// everything the caller must act on: broadcasts to deliver, a session
/// patch to merge, and the ids of participants allowed to see the new
/// state. On failure the workflow is absent and unchanged at the
/// caller's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
    /// Whether the call was accepted.
    pub ok: bool,
    /// Problems found; non-empty exactly when `ok` is false.
    #[serde(default)]
    pub issues: Vec<Issue>,
    /// The updated workflow, absent on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<Workflow>,
    /// Envelope for the stage now owning the workflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<StageEnvelope>,
    /// Broadcasts to deliver to all session members, in order.
    #[serde(default)]
    pub broadcasts: Vec<Broadcast>,
    /// Users allowed to see the new workflow state.
    #[serde(default)]
    pub participant_ids: Vec<String>,
    /// Character mutations for the session manager to merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_patch: Option<SessionPatch>,
}

impl SubmitResult {
    /// A rejection carrying the given issues.
    pub fn rejected(issues: Vec<Issue>, participant_ids: Vec<String>) -> Self {
        Self {
            ok: false,
            issues,
            workflow: None,
            next: None,
            broadcasts: Vec::new(),
            participant_ids,
            session_patch: None,
        }
    }
}
