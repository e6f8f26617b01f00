//! Stage envelopes, audiences, UI hints, and broadcasts.
//!
//! An envelope is a read-only projection of the current stage for the
//! participants allowed to see it. Broadcasts, by contrast, go to the
//! whole table; the engine decides their content and the transport
//! outside this crate delivers them.

use serde::{Deserialize, Serialize};

use crate::workflow::{ActionRollRecord, ResistRollRecord, StageKey};

/// A semantic selector for who may see an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Audience {
    /// The moderator.
    Gm,
    /// The acting player.
    Initiator,
    /// One specific user.
    User {
        /// The user allowed to see the stage.
        user_id: String,
    },
    /// Everyone in the session.
    All,
}

/// An opaque rendering hint for the presentation layer.
///
/// The engine names a component and hands over props; it makes no
/// assumption about how (or whether) the hint is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSpec {
    /// Component identifier, e.g. `rollAction.chooseAction`.
    pub component: String,
    /// Free-form props for that component.
    #[serde(default)]
    pub props: serde_json::Value,
}

impl UiSpec {
    /// A hint with no props.
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            props: serde_json::Value::Null,
        }
    }

    /// Attach props (builder style).
    pub fn with_props(mut self, props: serde_json::Value) -> Self {
        self.props = props;
        self
    }
}

/// A read-only projection of the current stage for its audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageEnvelope {
    /// Who may see this envelope.
    pub audience: Vec<Audience>,
    /// The projected stage.
    #[serde(rename = "stageKey")]
    pub stage: StageKey,
    /// The slice of context this stage's audience needs.
    #[serde(default)]
    pub stage_data: serde_json::Value,
    /// Optional rendering hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiSpec>,
    /// Broadcasts pending alongside this projection.
    #[serde(default)]
    pub broadcasts: Vec<Broadcast>,
}

/// The payload of a `dice.roll` broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "subtype", rename_all = "snake_case")]
pub enum DiceBroadcast {
    /// An action roll.
    Action(ActionRollRecord),
    /// A resistance roll.
    Resistance(ResistRollRecord),
}

/// A record to deliver to every session member, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Broadcast {
    /// Dice hit the table.
    #[serde(rename = "dice.roll")]
    DiceRoll(DiceBroadcast),
}

impl Broadcast {
    /// A broadcast for an action roll.
    pub fn action_roll(record: ActionRollRecord) -> Self {
        Self::DiceRoll(DiceBroadcast::Action(record))
    }

    /// A broadcast for a resistance roll.
    pub fn resistance_roll(record: ResistRollRecord) -> Self {
        Self::DiceRoll(DiceBroadcast::Resistance(record))
    }
}
