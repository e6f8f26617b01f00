//! Core types for Scoundrel: the action/attribute vocabulary, character
//! data, scene snapshots, participant identity, and session patches.
//!
//! Everything here is plain data with serde encodings — no I/O, no
//! randomness. The workflow engine in `sc-workflow` reads these types
//! and returns patches against them; it never mutates a scene directly.

pub mod action;
pub mod character;
pub mod participants;
pub mod patch;
pub mod scene;

pub use action::{ActionId, AttributeId, Effect, Position};
pub use character::{CharacterData, CharacterRef, TraumaId};
pub use participants::{ActionParticipant, ActionParticipants, ActionRole};
pub use patch::{CharacterDataPatch, CharacterPatch, SessionPatch};
pub use scene::{PlayerEntry, SceneSnapshot};
