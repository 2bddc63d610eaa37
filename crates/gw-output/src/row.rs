//! Plain data row types written by output backends.

use gw_action::Reason;
use gw_core::{ActionKind, ObjectId};

/// One agent's action outcome for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTraceRow {
    pub tick:     u64,
    pub agent_id: u32,
    /// `None` is a deliberate idle.
    pub action:   Option<ActionKind>,
    pub reason:   Reason,
    /// The object the action resolved to; `u32::MAX` when it had none.
    pub object:   u32,
}

impl ActionTraceRow {
    /// The string written to the `action` column.
    pub fn action_label(&self) -> String {
        match self.action {
            Some(kind) => kind.to_string(),
            None => "Idle".to_owned(),
        }
    }
}

/// A snapshot of one agent at the end of a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub name:     String,
    pub x:        i32,
    pub y:        i32,
    pub carrying: u64,
    pub is_busy:  bool,
}

pub(crate) const NO_OBJECT: u32 = ObjectId::INVALID.0;
