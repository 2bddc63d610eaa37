//! Chatrooms: durable per-channel message history.

use std::collections::BTreeSet;

use gw_core::{ObjectId, RoomId};

use crate::message::Message;

#[derive(Copy, Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub enum RoomKind {
    /// The single world-wide room every agent can read.
    Global,
    /// One room per team, named after it.
    Team,
    /// One room per conversing pair, named `"{a}__{b}"` with the two agent
    /// names sorted.
    Private,
}

/// An append-only message log plus its member set.
///
/// Rooms are created lazily by the router the first time a channel is used
/// and live for the rest of the world's lifetime.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Chatroom {
    pub id: RoomId,
    pub name: String,
    pub kind: RoomKind,
    pub members: BTreeSet<ObjectId>,
    history: Vec<Message>,
}

impl Chatroom {
    pub fn new(id: RoomId, name: impl Into<String>, kind: RoomKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            members: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    /// The canonical name of the private room between two agents.
    pub fn private_name(a: &str, b: &str) -> String {
        if a <= b {
            format!("{a}__{b}")
        } else {
            format!("{b}__{a}")
        }
    }

    pub fn append(&mut self, message: Message) {
        self.history.push(message);
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Messages from `offset` onwards; empty when `offset` is past the end.
    ///
    /// Callers remember the offset of their last fetch to read incrementally.
    pub fn fetch_from(&self, offset: usize) -> &[Message] {
        self.history.get(offset..).unwrap_or(&[])
    }

    pub fn is_member(&self, agent: ObjectId) -> bool {
        matches!(self.kind, RoomKind::Global) || self.members.contains(&agent)
    }
}
