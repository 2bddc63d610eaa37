//! `AgentBody` — the embodied half of an agent.
//!
//! The body is what lives on the grid: location, team, carry list, busy
//! state.  The deciding half (the brain) lives in `gw-brain` and only ever
//! sees observations and returns intents; the scheduler is the sole mediator
//! between the two.

use std::ops::{Deref, DerefMut};

use gw_core::{ActionKind, Coord, TypeTag};

use crate::busy::BusyState;
use crate::object::WorldObject;
use crate::sense::SenseCapability;

/// The grid-dwelling state of one agent.
///
/// Dereferences to its inner [`WorldObject`], so `body.location`,
/// `body.name` etc. work directly.  Agents default to intraversable and
/// unmovable: two agents can never share a cell, and agents cannot be
/// carried.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentBody {
    /// Embedded object state (id, name, location, kind chain, flags).
    pub object: WorldObject,

    /// Team membership; defaults to the agent's own unique name, making
    /// every agent a one-member team until assigned otherwise.
    pub team: String,

    /// What this agent can perceive.
    pub sense: SenseCapability,

    /// Actions this agent is capable of.  Checked before dispatch; an
    /// unlisted action is rejected without consulting the action itself.
    pub action_set: Vec<ActionKind>,

    /// Objects currently carried, owned by the body and off the grid.
    pub carrying: Vec<WorldObject>,

    /// Action-duration FSM.
    pub busy: BusyState,
}

impl AgentBody {
    /// A new agent body with the full standard action set and omniscient
    /// senses.  `team` stays empty until registration defaults it.
    pub fn new(name: impl Into<String>, location: Coord) -> Self {
        let mut object = WorldObject::new(name, location);
        object.kind_chain = TypeTag::Agent.base_chain();
        object.is_traversable = false;
        object.is_movable = false;
        Self {
            object,
            team: String::new(),
            sense: SenseCapability::omniscient(),
            action_set: ActionKind::ALL.to_vec(),
            carrying: Vec::new(),
            busy: BusyState::Idle,
        }
    }

    // ── Builder-style configuration ───────────────────────────────────────

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = team.into();
        self
    }

    pub fn with_sense(mut self, sense: SenseCapability) -> Self {
        self.sense = sense;
        self
    }

    pub fn with_action_set(mut self, action_set: Vec<ActionKind>) -> Self {
        self.action_set = action_set;
        self
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if this agent is allowed to attempt `kind` at all.
    #[inline]
    pub fn can_perform(&self, kind: ActionKind) -> bool {
        self.action_set.contains(&kind)
    }

    /// Number of objects currently carried.
    #[inline]
    pub fn carry_count(&self) -> usize {
        self.carrying.len()
    }

    /// Remove and return a carried object by id, if present.
    pub fn take_carried(&mut self, id: gw_core::ObjectId) -> Option<WorldObject> {
        let idx = self.carrying.iter().position(|obj| obj.id == id)?;
        Some(self.carrying.remove(idx))
    }
}

impl Deref for AgentBody {
    type Target = WorldObject;

    fn deref(&self) -> &WorldObject {
        &self.object
    }
}

impl DerefMut for AgentBody {
    fn deref_mut(&mut self) -> &mut WorldObject {
        &mut self.object
    }
}
