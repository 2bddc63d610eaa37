//! Dispatch: from a decided `ActionKind` to a checked, applied mutation.

use std::collections::BTreeMap;

use gw_core::{ActionArgs, ActionKind, AgentRng, ObjectId};
use gw_world::SpatialRegistry;

use crate::action::Action;
use crate::doors::{CloseDoorAction, OpenDoorAction};
use crate::moves::MoveAction;
use crate::objects::{DropObjectAction, GrabObjectAction, RemoveObjectAction};
use crate::result::{ActionResult, Reason};

/// The world's table of registered action implementations, keyed by kind.
///
/// Gating order on every dispatch: the agent must still exist
/// (`AgentRemoved`), its action set must include the kind
/// (`AgentNotCapable`), and the kind must be registered (`UnknownAction`).
/// Only then does the action's own `is_possible` run.
pub struct ActionRegistry {
    actions: BTreeMap<ActionKind, Box<dyn Action>>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ActionRegistry {
    /// An empty table; use [`standard`][Self::standard] for the canonical
    /// set.
    pub fn empty() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// All canonical actions: the eight compass moves, grab, drop, remove,
    /// and the two door toggles.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for kind in ActionKind::ALL {
            if let Some(movement) = MoveAction::new(kind) {
                registry.register(Box::new(movement));
            }
        }
        registry.register(Box::new(GrabObjectAction));
        registry.register(Box::new(DropObjectAction));
        registry.register(Box::new(RemoveObjectAction));
        registry.register(Box::new(OpenDoorAction));
        registry.register(Box::new(CloseDoorAction));
        registry
    }

    /// Install (or replace) the implementation for one kind.
    pub fn register(&mut self, action: Box<dyn Action>) {
        self.actions.insert(action.kind(), action);
    }

    pub fn get(&self, kind: ActionKind) -> Option<&dyn Action> {
        self.actions.get(&kind).map(Box::as_ref)
    }

    /// The busy duration for one invocation: the per-call override if any,
    /// else the action's default.  Unregistered kinds report zero.
    pub fn duration(&self, kind: ActionKind, args: &ActionArgs) -> u64 {
        args.duration_override.unwrap_or_else(|| {
            self.get(kind).map(|action| action.default_duration()).unwrap_or(0)
        })
    }

    /// Gate and run the pure legality check.
    pub fn check(
        &self,
        registry: &SpatialRegistry,
        agent: ObjectId,
        kind: ActionKind,
        args: &ActionArgs,
    ) -> ActionResult {
        match self.gate(registry, agent, kind) {
            Ok(action) => action.is_possible(registry, agent, args),
            Err(result) => result,
        }
    }

    /// Gate, check, and apply.  The mutation only runs when the check
    /// succeeds against the world as it stands right now.
    pub fn perform(
        &self,
        registry: &mut SpatialRegistry,
        agent: ObjectId,
        kind: ActionKind,
        args: &ActionArgs,
        rng: &mut AgentRng,
    ) -> ActionResult {
        let action = match self.gate(registry, agent, kind) {
            Ok(action) => action,
            Err(result) => return result,
        };
        let checked = action.is_possible(registry, agent, args);
        if !checked.succeeded() {
            return checked;
        }
        action.mutate(registry, agent, args, rng)
    }

    fn gate(
        &self,
        registry: &SpatialRegistry,
        agent: ObjectId,
        kind: ActionKind,
    ) -> Result<&dyn Action, ActionResult> {
        let Some(body) = registry.agent(agent) else {
            return Err(ActionResult::fail(Reason::AgentRemoved));
        };
        if !body.can_perform(kind) {
            return Err(ActionResult::fail(Reason::AgentNotCapable));
        }
        self.get(kind)
            .ok_or_else(|| ActionResult::fail(Reason::UnknownAction))
    }
}
