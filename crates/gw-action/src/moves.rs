//! The eight compass moves.

use gw_core::{ActionArgs, ActionKind, AgentRng, ObjectId};
use gw_world::SpatialRegistry;

use crate::action::Action;
use crate::result::{ActionResult, Reason};

/// A single-cell step in one of the eight compass directions.
///
/// One instance per direction; the direction is the [`ActionKind`] itself.
pub struct MoveAction {
    kind: ActionKind,
}

impl MoveAction {
    /// Fails for non-movement kinds; the registry only constructs moves
    /// from [`ActionKind::move_delta`] kinds.
    pub fn new(kind: ActionKind) -> Option<Self> {
        kind.move_delta().map(|_| Self { kind })
    }

    fn target_of(&self, registry: &SpatialRegistry, agent: ObjectId) -> Option<gw_core::Coord> {
        let (dx, dy) = self.kind.move_delta()?;
        let body = registry.agent(agent)?;
        Some(body.location.offset(dx, dy))
    }
}

impl Action for MoveAction {
    fn kind(&self) -> ActionKind {
        self.kind
    }

    fn is_possible(
        &self,
        registry: &SpatialRegistry,
        agent: ObjectId,
        _args: &ActionArgs,
    ) -> ActionResult {
        let Some(body) = registry.agent(agent) else {
            return ActionResult::fail(Reason::AgentRemoved);
        };
        let (dx, dy) = match self.kind.move_delta() {
            Some(delta) => delta,
            None => return ActionResult::fail(Reason::UnknownAction),
        };
        if dx == 0 && dy == 0 {
            return ActionResult::fail(Reason::NoMove);
        }
        let target = body.location.offset(dx, dy);
        if !registry.shape().contains(target) {
            return ActionResult::fail(Reason::OutOfBounds);
        }

        // Agents take precedence in the failure report over plain objects.
        let mut blocking_object = false;
        for &occupant in registry.occupants_at(target) {
            if registry.agent(occupant).is_some() {
                return ActionResult::fail(Reason::Occupied).at(target);
            }
            if let Some(obj) = registry.object(occupant)
                && !obj.is_traversable
            {
                blocking_object = true;
            }
        }
        if blocking_object {
            return ActionResult::fail(Reason::NotPassableObject).at(target);
        }
        ActionResult::ok().at(target)
    }

    fn mutate(
        &self,
        registry: &mut SpatialRegistry,
        agent: ObjectId,
        _args: &ActionArgs,
        _rng: &mut AgentRng,
    ) -> ActionResult {
        let Some(target) = self.target_of(registry, agent) else {
            return ActionResult::fail(Reason::AgentRemoved);
        };
        match registry.agent_mut(agent) {
            Some(body) => {
                body.object.location = target;
                // Cargo travels with the carrier.
                for carried in &mut body.carrying {
                    carried.location = target;
                }
                ActionResult::ok().at(target)
            }
            None => ActionResult::fail(Reason::AgentRemoved),
        }
    }
}
