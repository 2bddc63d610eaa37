//! Carrying: grab, drop, and permanent removal.

use std::collections::VecDeque;

use gw_core::{ActionArgs, ActionKind, AgentRng, Coord, ObjectId, TypeFilter};
use gw_object::WorldObject;
use gw_world::SpatialRegistry;

use crate::action::Action;
use crate::result::{ActionResult, Reason};

/// Grab and remove reach everything by default; drop searches only the
/// immediate neighbourhood.
const DEFAULT_GRAB_RANGE: f64 = f64::INFINITY;
const DEFAULT_DROP_RANGE: f64 = 1.0;
const DEFAULT_REMOVE_RANGE: f64 = 1.0;

// ── GrabObject ────────────────────────────────────────────────────────────────

/// Pick up a movable object: it leaves the grid and joins the agent's carry
/// list.  Without an explicit target, one eligible object in range is chosen
/// uniformly at random from the acting agent's own stream.
pub struct GrabObjectAction;

impl GrabObjectAction {
    /// Movable, uncarried, non-agent objects within range, ascending id.
    fn eligible(registry: &SpatialRegistry, agent: ObjectId, range: f64) -> Vec<ObjectId> {
        let Some(body) = registry.agent(agent) else {
            return Vec::new();
        };
        registry
            .objects_in_range(body.location, TypeFilter::Any, range)
            .into_iter()
            .filter(|&id| {
                registry
                    .object(id)
                    .is_some_and(|obj| obj.is_movable && !obj.is_carried())
            })
            .collect()
    }

    /// Shared gating for check and apply; resolves the explicit target if
    /// one was given.
    fn check(
        registry: &SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
    ) -> Result<Option<ObjectId>, ActionResult> {
        let body = registry
            .agent(agent)
            .ok_or_else(|| ActionResult::fail(Reason::AgentRemoved))?;
        if let Some(max) = args.max_objects
            && body.carry_count() >= max
        {
            return Err(ActionResult::fail(Reason::AlreadyCarrying));
        }
        let range = args.range.unwrap_or(DEFAULT_GRAB_RANGE);

        let Some(target) = args.object_id else {
            if Self::eligible(registry, agent, range).is_empty() {
                return Err(ActionResult::fail(Reason::NoObjectsInRange));
            }
            return Ok(None);
        };

        if target == agent || registry.agent(target).is_some() {
            return Err(ActionResult::fail(Reason::TargetIsAgent));
        }
        if registry.carrier_of(target).is_some() {
            return Err(ActionResult::fail(Reason::ObjectCarried));
        }
        let Some(obj) = registry.object(target) else {
            return Err(ActionResult::fail(Reason::NotInRange));
        };
        if body.location.distance(obj.location) > range {
            return Err(ActionResult::fail(Reason::NotInRange));
        }
        if !obj.is_movable {
            return Err(ActionResult::fail(Reason::ObjectUnmovable));
        }
        Ok(Some(target))
    }
}

impl Action for GrabObjectAction {
    fn kind(&self) -> ActionKind {
        ActionKind::GrabObject
    }

    fn is_possible(
        &self,
        registry: &SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
    ) -> ActionResult {
        match Self::check(registry, agent, args) {
            Ok(Some(target)) => ActionResult::ok().with_object(target),
            Ok(None) => ActionResult::ok(),
            Err(result) => result,
        }
    }

    fn mutate(
        &self,
        registry: &mut SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
        rng: &mut AgentRng,
    ) -> ActionResult {
        let target = match Self::check(registry, agent, args) {
            Ok(Some(target)) => target,
            Ok(None) => {
                let range = args.range.unwrap_or(DEFAULT_GRAB_RANGE);
                let eligible = Self::eligible(registry, agent, range);
                match rng.choose(&eligible) {
                    Some(&target) => target,
                    None => return ActionResult::fail(Reason::NoObjectsInRange),
                }
            }
            Err(result) => return result,
        };

        let mut obj = match registry.remove_object(target, false) {
            Ok(obj) => obj,
            Err(_) => return ActionResult::fail(Reason::NotInRange),
        };
        obj.carried_by.push(agent);
        match registry.agent_mut(agent) {
            Some(body) => {
                body.carrying.push(obj);
                ActionResult::ok().with_object(target)
            }
            None => ActionResult::fail(Reason::AgentRemoved),
        }
    }
}

// ── DropObject ────────────────────────────────────────────────────────────────

/// Put a carried object back on the grid.
///
/// The carrier's own cell is tried first; the carrier never blocks its own
/// cargo, so only a second intraversable occupant forces a 4-connected
/// breadth-first search for the nearest legal cell within the drop range.
/// Without an explicit target the most recently grabbed object is dropped.
pub struct DropObjectAction;

impl DropObjectAction {
    /// Resolve which carried object to drop.
    fn resolve(
        registry: &SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
    ) -> Result<ObjectId, ActionResult> {
        let body = registry
            .agent(agent)
            .ok_or_else(|| ActionResult::fail(Reason::AgentRemoved))?;
        match args.object_id {
            Some(target) => {
                if body.carrying.iter().any(|obj| obj.id == target) {
                    Ok(target)
                } else {
                    Err(ActionResult::fail(Reason::NoObjectCarried))
                }
            }
            None => body
                .carrying
                .last()
                .map(|obj| obj.id)
                .ok_or_else(|| ActionResult::fail(Reason::NoObjectCarried)),
        }
    }

    /// `true` if placing `obj` at `cell` leaves at most one intraversable
    /// occupant there, not counting the carrier itself.
    fn drop_legal(
        registry: &SpatialRegistry,
        carrier: ObjectId,
        obj: &WorldObject,
        cell: Coord,
    ) -> bool {
        registry.shape().contains(cell)
            && (obj.is_traversable || !registry.is_blocked_ignoring(cell, carrier))
    }

    /// Breadth-first ring search from `start`, bounded by Euclidean `range`.
    fn find_drop_cell(
        registry: &SpatialRegistry,
        carrier: ObjectId,
        obj: &WorldObject,
        start: Coord,
        range: f64,
    ) -> Option<Coord> {
        let shape = registry.shape();
        let mut queue = VecDeque::from([start]);
        let mut seen = std::collections::BTreeSet::from([start]);

        while let Some(cell) = queue.pop_front() {
            if start.distance(cell) > range {
                return None;
            }
            if Self::drop_legal(registry, carrier, obj, cell) {
                return Some(cell);
            }
            for next in cell.neighbours4() {
                if shape.contains(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        None
    }
}

impl Action for DropObjectAction {
    fn kind(&self) -> ActionKind {
        ActionKind::DropObject
    }

    fn is_possible(
        &self,
        registry: &SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
    ) -> ActionResult {
        match Self::resolve(registry, agent, args) {
            Ok(target) => ActionResult::ok().with_object(target),
            Err(result) => result,
        }
    }

    fn mutate(
        &self,
        registry: &mut SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
        _rng: &mut AgentRng,
    ) -> ActionResult {
        let target = match Self::resolve(registry, agent, args) {
            Ok(target) => target,
            Err(result) => return result,
        };
        let range = args.range.unwrap_or(DEFAULT_DROP_RANGE);

        let (start, obj) = {
            let Some(body) = registry.agent(agent) else {
                return ActionResult::fail(Reason::AgentRemoved);
            };
            let Some(obj) = body.carrying.iter().find(|obj| obj.id == target) else {
                return ActionResult::fail(Reason::NoObjectCarried);
            };
            (body.location, obj.clone())
        };

        let cell = if Self::drop_legal(registry, agent, &obj, start) {
            start
        } else if range == 0.0 {
            return ActionResult::fail(Reason::DropBlocked);
        } else {
            match Self::find_drop_cell(registry, agent, &obj, start, range) {
                Some(cell) => cell,
                None => return ActionResult::fail(Reason::DropBlocked),
            }
        };

        let Some(body) = registry.agent_mut(agent) else {
            return ActionResult::fail(Reason::AgentRemoved);
        };
        let Some(mut dropped) = body.take_carried(target) else {
            return ActionResult::fail(Reason::NoObjectCarried);
        };
        dropped.carried_by.clear();
        dropped.location = cell;
        match registry.register_object_ignoring(dropped, agent) {
            Ok(_) => ActionResult::ok().with_object(target).at(cell),
            Err(_) => ActionResult::fail(Reason::DropBlocked),
        }
    }
}

// ── RemoveObject ──────────────────────────────────────────────────────────────

/// Permanently delete an object within range.  Agents can never be removed
/// this way, and the actor can never target itself.  Without an explicit
/// target one in-range object is chosen at random.
pub struct RemoveObjectAction;

impl RemoveObjectAction {
    /// On-grid, non-agent objects within range, ascending id.
    fn eligible(registry: &SpatialRegistry, agent: ObjectId, range: f64) -> Vec<ObjectId> {
        let Some(body) = registry.agent(agent) else {
            return Vec::new();
        };
        registry
            .objects_in_range(body.location, TypeFilter::Any, range)
            .into_iter()
            .filter(|&id| registry.object(id).is_some())
            .collect()
    }

    fn check(
        registry: &SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
    ) -> Result<Option<ObjectId>, ActionResult> {
        let body = registry
            .agent(agent)
            .ok_or_else(|| ActionResult::fail(Reason::AgentRemoved))?;
        let range = args.range.unwrap_or(DEFAULT_REMOVE_RANGE);

        let Some(target) = args.object_id else {
            if Self::eligible(registry, agent, range).is_empty() {
                return Err(ActionResult::fail(Reason::NoObjectsInRange));
            }
            return Ok(None);
        };

        if target == agent || registry.agent(target).is_some() {
            return Err(ActionResult::fail(Reason::TargetIsAgent));
        }
        if registry.carrier_of(target).is_some() {
            return Err(ActionResult::fail(Reason::ObjectCarried));
        }
        match registry.object(target) {
            Some(obj) if body.location.distance(obj.location) <= range => Ok(Some(target)),
            _ => Err(ActionResult::fail(Reason::NotInRange)),
        }
    }
}

impl Action for RemoveObjectAction {
    fn kind(&self) -> ActionKind {
        ActionKind::RemoveObject
    }

    fn is_possible(
        &self,
        registry: &SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
    ) -> ActionResult {
        match Self::check(registry, agent, args) {
            Ok(Some(target)) => ActionResult::ok().with_object(target),
            Ok(None) => ActionResult::ok(),
            Err(result) => result,
        }
    }

    fn mutate(
        &self,
        registry: &mut SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
        rng: &mut AgentRng,
    ) -> ActionResult {
        let target = match Self::check(registry, agent, args) {
            Ok(Some(target)) => target,
            Ok(None) => {
                let range = args.range.unwrap_or(DEFAULT_REMOVE_RANGE);
                let eligible = Self::eligible(registry, agent, range);
                match rng.choose(&eligible) {
                    Some(&target) => target,
                    None => return ActionResult::fail(Reason::NoObjectsInRange),
                }
            }
            Err(result) => return result,
        };
        match registry.remove_object(target, true) {
            Ok(_) => ActionResult::ok().with_object(target),
            Err(_) => ActionResult::fail(Reason::NotInRange),
        }
    }
}
