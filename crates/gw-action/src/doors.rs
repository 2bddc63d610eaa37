//! Opening and closing doors.
//!
//! Both actions share one legality helper.  A door toggle changes the
//! door's traversability and its visible open flag in the same mutation, so
//! no observer can see the two out of sync.

use gw_core::{ActionArgs, ActionKind, AgentRng, ObjectId, TypeFilter, TypeTag};
use gw_world::SpatialRegistry;

use crate::action::Action;
use crate::result::{ActionResult, Reason};

const DEFAULT_DOOR_RANGE: f64 = f64::INFINITY;

fn check_door_toggle(
    registry: &SpatialRegistry,
    agent: ObjectId,
    args: &ActionArgs,
    open: bool,
) -> Result<Option<ObjectId>, ActionResult> {
    let body = registry
        .agent(agent)
        .ok_or_else(|| ActionResult::fail(Reason::AgentRemoved))?;
    let range = args.range.unwrap_or(DEFAULT_DOOR_RANGE);

    let doors_in_range =
        registry.objects_in_range(body.location, TypeFilter::Tag(TypeTag::Door), range);
    if doors_in_range.is_empty() {
        return Err(ActionResult::fail(Reason::NoDoorsInRange));
    }

    let Some(target) = args.object_id else {
        // At least one door is reachable, so the check passes; the mutation
        // itself still needs a concrete target.
        return Ok(None);
    };

    let Some(obj) = registry.object(target) else {
        return Err(ActionResult::fail(Reason::NotADoor));
    };
    let Some(status) = obj.door else {
        return Err(ActionResult::fail(Reason::NotADoor));
    };
    if !doors_in_range.contains(&target) {
        return Err(ActionResult::fail(Reason::NotInRange));
    }
    if open && status.is_open {
        return Err(ActionResult::fail(Reason::AlreadyOpen));
    }
    if !open && !status.is_open {
        return Err(ActionResult::fail(Reason::AlreadyClosed));
    }
    // A door can only close onto an empty opening.
    if !open
        && registry
            .occupants_at(obj.location)
            .iter()
            .any(|&occ| occ != target)
    {
        return Err(ActionResult::fail(Reason::DoorBlocked));
    }
    Ok(Some(target))
}

fn toggle_door(registry: &mut SpatialRegistry, target: ObjectId, open: bool) -> ActionResult {
    match registry.object_mut(target) {
        Some(obj) if obj.door.is_some() => {
            obj.set_door_open(open);
            ActionResult::ok().with_object(target)
        }
        _ => ActionResult::fail(Reason::NotADoor),
    }
}

fn door_result(outcome: Result<Option<ObjectId>, ActionResult>) -> ActionResult {
    match outcome {
        Ok(Some(target)) => ActionResult::ok().with_object(target),
        Ok(None) => ActionResult::ok(),
        Err(result) => result,
    }
}

// ── OpenDoor ──────────────────────────────────────────────────────────────────

pub struct OpenDoorAction;

impl Action for OpenDoorAction {
    fn kind(&self) -> ActionKind {
        ActionKind::OpenDoor
    }

    fn is_possible(
        &self,
        registry: &SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
    ) -> ActionResult {
        door_result(check_door_toggle(registry, agent, args, true))
    }

    fn mutate(
        &self,
        registry: &mut SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
        _rng: &mut AgentRng,
    ) -> ActionResult {
        match check_door_toggle(registry, agent, args, true) {
            Ok(Some(target)) => toggle_door(registry, target, true),
            Ok(None) => ActionResult::fail(Reason::NoObjectSpecified),
            Err(result) => result,
        }
    }
}

// ── CloseDoor ─────────────────────────────────────────────────────────────────

pub struct CloseDoorAction;

impl Action for CloseDoorAction {
    fn kind(&self) -> ActionKind {
        ActionKind::CloseDoor
    }

    fn is_possible(
        &self,
        registry: &SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
    ) -> ActionResult {
        door_result(check_door_toggle(registry, agent, args, false))
    }

    fn mutate(
        &self,
        registry: &mut SpatialRegistry,
        agent: ObjectId,
        args: &ActionArgs,
        _rng: &mut AgentRng,
    ) -> ActionResult {
        match check_door_toggle(registry, agent, args, false) {
            Ok(Some(target)) => toggle_door(registry, target, false),
            Ok(None) => ActionResult::fail(Reason::NoObjectSpecified),
            Err(result) => result,
        }
    }
}
