//! The closed outcome vocabulary of the action protocol.

use std::fmt;

use gw_core::{Coord, ObjectId};

/// Why an action succeeded or failed.
///
/// This is the full, closed set of outcomes the engine can report.  Brains
/// match on these instead of parsing strings.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Reason {
    /// The action was (or would be) applied.
    Success,
    /// The agent deliberately decided on no action this tick.
    Idle,

    // ── Dispatch-level failures ───────────────────────────────────────────
    /// The action kind has no registered implementation.
    UnknownAction,
    /// The agent's action set does not include this kind.
    AgentNotCapable,
    /// The acting agent left the world before its action applied.
    AgentRemoved,

    // ── Movement ──────────────────────────────────────────────────────────
    /// Target cell lies outside the grid.
    OutOfBounds,
    /// Target cell holds another agent.
    Occupied,
    /// The move goes nowhere.
    NoMove,
    /// Target cell holds an intraversable object.
    NotPassableObject,

    // ── Grab / remove ─────────────────────────────────────────────────────
    /// The specified target is beyond the action's range (or gone).
    NotInRange,
    /// No eligible target exists within range.
    NoObjectsInRange,
    /// Agents cannot be grabbed or removed by targeting them directly.
    TargetIsAgent,
    /// The carrier is at its configured capacity.
    AlreadyCarrying,
    /// The target is already in some agent's carry list.
    ObjectCarried,
    /// The target is not movable.
    ObjectUnmovable,

    // ── Drop ──────────────────────────────────────────────────────────────
    /// Nothing (or not the specified object) is being carried.
    NoObjectCarried,
    /// No legal cell within the drop range.
    DropBlocked,

    // ── Doors ─────────────────────────────────────────────────────────────
    /// No door-tagged object within range.
    NoDoorsInRange,
    /// The specified target is not a door.
    NotADoor,
    AlreadyOpen,
    AlreadyClosed,
    /// Closing is blocked by another occupant of the door's cell.
    DoorBlocked,
    /// The action needs an explicit target id and none was given.
    NoObjectSpecified,
}

impl Reason {
    /// Only `Success` and a deliberate `Idle` count as succeeded.
    #[inline]
    pub fn succeeded(self) -> bool {
        matches!(self, Reason::Success | Reason::Idle)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Outcome of one checked or applied action.
#[derive(Clone, PartialEq, Debug)]
pub struct ActionResult {
    pub reason: Reason,
    /// The object acted upon, where one was resolved (grabbed, dropped,
    /// removed, toggled).
    pub object: Option<ObjectId>,
    /// Where the effect landed (move target, drop cell).
    pub location: Option<Coord>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            reason: Reason::Success,
            object: None,
            location: None,
        }
    }

    /// A deliberate no-action tick; counts as succeeded.
    pub fn idle() -> Self {
        Self {
            reason: Reason::Idle,
            object: None,
            location: None,
        }
    }

    pub fn fail(reason: Reason) -> Self {
        Self {
            reason,
            object: None,
            location: None,
        }
    }

    pub fn with_object(mut self, object: ObjectId) -> Self {
        self.object = Some(object);
        self
    }

    pub fn at(mut self, location: Coord) -> Self {
        self.location = Some(location);
        self
    }

    #[inline]
    pub fn succeeded(&self) -> bool {
        self.reason.succeeded()
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)?;
        if let Some(object) = self.object {
            write!(f, " [{object}]")?;
        }
        if let Some(location) = self.location {
            write!(f, " @ {location}")?;
        }
        Ok(())
    }
}
