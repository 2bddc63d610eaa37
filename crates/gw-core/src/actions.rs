//! Closed action keys and their argument bag.
//!
//! Action *implementations* live in `gw-action`; this module only defines the
//! closed set of keys agents decide between (so agent bodies can declare
//! their permitted `action_set` without depending on the implementations) and
//! the typed argument struct that replaces the original free-form kwargs.

use std::fmt;

use crate::ObjectId;

// ── ActionKind ────────────────────────────────────────────────────────────────

/// Key of a registered action.  The dispatcher in `gw-action` maps each kind
/// to a concrete `Action` implementation once at world construction.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    MoveNorth,
    MoveNorthEast,
    MoveEast,
    MoveSouthEast,
    MoveSouth,
    MoveSouthWest,
    MoveWest,
    MoveNorthWest,
    GrabObject,
    DropObject,
    RemoveObject,
    OpenDoor,
    CloseDoor,
}

impl ActionKind {
    /// All kinds, in declaration order.  Convenience for "fully capable"
    /// agent bodies and for registering the standard action set.
    pub const ALL: [ActionKind; 13] = [
        ActionKind::MoveNorth,
        ActionKind::MoveNorthEast,
        ActionKind::MoveEast,
        ActionKind::MoveSouthEast,
        ActionKind::MoveSouth,
        ActionKind::MoveSouthWest,
        ActionKind::MoveWest,
        ActionKind::MoveNorthWest,
        ActionKind::GrabObject,
        ActionKind::DropObject,
        ActionKind::RemoveObject,
        ActionKind::OpenDoor,
        ActionKind::CloseDoor,
    ];

    /// The `(dx, dy)` delta for movement kinds, `None` otherwise.
    /// North is negative y, matching screen coordinates.
    pub fn move_delta(self) -> Option<(i32, i32)> {
        match self {
            ActionKind::MoveNorth => Some((0, -1)),
            ActionKind::MoveNorthEast => Some((1, -1)),
            ActionKind::MoveEast => Some((1, 0)),
            ActionKind::MoveSouthEast => Some((1, 1)),
            ActionKind::MoveSouth => Some((0, 1)),
            ActionKind::MoveSouthWest => Some((-1, 1)),
            ActionKind::MoveWest => Some((-1, 0)),
            ActionKind::MoveNorthWest => Some((-1, -1)),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::MoveNorth => "MoveNorth",
            ActionKind::MoveNorthEast => "MoveNorthEast",
            ActionKind::MoveEast => "MoveEast",
            ActionKind::MoveSouthEast => "MoveSouthEast",
            ActionKind::MoveSouth => "MoveSouth",
            ActionKind::MoveSouthWest => "MoveSouthWest",
            ActionKind::MoveWest => "MoveWest",
            ActionKind::MoveNorthWest => "MoveNorthWest",
            ActionKind::GrabObject => "GrabObject",
            ActionKind::DropObject => "DropObject",
            ActionKind::RemoveObject => "RemoveObject",
            ActionKind::OpenDoor => "OpenDoor",
            ActionKind::CloseDoor => "CloseDoor",
        };
        f.write_str(name)
    }
}

// ── ActionArgs ────────────────────────────────────────────────────────────────

/// Typed argument bag attached to a decided action.
///
/// Each action documents which fields it reads and what its defaults are;
/// unread fields are ignored.  A decision policy that omits a field an action
/// requires gets the corresponding failure reason back, never a panic.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionArgs {
    /// Target object for grab / drop / remove / door actions.
    pub object_id: Option<ObjectId>,

    /// Interaction range (grab range, drop range, remove range, door range).
    /// Each action falls back to its own documented default when absent.
    pub range: Option<f64>,

    /// Carry-capacity cap consulted by the grab action.
    pub max_objects: Option<usize>,

    /// Per-invocation override of the action's configured tick duration.
    pub duration_override: Option<u64>,
}

impl ActionArgs {
    /// An empty argument bag (every action falls back to its defaults).
    pub fn none() -> Self {
        Self::default()
    }

    /// Arguments targeting a specific object.
    pub fn for_object(object_id: ObjectId) -> Self {
        Self {
            object_id: Some(object_id),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, range: f64) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = Some(max_objects);
        self
    }

    pub fn with_duration(mut self, ticks: u64) -> Self {
        self.duration_override = Some(ticks);
        self
    }
}
