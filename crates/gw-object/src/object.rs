//! `WorldObject` — the one concrete type behind every non-agent occupant of
//! the grid.
//!
//! There is no object inheritance hierarchy: a wall, a door, and a battery
//! are all `WorldObject`s distinguished by their `kind_chain` tags and
//! capability flags.  Door-specific state lives in an optional `DoorStatus`
//! so the engine never needs to downcast anything.

use std::collections::BTreeMap;

use gw_core::{Coord, ObjectId, Tick, TypeTag};

/// Per-tick self-update hook, run by the scheduler at the end of every step
/// (e.g. time-based battery decay).  Plain `fn` so objects stay `Clone`.
pub type ObjectTickFn = fn(&mut WorldObject, Tick);

// ── PropertyValue ─────────────────────────────────────────────────────────────

/// A value in an object's open custom-attribute map.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(x) => Some(*x),
            PropertyValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Int(n)
    }
}

impl From<f64> for PropertyValue {
    fn from(x: f64) -> Self {
        PropertyValue::Float(x)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_owned())
    }
}

// ── DoorStatus ────────────────────────────────────────────────────────────────

/// Internal state of a door-tagged object.
///
/// Traversability and the open flag always change together (see
/// [`WorldObject::set_door_open`]), so observers can never see a closed door
/// that is traversable or vice versa.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorStatus {
    pub is_open: bool,
}

// ── WorldObject ───────────────────────────────────────────────────────────────

/// Any object that occupies a grid cell.
///
/// `id` is [`ObjectId::INVALID`] until the object is registered with a
/// `SpatialRegistry`, which assigns the serial and makes `name` unique.  A
/// re-registered object (e.g. a dropped carry item) keeps both.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldObject {
    /// World-unique serial, assigned at registration.
    pub id: ObjectId,

    /// Sanitized, world-unique human-readable name (e.g. `wall_3`).
    pub name: String,

    /// Current cell.  Always within world bounds after any mutation.
    pub location: Coord,

    /// Kind tags, most specific first, always ending in [`TypeTag::Object`].
    pub kind_chain: Vec<TypeTag>,

    /// `false` blocks movement onto this object's cell.
    pub is_traversable: bool,

    /// `true` allows the object to be grabbed and carried.
    pub is_movable: bool,

    /// `false` exempts the object from placement-conflict counting (area
    /// tiles); the capability flag replacing the original's type-name check.
    pub blocks_placement: bool,

    /// Non-owning backlink to carriers.  Non-empty only while the object
    /// itself lives in some agent's carry list (off the grid).
    pub carried_by: Vec<ObjectId>,

    /// Door state; `Some` only for door-tagged objects.
    pub door: Option<DoorStatus>,

    /// Open map of custom attributes, exported verbatim into snapshots.
    pub properties: BTreeMap<String, PropertyValue>,

    /// Optional per-tick self-update hook.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_tick: Option<ObjectTickFn>,
}

impl WorldObject {
    /// A generic traversable, unmovable object.
    pub fn new(name: impl Into<String>, location: Coord) -> Self {
        Self {
            id: ObjectId::INVALID,
            name: name.into(),
            location,
            kind_chain: TypeTag::Object.base_chain(),
            is_traversable: true,
            is_movable: false,
            blocks_placement: true,
            carried_by: Vec::new(),
            door: None,
            properties: BTreeMap::new(),
            on_tick: None,
        }
    }

    // ── Standard-object constructors ──────────────────────────────────────

    /// An impassable, immovable wall segment.
    pub fn wall(name: impl Into<String>, location: Coord) -> Self {
        Self {
            kind_chain: TypeTag::Wall.base_chain(),
            is_traversable: false,
            ..Self::new(name, location)
        }
    }

    /// A floor marker that never blocks movement or placement.
    pub fn area_tile(name: impl Into<String>, location: Coord) -> Self {
        Self {
            kind_chain: TypeTag::AreaTile.base_chain(),
            blocks_placement: false,
            ..Self::new(name, location)
        }
    }

    /// A movable block agents can grab and carry.
    pub fn block(name: impl Into<String>, location: Coord) -> Self {
        Self {
            kind_chain: TypeTag::Block.base_chain(),
            is_movable: true,
            ..Self::new(name, location)
        }
    }

    /// A door; closed doors are intraversable.
    pub fn door(name: impl Into<String>, location: Coord, is_open: bool) -> Self {
        Self {
            kind_chain: TypeTag::Door.base_chain(),
            is_traversable: is_open,
            door: Some(DoorStatus { is_open }),
            ..Self::new(name, location)
        }
    }

    /// A battery whose `charge` property decays by one every tick until empty.
    pub fn battery(name: impl Into<String>, location: Coord, charge: i64) -> Self {
        let mut obj = Self {
            kind_chain: TypeTag::Battery.base_chain(),
            on_tick: Some(battery_decay),
            ..Self::new(name, location)
        };
        obj.properties
            .insert("charge".to_owned(), PropertyValue::Int(charge));
        obj
    }

    // ── Builder-style toggles ─────────────────────────────────────────────

    pub fn traversable(mut self, is_traversable: bool) -> Self {
        self.is_traversable = is_traversable;
        self
    }

    pub fn movable(mut self, is_movable: bool) -> Self {
        self.is_movable = is_movable;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The leaf tag of the kind chain.
    #[inline]
    pub fn most_specific_tag(&self) -> TypeTag {
        self.kind_chain.first().copied().unwrap_or(TypeTag::Object)
    }

    /// `true` if `tag` appears anywhere in the kind chain.
    #[inline]
    pub fn is_kind(&self, tag: TypeTag) -> bool {
        self.kind_chain.contains(&tag)
    }

    /// `true` while the object lives in some agent's carry list.
    #[inline]
    pub fn is_carried(&self) -> bool {
        !self.carried_by.is_empty()
    }

    // ── Mutation helpers ──────────────────────────────────────────────────

    /// Toggle a door open or closed, keeping `is_traversable` and the door
    /// status in lock-step.  Returns `false` if the object is not a door.
    pub fn set_door_open(&mut self, open: bool) -> bool {
        match self.door.as_mut() {
            Some(status) => {
                status.is_open = open;
                self.is_traversable = open;
                true
            }
            None => false,
        }
    }
}

/// Self-update hook installed by [`WorldObject::battery`].
fn battery_decay(obj: &mut WorldObject, _tick: Tick) {
    if let Some(PropertyValue::Int(charge)) = obj.properties.get_mut("charge")
        && *charge > 0
    {
        *charge -= 1;
    }
}
