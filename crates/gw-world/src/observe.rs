//! Observation filtering: what each agent actually gets to see.
//!
//! A [`WorldView`] is a self-contained, serializable snapshot built fresh
//! every tick.  [`visible_state`] filters the world through the viewing
//! agent's [`SenseCapability`][gw_object::SenseCapability]: for each object
//! the range keyed by its most specific tag applies, falling back to the
//! wildcard range.  The viewer itself is always included.  Policy-side
//! narrowing (occlusion and the like) is a brain concern, not a world one.

use std::collections::BTreeMap;
use std::time::Duration;

use gw_core::{Coord, GridShape, ObjectId, Tick, TypeTag};
use gw_object::{AgentBody, DoorStatus, PropertyValue, WorldObject};

use crate::error::{WorldError, WorldResult};
use crate::registry::SpatialRegistry;

// ── Snapshots ─────────────────────────────────────────────────────────────────

/// Immutable copy of one object's (or agent's) observable state.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub name: String,
    pub location: Coord,
    pub kind_chain: Vec<TypeTag>,
    pub is_traversable: bool,
    pub is_movable: bool,
    pub door: Option<DoorStatus>,
    pub carried_by: Vec<ObjectId>,
    pub properties: BTreeMap<String, PropertyValue>,
    /// `Some` for agents only.
    pub team: Option<String>,
    /// Ids of objects this agent carries; empty for plain objects.
    pub carrying: Vec<ObjectId>,
}

impl ObjectSnapshot {
    pub fn of_object(obj: &WorldObject) -> Self {
        Self {
            id: obj.id,
            name: obj.name.clone(),
            location: obj.location,
            kind_chain: obj.kind_chain.clone(),
            is_traversable: obj.is_traversable,
            is_movable: obj.is_movable,
            door: obj.door,
            carried_by: obj.carried_by.clone(),
            properties: obj.properties.clone(),
            team: None,
            carrying: Vec::new(),
        }
    }

    pub fn of_agent(body: &AgentBody) -> Self {
        let mut snap = Self::of_object(&body.object);
        snap.team = Some(body.team.clone());
        snap.carrying = body.carrying.iter().map(|obj| obj.id).collect();
        snap
    }

    #[inline]
    pub fn is_agent(&self) -> bool {
        self.kind_chain.contains(&TypeTag::Agent)
    }

    #[inline]
    pub fn most_specific_tag(&self) -> TypeTag {
        self.kind_chain.first().copied().unwrap_or(TypeTag::Object)
    }
}

/// Synthetic world record included in every view.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WorldInfo {
    pub tick: Tick,
    pub shape: GridShape,
    pub tick_budget: Duration,
    /// Ids of every member of the viewer's team, the viewer included.
    /// Empty in god views.
    pub teammates: Vec<ObjectId>,
}

/// One agent's filtered view of the world at a single tick.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WorldView {
    pub info: WorldInfo,
    /// [`ObjectId::INVALID`] in god views.
    pub self_id: ObjectId,
    pub objects: BTreeMap<ObjectId, ObjectSnapshot>,
}

impl WorldView {
    pub fn get(&self, id: ObjectId) -> Option<&ObjectSnapshot> {
        self.objects.get(&id)
    }

    /// The viewer's own snapshot.
    pub fn self_snapshot(&self) -> Option<&ObjectSnapshot> {
        self.objects.get(&self.self_id)
    }

    /// All visible snapshots whose kind chain contains `tag`, ascending id.
    pub fn of_kind(&self, tag: TypeTag) -> impl Iterator<Item = &ObjectSnapshot> {
        self.objects
            .values()
            .filter(move |snap| snap.kind_chain.contains(&tag))
    }

    /// All visible snapshots at `cell`, ascending id.
    pub fn at(&self, cell: Coord) -> impl Iterator<Item = &ObjectSnapshot> {
        self.objects
            .values()
            .filter(move |snap| snap.location == cell)
    }
}

// ── View construction ─────────────────────────────────────────────────────────

/// Build the world view for one agent, filtered by its sense capability.
///
/// Carried objects are off the grid and never appear; a carrier's snapshot
/// lists their ids instead.
pub fn visible_state(
    registry: &SpatialRegistry,
    viewer: ObjectId,
    tick: Tick,
    tick_budget: Duration,
) -> WorldResult<WorldView> {
    let body = registry.agent(viewer).ok_or(WorldError::UnknownAgent(viewer))?;
    let from = body.location;
    let sense = &body.sense;

    let mut objects = BTreeMap::new();
    for obj in registry.objects() {
        if sense.perceives(from, obj.location, obj.most_specific_tag()) {
            objects.insert(obj.id, ObjectSnapshot::of_object(obj));
        }
    }
    for other in registry.agents() {
        let visible = other.id == viewer
            || sense.perceives(from, other.location, other.most_specific_tag());
        if visible {
            objects.insert(other.id, ObjectSnapshot::of_agent(other));
        }
    }

    Ok(WorldView {
        info: WorldInfo {
            tick,
            shape: registry.shape(),
            tick_budget,
            teammates: registry.team_members(&body.team),
        },
        self_id: viewer,
        objects,
    })
}

/// An unfiltered view of everything, for observers and goal checks.
pub fn god_view(registry: &SpatialRegistry, tick: Tick, tick_budget: Duration) -> WorldView {
    let mut objects = BTreeMap::new();
    for obj in registry.objects() {
        objects.insert(obj.id, ObjectSnapshot::of_object(obj));
    }
    for body in registry.agents() {
        objects.insert(body.id, ObjectSnapshot::of_agent(body));
        // Carried objects are part of the full state even though off-grid.
        for carried in &body.carrying {
            objects.insert(carried.id, ObjectSnapshot::of_object(carried));
        }
    }
    WorldView {
        info: WorldInfo {
            tick,
            shape: registry.shape(),
            tick_budget,
            teammates: Vec::new(),
        },
        self_id: ObjectId::INVALID,
        objects,
    }
}
