//! The spatial registry: single owner of every object and agent body.
//!
//! All world mutation funnels through `&mut SpatialRegistry`.  The registry
//! owns the id serial counter, enforces name uniqueness, and maintains the
//! per-cell occupancy index that movement and placement checks read.

use std::collections::{BTreeMap, BTreeSet};

use gw_core::{Coord, GridShape, ObjectId, TypeFilter};
use gw_object::{AgentBody, WorldObject};
use rustc_hash::FxHashMap;

use crate::error::{WorldError, WorldResult};

/// Owns all grid-dwelling state of one world instance.
///
/// Objects and agents live in separate `BTreeMap`s so iteration is always in
/// ascending id order — the registration order the scheduler relies on for
/// deterministic processing.  Carried objects do not live here at all: they
/// are owned by their carrier's [`AgentBody::carrying`] list and re-enter the
/// registry when dropped.
pub struct SpatialRegistry {
    shape: GridShape,
    next_serial: u32,
    objects: BTreeMap<ObjectId, WorldObject>,
    agents: BTreeMap<ObjectId, AgentBody>,
    used_names: BTreeSet<String>,
    /// Per-cell occupancy, objects before agents.  Refreshed via
    /// [`rebuild_grid_index`][Self::rebuild_grid_index] after each applied
    /// mutation.
    grid: FxHashMap<Coord, Vec<ObjectId>>,
}

impl SpatialRegistry {
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            next_serial: 0,
            objects: BTreeMap::new(),
            agents: BTreeMap::new(),
            used_names: BTreeSet::new(),
            grid: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register an object, assigning its world-unique id and name.
    ///
    /// An object that already carries a valid id (a dropped carry item
    /// re-entering the world) keeps its id and name.  Fails with
    /// [`WorldError::OutOfBounds`] or, when the object is intraversable and
    /// the target cell already holds an intraversable occupant,
    /// [`WorldError::PlacementConflict`].
    pub fn register_object(&mut self, obj: WorldObject) -> WorldResult<ObjectId> {
        self.register_object_ignoring(obj, ObjectId::INVALID)
    }

    /// Like [`register_object`][Self::register_object], but `ignore` does not
    /// count as a conflicting occupant.  This is the drop path: the carrier
    /// stands on the landing cell and must not block its own cargo.
    pub fn register_object_ignoring(
        &mut self,
        mut obj: WorldObject,
        ignore: ObjectId,
    ) -> WorldResult<ObjectId> {
        self.check_placement(obj.location, obj.is_traversable, ignore)?;
        if obj.id == ObjectId::INVALID {
            obj.id = self.next_id();
            obj.name = self.unique_name(&obj.name);
        }
        let id = obj.id;
        self.grid.entry(obj.location).or_default().push(id);
        self.objects.insert(id, obj);
        Ok(id)
    }

    /// Register an agent body.  Same placement rules as objects; an empty
    /// team defaults to the agent's own (final, unique) name.
    pub fn register_agent(&mut self, mut body: AgentBody) -> WorldResult<ObjectId> {
        self.check_placement(body.location, body.is_traversable, ObjectId::INVALID)?;
        let id = self.next_id();
        body.object.id = id;
        body.object.name = self.unique_name(&body.object.name);
        if body.team.is_empty() {
            body.team = body.object.name.clone();
        }
        self.grid.entry(body.location).or_default().push(id);
        self.agents.insert(id, body);
        Ok(id)
    }

    /// Remove an object from the world.
    ///
    /// The grid is searched first.  With `detach_from_carrier` set, an
    /// object that is not on the grid is pulled out of its carrier's carry
    /// list instead, with the backlink severed; without it a carried object
    /// stays put and the call fails with [`WorldError::UnknownObject`].
    pub fn remove_object(
        &mut self,
        id: ObjectId,
        detach_from_carrier: bool,
    ) -> WorldResult<WorldObject> {
        if let Some(obj) = self.objects.remove(&id) {
            self.evict_from_grid(id, obj.location);
            return Ok(obj);
        }
        if detach_from_carrier {
            for body in self.agents.values_mut() {
                if let Some(mut obj) = body.take_carried(id) {
                    obj.carried_by.clear();
                    return Ok(obj);
                }
            }
        }
        Err(WorldError::UnknownObject(id))
    }

    /// Remove an agent and everything it carries.
    pub fn remove_agent(&mut self, id: ObjectId) -> WorldResult<AgentBody> {
        let body = self.agents.remove(&id).ok_or(WorldError::UnknownAgent(id))?;
        self.evict_from_grid(id, body.location);
        Ok(body)
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.get(&id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject> {
        self.objects.get_mut(&id)
    }

    pub fn agent(&self, id: ObjectId) -> Option<&AgentBody> {
        self.agents.get(&id)
    }

    pub fn agent_mut(&mut self, id: ObjectId) -> Option<&mut AgentBody> {
        self.agents.get_mut(&id)
    }

    /// On-grid objects in ascending id order.
    pub fn objects(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.values()
    }

    /// Agents in ascending id (registration) order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentBody> {
        self.agents.values()
    }

    /// Agent ids in registration order; the scheduler's processing order.
    pub fn agent_ids(&self) -> Vec<ObjectId> {
        self.agents.keys().copied().collect()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Resolve a unique name to an id, objects before agents.
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .values()
            .find(|obj| obj.name == name)
            .map(|obj| obj.id)
            .or_else(|| {
                self.agents
                    .values()
                    .find(|body| body.name == name)
                    .map(|body| body.id)
            })
    }

    /// The agent currently carrying `id`, if any.
    pub fn carrier_of(&self, id: ObjectId) -> Option<ObjectId> {
        self.agents
            .values()
            .find(|body| body.carrying.iter().any(|obj| obj.id == id))
            .map(|body| body.id)
    }

    /// All members of `team` in registration order.
    pub fn team_members(&self, team: &str) -> Vec<ObjectId> {
        self.agents
            .values()
            .filter(|body| body.team == team)
            .map(|body| body.id)
            .collect()
    }

    /// Team name → member ids, for message routing.
    pub fn teams(&self) -> BTreeMap<String, Vec<ObjectId>> {
        let mut teams: BTreeMap<String, Vec<ObjectId>> = BTreeMap::new();
        for body in self.agents.values() {
            teams.entry(body.team.clone()).or_default().push(body.id);
        }
        teams
    }

    /// Agent name → id, for message routing.
    pub fn agent_names(&self) -> BTreeMap<String, ObjectId> {
        self.agents
            .values()
            .map(|body| (body.name.clone(), body.id))
            .collect()
    }

    // ── Occupancy queries ─────────────────────────────────────────────────

    /// Ids occupying `cell`, objects before agents.  Empty off-grid.
    pub fn occupants_at(&self, cell: Coord) -> &[ObjectId] {
        self.grid.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `true` if any occupant of `cell` is intraversable.
    pub fn is_blocked(&self, cell: Coord) -> bool {
        self.is_blocked_ignoring(cell, ObjectId::INVALID)
    }

    /// [`is_blocked`][Self::is_blocked], with `ignore` excluded from the
    /// occupant scan.  Drop legality uses this so a carrier's own body never
    /// blocks the cell it is dropping on.
    pub fn is_blocked_ignoring(&self, cell: Coord, ignore: ObjectId) -> bool {
        self.occupants_at(cell)
            .iter()
            .any(|&id| id != ignore && !self.occupant_is_traversable(id))
    }

    /// `true` if `cell` is in bounds and holds no placement-blocking
    /// occupant other than `ignore`.  This is the drop-search legality test;
    /// area tiles never block placement.
    pub fn placement_free(&self, cell: Coord, ignore: ObjectId) -> bool {
        self.shape.contains(cell)
            && !self.occupants_at(cell).iter().any(|&id| {
                id != ignore && self.occupant_blocks_placement(id)
            })
    }

    /// Recompute the occupancy index from the authoritative maps.
    ///
    /// Called by the scheduler after each applied action so later checks in
    /// the same tick see the committed state.
    pub fn rebuild_grid_index(&mut self) {
        self.grid.clear();
        for obj in self.objects.values() {
            self.grid.entry(obj.location).or_default().push(obj.id);
        }
        for body in self.agents.values() {
            self.grid.entry(body.location).or_default().push(body.id);
        }
    }

    // ── Range queries ─────────────────────────────────────────────────────

    /// Everything within Euclidean distance `range` of `origin` (inclusive)
    /// whose kind chain matches `filter`.  Objects come before agents, each
    /// group in ascending id order.
    pub fn objects_in_range(
        &self,
        origin: Coord,
        filter: TypeFilter,
        range: f64,
    ) -> Vec<ObjectId> {
        let mut hits: Vec<ObjectId> = self
            .objects
            .values()
            .filter(|obj| filter.matches(&obj.kind_chain) && origin.distance(obj.location) <= range)
            .map(|obj| obj.id)
            .collect();
        hits.extend(
            self.agents
                .values()
                .filter(|body| {
                    filter.matches(&body.kind_chain) && origin.distance(body.location) <= range
                })
                .map(|body| body.id),
        );
        hits
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_serial);
        self.next_serial += 1;
        id
    }

    /// Sanitize a requested name and make it world-unique.
    fn unique_name(&mut self, raw: &str) -> String {
        let base: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        let base = if base.is_empty() { "object".to_owned() } else { base };

        let mut candidate = base.clone();
        let mut n = 2u32;
        while self.used_names.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        self.used_names.insert(candidate.clone());
        candidate
    }

    fn check_placement(
        &self,
        location: Coord,
        is_traversable: bool,
        ignore: ObjectId,
    ) -> WorldResult<()> {
        if !self.shape.contains(location) {
            return Err(WorldError::OutOfBounds {
                location,
                shape: self.shape,
            });
        }
        if !is_traversable && self.is_blocked_ignoring(location, ignore) {
            return Err(WorldError::PlacementConflict { location });
        }
        Ok(())
    }

    fn evict_from_grid(&mut self, id: ObjectId, location: Coord) {
        if let Some(cell) = self.grid.get_mut(&location) {
            cell.retain(|&occ| occ != id);
        }
    }

    fn occupant_is_traversable(&self, id: ObjectId) -> bool {
        self.objects
            .get(&id)
            .map(|obj| obj.is_traversable)
            .or_else(|| self.agents.get(&id).map(|body| body.is_traversable))
            .unwrap_or(true)
    }

    fn occupant_blocks_placement(&self, id: ObjectId) -> bool {
        self.objects
            .get(&id)
            .map(|obj| obj.blocks_placement)
            .or_else(|| self.agents.get(&id).map(|body| body.blocks_placement))
            .unwrap_or(false)
    }
}
