//! Builder for constructing a [`GridWorld`].

use std::collections::BTreeMap;

use gw_action::ActionRegistry;
use gw_brain::AgentBrain;
use gw_core::{AgentRng, ObjectId, WorldConfig};
use gw_message::MessageRouter;
use gw_object::{AgentBody, WorldObject};
use gw_world::{SpatialRegistry, WorldGoal};

use crate::{GridWorld, SimResult};

/// Assembles a world: configuration first, then objects, agents (each with
/// its brain), and goals.  Registration happens immediately, so placement
/// errors surface at the `add_*` call and the returned ids are final.
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = WorldBuilder::new(WorldConfig::new(GridShape::new(8, 8), 42));
/// builder.add_object(WorldObject::wall("wall", Coord::new(3, 3)))?;
/// let scout = builder.add_agent(AgentBody::new("scout", Coord::new(1, 1)), Box::new(PatrolBrain::new()))?;
/// builder.add_goal(Box::new(LimitedTickGoal::new(200)));
/// let mut world = builder.build()?;
/// ```
pub struct WorldBuilder {
    config: WorldConfig,
    registry: SpatialRegistry,
    actions: ActionRegistry,
    goals: Vec<Box<dyn WorldGoal>>,
    brains: BTreeMap<ObjectId, Box<dyn AgentBrain>>,
}

impl WorldBuilder {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            registry: SpatialRegistry::new(config.shape),
            config,
            actions: ActionRegistry::standard(),
            goals: Vec::new(),
            brains: BTreeMap::new(),
        }
    }

    /// Place an object; fails on out-of-bounds or blocking collisions.
    pub fn add_object(&mut self, obj: WorldObject) -> SimResult<ObjectId> {
        Ok(self.registry.register_object(obj)?)
    }

    /// Place an agent with its deciding brain.
    pub fn add_agent(
        &mut self,
        body: AgentBody,
        brain: Box<dyn AgentBrain>,
    ) -> SimResult<ObjectId> {
        let id = self.registry.register_agent(body)?;
        self.brains.insert(id, brain);
        Ok(id)
    }

    /// Add a termination condition.  Goals are AND-combined; a world
    /// without any never finishes on its own.
    pub fn add_goal(&mut self, goal: Box<dyn WorldGoal>) {
        self.goals.push(goal);
    }

    /// Replace the default ([`ActionRegistry::standard`]) action table.
    pub fn with_actions(mut self, actions: ActionRegistry) -> Self {
        self.actions = actions;
        self
    }

    /// Validate the configuration and return a ready-to-run world.
    pub fn build(self) -> SimResult<GridWorld> {
        self.config.validate()?;
        let rngs = self
            .brains
            .keys()
            .map(|&id| (id, AgentRng::new(self.config.seed, id)))
            .collect();
        Ok(GridWorld {
            clock: self.config.make_clock(),
            config: self.config,
            registry: self.registry,
            actions: self.actions,
            router: MessageRouter::new(),
            goals: self.goals,
            brains: self.brains,
            rngs,
            is_done: false,
        })
    }
}
