//! The `GridWorld` struct and its tick loop.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use gw_action::{ActionRegistry, ActionResult};
use gw_brain::AgentBrain;
use gw_core::{AgentRng, ObjectId, Tick, WorldClock, WorldConfig};
use gw_message::{AgentDirectory, Message, MessageRouter};
use gw_object::AgentBody;
use gw_world::{SpatialRegistry, WorldGoal, all_goals_reached, visible_state};
use tracing::warn;

use crate::{SimResult, WorldObserver};

/// What one call to [`GridWorld::step`] did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// A full tick was processed.
    Running,
    /// Every goal is reached; nothing was processed.
    Done,
}

/// The main simulation runner.
///
/// Owns all world state and drives the per-tick phases documented at the
/// [crate root](crate).  Create via [`WorldBuilder`][crate::WorldBuilder].
pub struct GridWorld {
    /// Global configuration (shape, seed, tick budget).
    pub config: WorldConfig,

    /// Tracks the current tick and the wall-clock budget per tick.
    pub clock: WorldClock,

    /// All objects and agent bodies.
    pub registry: SpatialRegistry,

    /// The installed action implementations.
    pub actions: ActionRegistry,

    /// Chatrooms and pending inboxes.
    pub router: MessageRouter,

    /// Termination conditions, AND-combined.  A world without goals runs
    /// until its driver stops calling [`step`][Self::step].
    pub(crate) goals: Vec<Box<dyn WorldGoal>>,

    /// One policy per agent, keyed by the agent's id.
    pub(crate) brains: BTreeMap<ObjectId, Box<dyn AgentBrain>>,

    /// Per-agent deterministic RNG streams, derived from the master seed.
    pub(crate) rngs: BTreeMap<ObjectId, AgentRng>,

    pub(crate) is_done: bool,
}

impl GridWorld {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every goal is reached.  Calls observer hooks at every
    /// phase boundary.  Use [`NoopObserver`][crate::NoopObserver] if you
    /// don't need callbacks.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<Tick> {
        while self.step(observer)? == StepOutcome::Running {}
        Ok(self.clock.current_tick)
    }

    /// Run at most `n` ticks from the current position, stopping early when
    /// the goals are reached.  Useful for tests and incremental stepping.
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<Tick> {
        for _ in 0..n {
            if self.step(observer)? == StepOutcome::Done {
                break;
            }
        }
        Ok(self.clock.current_tick)
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.is_done
    }

    /// Register an agent and its brain mid-run.  The agent first acts on
    /// the tick after registration.
    pub fn add_agent(
        &mut self,
        body: AgentBody,
        brain: Box<dyn AgentBrain>,
    ) -> SimResult<ObjectId> {
        let id = self.registry.register_agent(body)?;
        self.rngs.insert(id, AgentRng::new(self.config.seed, id));
        self.brains.insert(id, brain);
        Ok(id)
    }

    /// Remove an agent, its brain, its RNG stream, and its pending inbox.
    /// Anything it carried leaves the world with it.
    pub fn remove_agent(&mut self, id: ObjectId) -> SimResult<AgentBody> {
        let body = self.registry.remove_agent(id)?;
        self.brains.remove(&id);
        self.rngs.remove(&id);
        self.router.forget_agent(id);
        Ok(body)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Process one tick.  Returns [`StepOutcome::Done`] (and processes
    /// nothing) once every goal is reached.
    pub fn step<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<StepOutcome> {
        let now = self.clock.current_tick;
        let tick_started = Instant::now();
        observer.on_tick_start(now);

        // ── Phase 1: goal check ───────────────────────────────────────────
        if self.is_done || all_goals_reached(&mut self.goals, &self.registry, now) {
            if !self.is_done {
                self.is_done = true;
                observer.on_world_done(now);
            }
            return Ok(StepOutcome::Done);
        }

        // ── Phase 2: observe and decide, in registration order ────────────
        //
        // Busy agents still get their observation refreshed (so memory-
        // keeping brains stay current) but are not asked for a decision.
        let agent_ids = self.registry.agent_ids();
        let mut outgoing: Vec<Message> = Vec::new();
        for &agent in &agent_ids {
            let Ok(view) = visible_state(&self.registry, agent, now, self.clock.tick_budget)
            else {
                continue;
            };
            let Some(brain) = self.brains.get_mut(&agent) else {
                continue;
            };
            let view = brain.filter_observations(view);

            let busy = self
                .registry
                .agent(agent)
                .map(|body| body.busy.blocks(now))
                .unwrap_or(true);
            if busy {
                continue;
            }

            let Some(rng) = self.rngs.get_mut(&agent) else {
                continue;
            };
            let decision = brain.decide_on_action(&view, rng);
            outgoing.extend(decision.messages);

            let duration = match &decision.action {
                Some((kind, args)) => self.actions.duration(*kind, args),
                None => 0,
            };
            if let Some(body) = self.registry.agent_mut(agent) {
                body.busy.begin(now, decision.action, duration);
            }
        }

        // ── Phase 3: apply committed actions, in registration order ───────
        //
        // Legality is evaluated here, against the world as mutated by the
        // agents applied earlier this tick; the occupancy index is refreshed
        // after every mutation so each check sees committed state.
        for &agent in &agent_ids {
            let decided = match self.registry.agent_mut(agent) {
                Some(body) if body.busy.commits_at(now) => {
                    let decided = body.busy.take_decided();
                    body.busy.clear();
                    decided
                }
                _ => continue,
            };

            let (kind, result) = match decided {
                None => (None, ActionResult::idle()),
                Some((kind, args)) => {
                    let Some(rng) = self.rngs.get_mut(&agent) else {
                        continue;
                    };
                    let result =
                        self.actions
                            .perform(&mut self.registry, agent, kind, &args, rng);
                    self.registry.rebuild_grid_index();
                    (Some(kind), result)
                }
            };

            observer.on_action(now, agent, kind, &result);
            if let Some(brain) = self.brains.get_mut(&agent) {
                brain.on_action_result(&result);
            }
        }

        // ── Phase 4: route this tick's messages, then deliver inboxes ─────
        if !outgoing.is_empty() {
            let directory =
                AgentDirectory::new(self.registry.agent_names(), self.registry.teams());
            for message in &outgoing {
                self.router.route(message, now, &directory);
            }
        }
        for &agent in &agent_ids {
            let inbox = self.router.take_inbox(agent);
            if let Some(brain) = self.brains.get_mut(&agent) {
                for message in &inbox {
                    brain.on_message(message);
                }
            }
        }

        // ── Phase 5: object self-update hooks ─────────────────────────────
        let hooked: Vec<ObjectId> = self
            .registry
            .objects()
            .filter(|obj| obj.on_tick.is_some())
            .map(|obj| obj.id)
            .collect();
        let ran_hooks = !hooked.is_empty();
        for id in hooked {
            if let Some(obj) = self.registry.object_mut(id) {
                let hook = obj.on_tick;
                if let Some(hook) = hook {
                    hook(obj, now);
                }
            }
        }
        // Hooks may relocate their object.
        if ran_hooks {
            self.registry.rebuild_grid_index();
        }

        observer.on_tick_end(now, &self.registry);

        // ── Phase 6: advance, then sleep out the budget ───────────────────
        self.clock.advance();
        self.pace_tick(now, tick_started);

        Ok(StepOutcome::Running)
    }

    /// Best-effort real-time pacing: sleep out the remainder of the budget,
    /// warn (but continue) when the tick overran it.
    fn pace_tick(&self, tick: Tick, started: Instant) {
        let budget = self.clock.tick_budget;
        if budget == Duration::ZERO {
            return;
        }
        let elapsed = started.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        } else {
            warn!(
                %tick,
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = budget.as_millis() as u64,
                "tick overran its wall-clock budget"
            );
        }
    }
}
