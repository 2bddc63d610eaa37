//! `gw-sim` — tick loop orchestrator for the rust_gw engine.
//!
//! # Per-tick phases
//!
//! ```text
//! for each tick:
//!   ① Goals    — stop the world when every goal is reached.
//!   ② Decide   — per agent in registration order: build the sense-filtered
//!                view, refresh the brain; if the agent is not busy, ask it
//!                to decide and open its busy window.
//!   ③ Apply    — per agent in registration order: actions whose busy
//!                window commits this tick are validated and mutated one by
//!                one, with the occupancy index refreshed after each.
//!   ④ Messages — route everything decided this tick, then hand each agent
//!                its inbox.
//!   ⑤ Objects  — run per-object self-update hooks.
//!   ⑥ Advance  — bump the clock; sleep out the remainder of the wall-clock
//!                budget (best effort, overruns are warned, never fatal).
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gw_core::{GridShape, WorldConfig};
//! use gw_sim::{NoopObserver, WorldBuilder};
//!
//! let mut builder = WorldBuilder::new(WorldConfig::new(GridShape::new(8, 8), 42));
//! builder.add_agent(AgentBody::new("scout", Coord::new(1, 1)), Box::new(NoopBrain))?;
//! builder.add_goal(Box::new(LimitedTickGoal::new(100)));
//! let mut world = builder.build()?;
//! world.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod world;


pub use builder::WorldBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, WorldObserver};
pub use world::{GridWorld, StepOutcome};
