//! World observer trait for progress reporting and data collection.

use gw_action::ActionResult;
use gw_core::{ActionKind, ObjectId, Tick};
use gw_world::SpatialRegistry;

/// Callbacks invoked by [`GridWorld`][crate::GridWorld] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl WorldObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, registry: &SpatialRegistry) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}: {} agents", registry.agent_count());
///         }
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called at the very start of each tick, before the goal check.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per applied (or rejected) action, right after the
    /// mutation.  `kind` is `None` for a deliberate idle.
    fn on_action(
        &mut self,
        _tick: Tick,
        _agent: ObjectId,
        _kind: Option<ActionKind>,
        _result: &ActionResult,
    ) {
    }

    /// Called at the end of each tick with the post-mutation world.
    fn on_tick_end(&mut self, _tick: Tick, _registry: &SpatialRegistry) {}

    /// Called once, at the tick where every goal is reached.
    fn on_world_done(&mut self, _tick: Tick) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
