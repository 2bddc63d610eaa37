//! World goals: when is a simulation done?

use gw_core::Tick;

use crate::registry::SpatialRegistry;

/// A termination condition checked at the top of every tick.
///
/// `&mut self` so goals may cache progress between checks.
pub trait WorldGoal {
    /// `true` once the goal is met.  Must stay `true` on later ticks.
    fn is_reached(&mut self, registry: &SpatialRegistry, tick: Tick) -> bool;

    /// Completion in `[0, 1]`; defaults to a met/unmet step.
    fn progress(&mut self, registry: &SpatialRegistry, tick: Tick) -> f64 {
        if self.is_reached(registry, tick) { 1.0 } else { 0.0 }
    }
}

/// `true` when every goal is met.  A world without goals never finishes on
/// its own and must be stopped by its driver.
pub fn all_goals_reached(
    goals: &mut [Box<dyn WorldGoal>],
    registry: &SpatialRegistry,
    tick: Tick,
) -> bool {
    !goals.is_empty()
        && goals
            .iter_mut()
            .all(|goal| goal.is_reached(registry, tick))
}

/// Done after a fixed number of ticks.
pub struct LimitedTickGoal {
    pub max_ticks: u64,
}

impl LimitedTickGoal {
    pub fn new(max_ticks: u64) -> Self {
        Self { max_ticks }
    }
}

impl WorldGoal for LimitedTickGoal {
    fn is_reached(&mut self, _registry: &SpatialRegistry, tick: Tick) -> bool {
        tick.0 >= self.max_ticks
    }

    fn progress(&mut self, _registry: &SpatialRegistry, tick: Tick) -> f64 {
        if self.max_ticks == 0 {
            return 1.0;
        }
        (tick.0 as f64 / self.max_ticks as f64).min(1.0)
    }
}
