//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter; all scheduling
//! arithmetic (action durations, busy windows, goal deadlines) is exact
//! integer math on ticks.  Wall-clock time only enters at the very edge of
//! the tick loop: `WorldConfig::tick_budget` is the *advisory* real-time
//! budget of one tick — the scheduler sleeps away whatever is left of it and
//! merely warns when a tick ran over.

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult, GridShape};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64`: even at millisecond-scale ticks a u64 outlasts any
/// conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── WorldClock ────────────────────────────────────────────────────────────────

/// Tracks the current tick and the wall-clock budget per tick.
///
/// `WorldClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldClock {
    /// The current tick — advanced by `WorldClock::advance()` each iteration.
    pub current_tick: Tick,
    /// Advisory wall-clock duration of one tick.  `Duration::ZERO` means
    /// free-running (no sleep between ticks).
    pub tick_budget: Duration,
}

impl WorldClock {
    pub fn new(tick_budget: Duration) -> Self {
        Self {
            current_tick: Tick::ZERO,
            tick_budget,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }
}

impl fmt::Display for WorldClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_tick)
    }
}

// ── WorldConfig ───────────────────────────────────────────────────────────────

/// Top-level world configuration.
///
/// Assembled by the application (or a scenario builder) and handed to
/// `gw-sim`'s `WorldBuilder`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    /// Width and height of the grid, in cells.
    pub shape: GridShape,

    /// Master RNG seed.  The same seed plus the same agent policies always
    /// produce identical world histories.
    pub seed: u64,

    /// Advisory wall-clock budget of one tick.  The scheduler sleeps away
    /// the remainder of this budget at the end of each step; a slow tick is
    /// never aborted, only logged as over-budget.  `Duration::ZERO` runs the
    /// world as fast as possible.
    pub tick_budget: Duration,
}

impl WorldConfig {
    /// A free-running configuration with the given shape and seed.
    pub fn new(shape: GridShape, seed: u64) -> Self {
        Self {
            shape,
            seed,
            tick_budget: Duration::ZERO,
        }
    }

    /// Reject degenerate grids before any object placement happens.
    pub fn validate(&self) -> CoreResult<()> {
        if self.shape.width == 0 || self.shape.height == 0 {
            return Err(CoreError::Config(format!(
                "grid shape {} has a zero dimension",
                self.shape
            )));
        }
        Ok(())
    }

    /// Construct a `WorldClock` pre-configured for this run.
    pub fn make_clock(&self) -> WorldClock {
        WorldClock::new(self.tick_budget)
    }
}
