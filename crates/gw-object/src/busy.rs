//! The busy/duration finite-state machine.
//!
//! When an agent's decision hook returns an action at tick `t` with duration
//! `d`, the body enters `Busy` until tick `t + d` inclusive:
//!
//! - `blocks(tick)` is `true` for every tick in `[t, t + d]` — while blocked,
//!   the scheduler refreshes the agent's observation but does not invoke its
//!   decision hook again.
//! - `commit_tick()` is `t + d` — the tick at which the scheduler buffers the
//!   decided action for application.  A duration of 0 therefore commits in
//!   the same tick the action was decided.
//!
//! Deciding "no action" (idle) also passes through here with duration 0, so
//! every agent is polled at most once per tick.

use gw_core::{ActionArgs, ActionKind, Tick};

/// Per-agent action-duration state.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusyState {
    /// Free to decide on a new action.
    #[default]
    Idle,

    /// Committed to a decision until `started + duration`.
    Busy {
        /// The decided action and its arguments; `None` means idle-for-a-tick.
        decided: Option<(ActionKind, ActionArgs)>,
        /// Tick at which the decision was made.
        started: Tick,
        /// Configured (or overridden) duration in ticks.
        duration: u64,
    },
}

impl BusyState {
    /// Enter the busy window for a freshly decided action.
    pub fn begin(&mut self, started: Tick, decided: Option<(ActionKind, ActionArgs)>, duration: u64) {
        *self = BusyState::Busy {
            decided,
            started,
            duration,
        };
    }

    /// Return to `Idle` (after the committed action has been applied, or when
    /// an external event cancels the window).
    pub fn clear(&mut self) {
        *self = BusyState::Idle;
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, BusyState::Idle)
    }

    /// `true` while the agent may not be polled for a new decision.
    #[inline]
    pub fn blocks(&self, tick: Tick) -> bool {
        match self {
            BusyState::Idle => false,
            BusyState::Busy {
                started, duration, ..
            } => tick.0 <= started.0 + duration,
        }
    }

    /// The tick at which the decided action is to be applied, if busy.
    #[inline]
    pub fn commit_tick(&self) -> Option<Tick> {
        match self {
            BusyState::Idle => None,
            BusyState::Busy {
                started, duration, ..
            } => Some(Tick(started.0 + duration)),
        }
    }

    /// `true` exactly at the tick the committed action must be applied.
    #[inline]
    pub fn commits_at(&self, tick: Tick) -> bool {
        self.commit_tick() == Some(tick)
    }

    /// Take the decided action out of the busy window, leaving the window
    /// itself in place (the scheduler clears it after applying).
    pub fn take_decided(&mut self) -> Option<(ActionKind, ActionArgs)> {
        match self {
            BusyState::Idle => None,
            BusyState::Busy { decided, .. } => decided.take(),
        }
    }

    /// Peek at the decided action without consuming it.
    pub fn decided(&self) -> Option<&(ActionKind, ActionArgs)> {
        match self {
            BusyState::Idle => None,
            BusyState::Busy { decided, .. } => decided.as_ref(),
        }
    }
}
