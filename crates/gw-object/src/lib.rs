//! `gw-object` — the data model of everything that lives on the grid.
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`object`] | `WorldObject`, `DoorStatus`, `PropertyValue`           |
//! | [`agent`]  | `AgentBody` (carry list, team, action set)             |
//! | [`busy`]   | `BusyState` — the action-duration FSM                  |
//! | [`sense`]  | `SenseCapability`, `SenseRange`                        |
//!
//! Objects and agent bodies are plain data: all placement rules live in
//! `gw-world`'s registry and all world mutation lives in `gw-action`.  An
//! `AgentBody` is *not* a decision maker — the policy deciding its actions is
//! a separate `AgentBrain` (see `gw-brain`) wired up by the scheduler.

pub mod agent;
pub mod busy;
pub mod object;
pub mod sense;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::AgentBody;
pub use busy::BusyState;
pub use object::{DoorStatus, ObjectTickFn, PropertyValue, WorldObject};
pub use sense::{SenseCapability, SenseRange};
