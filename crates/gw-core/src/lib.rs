//! `gw-core` — foundational types for the `rust_gw` grid-world engine.
//!
//! This crate is a dependency of every other `gw-*` crate.  It intentionally
//! has no `gw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`ids`]     | `ObjectId`, `MessageId`, `RoomId`                       |
//! | [`grid`]    | `Coord`, `GridShape`, Euclidean distance                |
//! | [`time`]    | `Tick`, `WorldClock`, `WorldConfig`                     |
//! | [`rng`]     | `AgentRng` (per-agent), `WorldRng` (world-level)        |
//! | [`tags`]    | `TypeTag` object-kind tags, `TypeFilter`                |
//! | [`actions`] | `ActionKind` closed action keys, `ActionArgs`           |
//! | [`error`]   | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |
//!
//! `gw-world` turns the `serde` flag on unconditionally for its snapshots.

pub mod actions;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod tags;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use actions::{ActionArgs, ActionKind};
pub use error::{CoreError, CoreResult};
pub use grid::{Coord, GridShape};
pub use ids::{MessageId, ObjectId, RoomId};
pub use rng::{AgentRng, WorldRng};
pub use tags::{TypeFilter, TypeTag};
pub use time::{Tick, WorldClock, WorldConfig};
