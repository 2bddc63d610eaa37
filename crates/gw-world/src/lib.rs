//! `gw-world` — world state ownership and read access.
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`registry`] | `SpatialRegistry` — id maps, occupancy index, queries    |
//! | [`observe`]  | `WorldView` snapshots filtered by sense capability       |
//! | [`goal`]     | `WorldGoal` trait, `LimitedTickGoal`                     |
//! | [`error`]    | `WorldError` / `WorldResult`                             |
//!
//! The registry is the single owner of all objects and agent bodies.  The
//! scheduler (`gw-sim`) mutates it through actions; everyone else reads it
//! through [`observe::WorldView`] snapshots.

pub mod error;
pub mod goal;
pub mod observe;
pub mod registry;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{WorldError, WorldResult};
pub use goal::{LimitedTickGoal, WorldGoal, all_goals_reached};
pub use observe::{ObjectSnapshot, WorldInfo, WorldView, god_view, visible_state};
pub use registry::SpatialRegistry;
