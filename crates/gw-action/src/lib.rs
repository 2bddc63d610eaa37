//! `gw-action` — the two-phase action protocol.
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`result`]  | `Reason` vocabulary, `ActionResult`                     |
//! | [`action`]  | The `Action` trait (`is_possible` / `mutate`)           |
//! | [`registry`]| `ActionRegistry` — capability gating and dispatch       |
//! | [`moves`]   | The eight compass moves                                 |
//! | [`objects`] | Grab, drop, remove                                      |
//! | [`doors`]   | Open and close                                          |
//!
//! Every action splits into a pure legality check (`is_possible`) and a
//! mutation (`mutate`).  Neither ever returns `Err`: an illegal action is a
//! normal outcome, reported as an [`ActionResult`] with a reason code that
//! the deciding brain gets back verbatim.

pub mod action;
pub mod doors;
pub mod moves;
pub mod objects;
pub mod registry;
pub mod result;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::Action;
pub use doors::{CloseDoorAction, OpenDoorAction};
pub use moves::MoveAction;
pub use objects::{DropObjectAction, GrabObjectAction, RemoveObjectAction};
pub use registry::ActionRegistry;
pub use result::{ActionResult, Reason};
