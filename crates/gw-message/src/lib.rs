//! `gw-message` — agent-to-agent communication.
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`message`]| `Message`, `Address`                                  |
//! | [`room`]   | `Chatroom`, `RoomKind` — durable per-channel history  |
//! | [`router`] | `MessageRouter` — decode, fan-out, inbox delivery     |
//! | [`error`]  | `MessageError` / `MessageResult`                      |
//!
//! Addressing is by *name token*: a token may resolve to a team, to an
//! agent, or to both at once (every agent without an explicit team is its
//! own one-member team, so the overlap is the common case, not an edge).
//! The router resolves tokens against a per-tick [`router::AgentDirectory`]
//! so this crate never needs to see the world itself.

pub mod error;
pub mod message;
pub mod room;
pub mod router;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{MessageError, MessageResult};
pub use message::{Address, Message};
pub use room::{Chatroom, RoomKind};
pub use router::{AgentDirectory, MessageRouter, RouteReport};
