//! The message envelope and its addressing forms.

use gw_core::{MessageId, ObjectId, Tick};

use crate::error::{MessageError, MessageResult};

/// Who a message is for.
///
/// Tokens are unique names, not ids: `To("bravo")` reaches the team named
/// `bravo`, the agent named `bravo`, or both.
#[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub enum Address {
    /// Every agent except the sender.
    Global,
    /// One name token (agent and/or team).
    To(String),
    /// Several tokens, each decoded as [`Address::To`].
    Many(Vec<String>),
}

/// One message as sent or delivered.
///
/// `id` and `tick` are assigned by the router: every delivered copy and
/// every room-log copy carries a fresh id, so no two stored messages ever
/// share one.
#[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub from: ObjectId,
    pub to: Address,
    /// Opaque payload; the engine never interprets it.
    pub content: String,
    /// Tick at which the message was routed.
    pub tick: Tick,
}

impl Message {
    /// Build an unrouted message.  Fails on an empty recipient list or an
    /// empty name token; routing-time resolution failures are not checked
    /// here.
    pub fn new(from: ObjectId, to: Address, content: impl Into<String>) -> MessageResult<Self> {
        match &to {
            Address::Global => {}
            Address::To(token) => {
                if token.is_empty() {
                    return Err(MessageError::EmptyToken);
                }
            }
            Address::Many(tokens) => {
                if tokens.is_empty() {
                    return Err(MessageError::NoRecipients);
                }
                if tokens.iter().any(String::is_empty) {
                    return Err(MessageError::EmptyToken);
                }
            }
        }
        Ok(Self {
            id: MessageId::INVALID,
            from,
            to,
            content: content.into(),
            tick: Tick::ZERO,
        })
    }
}
