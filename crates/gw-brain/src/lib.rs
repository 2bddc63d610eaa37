//! `gw-brain` — the deciding half of an agent.
//!
//! A brain never touches the world.  Each tick the scheduler hands it a
//! filtered [`WorldView`] and its own deterministic RNG stream, and the
//! brain answers with a [`Decision`]: at most one action plus any outgoing
//! messages.  Feedback flows back through [`AgentBrain::on_action_result`]
//! once the action actually applies (which, for actions with a duration,
//! is ticks later).

use gw_action::ActionResult;
use gw_core::{ActionArgs, ActionKind, AgentRng};
use gw_message::Message;
use gw_world::WorldView;

#[cfg(test)]
mod tests;

// ── Decision ──────────────────────────────────────────────────────────────────

/// What one agent wants to do this tick.
#[derive(Clone, Debug, Default)]
pub struct Decision {
    /// `None` is a deliberate idle; it still occupies the tick.
    pub action: Option<(ActionKind, ActionArgs)>,
    /// Messages to route at the end of the tick.
    pub messages: Vec<Message>,
}

impl Decision {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn act(kind: ActionKind, args: ActionArgs) -> Self {
        Self {
            action: Some((kind, args)),
            messages: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

// ── AgentBrain ────────────────────────────────────────────────────────────────

/// One agent's policy.  Implementations hold whatever memory they need;
/// the scheduler owns one boxed brain per agent.
pub trait AgentBrain: Send {
    /// Narrow the engine-filtered view further (occlusion, attention).
    /// The default keeps everything the senses allow.
    fn filter_observations(&mut self, view: WorldView) -> WorldView {
        view
    }

    /// Decide this tick's action.  Called only when the agent is not busy.
    fn decide_on_action(&mut self, view: &WorldView, rng: &mut AgentRng) -> Decision;

    /// A message delivered to this agent, in routing order.
    fn on_message(&mut self, _message: &Message) {}

    /// The outcome of this agent's most recently applied (or rejected)
    /// action.
    fn on_action_result(&mut self, _result: &ActionResult) {}
}

/// Decides nothing, forever.  Useful as a placeholder body-without-policy.
pub struct NoopBrain;

impl AgentBrain for NoopBrain {
    fn decide_on_action(&mut self, _view: &WorldView, _rng: &mut AgentRng) -> Decision {
        Decision::idle()
    }
}
