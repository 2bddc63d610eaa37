//! Unit tests for the decision interface.

use gw_core::{ActionArgs, ActionKind, AgentRng, GridShape, ObjectId, Tick};
use gw_message::{Address, Message};
use gw_world::{SpatialRegistry, god_view};

use crate::{AgentBrain, Decision, NoopBrain};

fn empty_view() -> gw_world::WorldView {
    let reg = SpatialRegistry::new(GridShape::new(3, 3));
    god_view(&reg, Tick(0), std::time::Duration::ZERO)
}

#[test]
fn noop_brain_always_idles() {
    let mut brain = NoopBrain;
    let view = empty_view();
    let mut rng = AgentRng::new(1, ObjectId(0));
    for _ in 0..3 {
        let decision = brain.decide_on_action(&view, &mut rng);
        assert!(decision.action.is_none());
        assert!(decision.messages.is_empty());
    }
}

#[test]
fn default_filter_is_identity() {
    let mut brain = NoopBrain;
    let view = empty_view();
    let filtered = brain.filter_observations(view.clone());
    assert_eq!(filtered.objects.len(), view.objects.len());
    assert_eq!(filtered.info.tick, view.info.tick);
}

#[test]
fn decision_builders() {
    let message = Message::new(ObjectId(0), Address::Global, "ping").unwrap();
    let decision =
        Decision::act(ActionKind::MoveEast, ActionArgs::none()).with_message(message);
    assert_eq!(decision.action.as_ref().unwrap().0, ActionKind::MoveEast);
    assert_eq!(decision.messages.len(), 1);

    let idle = Decision::idle();
    assert!(idle.action.is_none());
}
