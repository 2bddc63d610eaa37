//! The `Action` trait: a pure legality check paired with a mutation.

use gw_core::{ActionArgs, ActionKind, AgentRng};
use gw_world::SpatialRegistry;

use crate::result::ActionResult;

/// One kind of world mutation an agent can decide on.
///
/// `is_possible` must not change anything: the scheduler calls it both at
/// decision time (for brains that pre-check) and again when the buffered
/// action is applied at its commit tick, and the answers must agree for an
/// unchanged world.  Randomized target selection therefore happens inside
/// `mutate`, using the acting agent's own deterministic stream.
pub trait Action: Send {
    fn kind(&self) -> ActionKind;

    /// Ticks the agent stays busy after deciding on this action.  Zero
    /// means the action commits the same tick.  Overridable per invocation
    /// via [`ActionArgs::duration_override`].
    fn default_duration(&self) -> u64 {
        0
    }

    /// Pure legality check against the current world.
    fn is_possible(
        &self,
        registry: &SpatialRegistry,
        agent: gw_core::ObjectId,
        args: &ActionArgs,
    ) -> ActionResult;

    /// Apply the action.  Only called after `is_possible` succeeded against
    /// the same world state.
    fn mutate(
        &self,
        registry: &mut SpatialRegistry,
        agent: gw_core::ObjectId,
        args: &ActionArgs,
        rng: &mut AgentRng,
    ) -> ActionResult;
}
