//! Deterministic per-agent and world-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent body gets its own independent `SmallRng` seeded by:
//!
//!   seed = master_seed XOR (object_serial * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive serials uniformly across the seed space.
//! This means:
//!
//! - Agents never share RNG state, so one agent's random tie-breaks cannot
//!   perturb another agent's stream.
//! - Adding agents to a world does not disturb the seeds of existing agents —
//!   runs are reproducible even as populations grow.
//! - Two runs with the same master seed and the same agent policies produce
//!   identical world histories.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ObjectId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Created once per agent body at world construction and stored by the
/// scheduler alongside the agent's brain.  All randomness an action or a
/// decision policy needs flows through this handle.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the world's master seed and an object ID.
    pub fn new(master_seed: u64, agent: ObjectId) -> Self {
        let seed = master_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.  Returns `None` if empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}

// ── WorldRng ──────────────────────────────────────────────────────────────────

/// World-level RNG for registry-wide draws (scenario generation, exogenous
/// events).  Used only from the single scheduler thread.
pub struct WorldRng(SmallRng);

impl WorldRng {
    pub fn new(seed: u64) -> Self {
        WorldRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `WorldRng` with a different seed offset — useful for
    /// seeding auxiliary streams deterministically from the master seed.
    pub fn child(&mut self, offset: u64) -> WorldRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        WorldRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
