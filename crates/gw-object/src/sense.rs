//! Per-agent sensing capabilities.
//!
//! An agent's observation is the set of objects within its sense range.
//! Ranges are per kind tag: a capability may carry at most one wildcard
//! range for everything plus tighter (or wider) overrides for specific
//! tags.  The override for an object's most specific tag always wins over
//! the wildcard; without a wildcard, kinds with no entry are invisible.

use std::collections::BTreeMap;

use gw_core::{Coord, TypeTag};

/// How far an agent can perceive objects of some kind.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SenseRange {
    /// Perceive objects at Euclidean distance `<= radius` (inclusive).
    Bounded(f64),
    /// Perceive everywhere on the grid.
    Unbounded,
}

impl SenseRange {
    /// `true` if an object at `target` is perceivable from `from`.
    #[inline]
    pub fn covers(&self, from: Coord, target: Coord) -> bool {
        match self {
            SenseRange::Bounded(radius) => from.distance(target) <= *radius,
            SenseRange::Unbounded => true,
        }
    }
}

/// An agent's full sensing profile.
///
/// Resolution order for an object with most specific tag `t`:
/// `per_type[t]` if present, else the wildcard range, else not perceivable
/// at all.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SenseCapability {
    /// Fallback range for kinds without a specific entry; `None` makes
    /// unlisted kinds invisible.
    pub wildcard: Option<SenseRange>,
    /// Per-kind overrides, keyed by the object's most specific tag.
    pub per_type: BTreeMap<TypeTag, SenseRange>,
}

impl Default for SenseCapability {
    /// Omniscient: everything is visible everywhere.
    fn default() -> Self {
        Self::omniscient()
    }
}

impl SenseCapability {
    /// See every object on the grid regardless of distance.
    pub fn omniscient() -> Self {
        Self {
            wildcard: Some(SenseRange::Unbounded),
            per_type: BTreeMap::new(),
        }
    }

    /// See every kind of object out to `radius`.
    pub fn uniform(radius: f64) -> Self {
        Self {
            wildcard: Some(SenseRange::Bounded(radius)),
            per_type: BTreeMap::new(),
        }
    }

    /// No wildcard at all: only kinds added via
    /// [`with_range`][Self::with_range] are perceivable.
    pub fn selective() -> Self {
        Self {
            wildcard: None,
            per_type: BTreeMap::new(),
        }
    }

    /// Override the range for one specific kind tag.
    pub fn with_range(mut self, tag: TypeTag, range: SenseRange) -> Self {
        self.per_type.insert(tag, range);
        self
    }

    /// The range that applies to an object whose most specific tag is `tag`,
    /// or `None` when the kind is not perceivable at all.
    #[inline]
    pub fn range_for(&self, tag: TypeTag) -> Option<SenseRange> {
        self.per_type.get(&tag).copied().or(self.wildcard)
    }

    /// `true` if an object of kind `tag` at `target` is perceivable from
    /// `from`.
    #[inline]
    pub fn perceives(&self, from: Coord, target: Coord, tag: TypeTag) -> bool {
        self.range_for(tag)
            .is_some_and(|range| range.covers(from, target))
    }
}
