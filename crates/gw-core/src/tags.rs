//! Closed object-kind tags and type filtering.
//!
//! Every world object carries a `kind_chain`: an ordered list of tags from
//! most specific to most generic (always ending in [`TypeTag::Object`]).
//! Range queries and sense capabilities filter on these tags instead of any
//! runtime type introspection — the tag set is closed and attached at
//! construction time.

use std::fmt;

// ── TypeTag ───────────────────────────────────────────────────────────────────

/// One tag in an object's kind chain.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeTag {
    /// The generic root tag; present in every chain.
    Object,
    /// An impassable wall segment.
    Wall,
    /// A door that toggles between open (traversable) and closed.
    Door,
    /// A floor marker; never blocks placement or movement.
    AreaTile,
    /// A movable block that agents can carry.
    Block,
    /// An object with a decaying charge (exercises the self-update hook).
    Battery,
    /// An agent body.
    Agent,
}

impl TypeTag {
    /// The canonical chain for a leaf tag: `[self, Object]`, or just
    /// `[Object]` for the root.
    pub fn base_chain(self) -> Vec<TypeTag> {
        match self {
            TypeTag::Object => vec![TypeTag::Object],
            other => vec![other, TypeTag::Object],
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Object => "Object",
            TypeTag::Wall => "Wall",
            TypeTag::Door => "Door",
            TypeTag::AreaTile => "AreaTile",
            TypeTag::Block => "Block",
            TypeTag::Battery => "Battery",
            TypeTag::Agent => "Agent",
        };
        f.write_str(name)
    }
}

// ── TypeFilter ────────────────────────────────────────────────────────────────

/// A predicate over kind chains, used by range queries and sense capabilities.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeFilter {
    /// Matches every object (the `"*"` wildcard).
    Any,
    /// Matches objects whose chain contains the tag at any depth, so a
    /// `Tag(Object)` filter matches everything and `Tag(Door)` matches only
    /// doors.
    Tag(TypeTag),
}

impl TypeFilter {
    /// `true` if an object with `chain` passes this filter.
    #[inline]
    pub fn matches(self, chain: &[TypeTag]) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Tag(tag) => chain.contains(&tag),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::Any => f.write_str("*"),
            TypeFilter::Tag(tag) => write!(f, "{tag}"),
        }
    }
}
