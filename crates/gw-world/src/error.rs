//! World-construction and lookup errors.
//!
//! These are fatal, `?`-propagated errors.  In-tick action failures are not
//! errors at all: they are `ActionResult` values with a reason code.

use gw_core::{Coord, GridShape, ObjectId};

#[derive(thiserror::Error, Debug)]
pub enum WorldError {
    #[error("location {location} is outside the {shape} grid")]
    OutOfBounds { location: Coord, shape: GridShape },

    #[error("cell {location} already holds a blocking occupant")]
    PlacementConflict { location: Coord },

    #[error("no object with id {0}")]
    UnknownObject(ObjectId),

    #[error("no agent with id {0}")]
    UnknownAgent(ObjectId),
}

pub type WorldResult<T> = Result<T, WorldError>;
