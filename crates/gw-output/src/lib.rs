//! `gw-output` — simulation trace writers for the gridworld framework.
//!
//! Two CSV files are produced per run:
//!
//! | File                  | One row per…                                |
//! |-----------------------|---------------------------------------------|
//! | `action_trace.csv`    | applied (or rejected) action, per tick      |
//! | `agent_snapshots.csv` | agent, at the end of every tick             |
//!
//! The backend implements [`OutputWriter`] and is driven by
//! [`WorldOutputObserver`], which implements `gw_sim::WorldObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gw_output::{CsvWriter, WorldOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = WorldOutputObserver::new(writer);
//! world.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::WorldOutputObserver;
pub use row::{ActionTraceRow, AgentSnapshotRow};
pub use writer::OutputWriter;
