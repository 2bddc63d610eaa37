//! The `OutputWriter` trait implemented by backend writers.

use crate::{ActionTraceRow, AgentSnapshotRow, OutputResult};

/// Trait implemented by trace writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`WorldOutputObserver::take_error`][crate::WorldOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of action outcomes (one tick's worth).
    fn write_actions(&mut self, rows: &[ActionTraceRow]) -> OutputResult<()>;

    /// Write a batch of end-of-tick agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
