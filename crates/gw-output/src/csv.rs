//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `action_trace.csv`
//! - `agent_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::NO_OBJECT;
use crate::writer::OutputWriter;
use crate::{ActionTraceRow, AgentSnapshotRow, OutputResult};

/// Writes simulation traces to two CSV files.
pub struct CsvWriter {
    actions:   Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut actions = Writer::from_path(dir.join("action_trace.csv"))?;
        actions.write_record(["tick", "agent_id", "action", "reason", "succeeded", "object_id"])?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(["tick", "agent_id", "name", "x", "y", "carrying", "busy"])?;

        Ok(Self {
            actions,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_actions(&mut self, rows: &[ActionTraceRow]) -> OutputResult<()> {
        for row in rows {
            self.actions.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.action_label(),
                row.reason.to_string(),
                (row.reason.succeeded() as u8).to_string(),
                if row.object == NO_OBJECT {
                    String::new()
                } else {
                    row.object.to_string()
                },
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.name.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.carrying.to_string(),
                (row.is_busy as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.actions.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
