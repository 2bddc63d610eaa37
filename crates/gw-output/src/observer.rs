//! `WorldOutputObserver<W>` — bridges `WorldObserver` to an `OutputWriter`.

use gw_action::ActionResult;
use gw_core::{ActionKind, ObjectId, Tick};
use gw_sim::WorldObserver;
use gw_world::SpatialRegistry;

use crate::OutputError;
use crate::row::{ActionTraceRow, AgentSnapshotRow, NO_OBJECT};
use crate::writer::OutputWriter;

/// A [`WorldObserver`] that writes the action trace and per-tick agent
/// snapshots to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `WorldObserver`
/// methods have no return value.  After `world.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct WorldOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<ActionTraceRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> WorldOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `world.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> WorldObserver for WorldOutputObserver<W> {
    fn on_action(
        &mut self,
        tick: Tick,
        agent: ObjectId,
        kind: Option<ActionKind>,
        result: &ActionResult,
    ) {
        self.pending.push(ActionTraceRow {
            tick: tick.0,
            agent_id: agent.0,
            action: kind,
            reason: result.reason,
            object: result.object.map_or(NO_OBJECT, |id| id.0),
        });
    }

    fn on_tick_end(&mut self, tick: Tick, registry: &SpatialRegistry) {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            let result = self.writer.write_actions(&pending);
            self.store_err(result);
        }

        let rows: Vec<AgentSnapshotRow> = registry
            .agents()
            .map(|body| AgentSnapshotRow {
                tick: tick.0,
                agent_id: body.id.0,
                name: body.name.clone(),
                x: body.location.x,
                y: body.location.y,
                carrying: body.carry_count() as u64,
                is_busy: !body.busy.is_idle(),
            })
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_world_done(&mut self, _tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
