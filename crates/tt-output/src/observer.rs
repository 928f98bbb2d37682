//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use tt_agent::Agent;
use tt_core::Minute;
use tt_flow::{BusRoute, FlowRecorder};
use tt_sim::{SimObserver, SimulationMetrics};

use crate::row::{AgentSnapshotRow, FlowEdgeRow, MetricsRow, RouteStopRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes snapshots, metrics, flow edges and
/// synthesized corridors to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_snapshot(&mut self, minute: Minute, agents: &[Agent], metrics: &SimulationMetrics) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|a| AgentSnapshotRow::from_agent(minute, a))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }

        let row = MetricsRow { minute: minute.0, metrics: metrics.clone() };
        let result = self.writer.write_metrics(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_minute: Minute, flow: &FlowRecorder, routes: &[BusRoute]) {
        let edges: Vec<FlowEdgeRow> = flow.iter().map(FlowEdgeRow::from).collect();
        let result = self.writer.write_flow(&edges);
        self.store_err(result);

        let stops: Vec<RouteStopRow> = routes.iter().flat_map(RouteStopRow::from_route).collect();
        let result = self.writer.write_routes(&stops);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
