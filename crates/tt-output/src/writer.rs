//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentSnapshotRow, FlowEdgeRow, MetricsRow, OutputResult, RouteStopRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// The observer never propagates these errors.  It keeps the first one,
/// retrievable with
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one metrics row.
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()>;

    /// Write the day's flow edges.
    fn write_flow(&mut self, rows: &[FlowEdgeRow]) -> OutputResult<()>;

    /// Write synthesized corridors, one row per stop.
    fn write_routes(&mut self, rows: &[RouteStopRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
