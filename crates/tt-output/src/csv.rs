//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `metrics.csv`
//! - `flow_edges.csv`
//! - `routes.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, FlowEdgeRow, MetricsRow, OutputResult, RouteStopRow};

/// Writes simulation output to four CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    metrics:   Writer<File>,
    flow:      Writer<File>,
    routes:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "minute", "agent_id", "lat", "lon", "state", "mode", "trips_done",
            "walking_minutes", "riding_minutes", "waiting_minutes", "distance_km", "carbon_kg",
        ])?;

        let mut metrics = Writer::from_path(dir.join("metrics.csv"))?;
        metrics.write_record([
            "minute", "total_agents", "at_home", "walking_to_stop", "waiting", "riding",
            "walking_to_dest", "at_destination", "avg_age", "avg_travel_minutes",
            "avg_wait_minutes", "total_carbon_kg", "total_distance_km",
        ])?;

        let mut flow = Writer::from_path(dir.join("flow_edges.csv"))?;
        flow.write_record(["from_stop", "to_stop", "count", "peak_hour", "hourly"])?;

        let mut routes = Writer::from_path(dir.join("routes.csv"))?;
        routes.write_record(["route_id", "name", "color", "seq", "stop_id", "lat", "lon"])?;

        Ok(Self { snapshots, metrics, flow, routes, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.minute.to_string(),
                row.agent_id.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
                row.state.to_string(),
                row.mode.to_string(),
                row.trips_done.to_string(),
                row.walking_minutes.to_string(),
                row.riding_minutes.to_string(),
                row.waiting_minutes.to_string(),
                row.distance_km.to_string(),
                row.carbon_kg.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        let m = &row.metrics;
        self.metrics.write_record(&[
            row.minute.to_string(),
            m.total_agents.to_string(),
            m.at_home.to_string(),
            m.walking_to_stop.to_string(),
            m.waiting.to_string(),
            m.riding.to_string(),
            m.walking_to_dest.to_string(),
            m.at_destination.to_string(),
            m.avg_age.to_string(),
            m.avg_travel_minutes.to_string(),
            m.avg_wait_minutes.to_string(),
            m.total_carbon_kg.to_string(),
            m.total_distance_km.to_string(),
        ])?;
        Ok(())
    }

    fn write_flow(&mut self, rows: &[FlowEdgeRow]) -> OutputResult<()> {
        for row in rows {
            self.flow.write_record(&[
                row.from_stop.to_string(),
                row.to_stop.to_string(),
                row.count.to_string(),
                row.peak_hour.map(|h| h.to_string()).unwrap_or_default(),
                row.hourly_joined(),
            ])?;
        }
        Ok(())
    }

    fn write_routes(&mut self, rows: &[RouteStopRow]) -> OutputResult<()> {
        for row in rows {
            self.routes.write_record(&[
                row.route_id.clone(),
                row.name.clone(),
                row.color.clone(),
                row.seq.to_string(),
                row.stop_id.to_string(),
                row.lat.to_string(),
                row.lon.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.metrics.flush()?;
        self.flow.flush()?;
        self.routes.flush()?;
        Ok(())
    }
}
