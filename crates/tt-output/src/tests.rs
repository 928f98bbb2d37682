//! Integration tests for tt-output.

#[cfg(test)]
mod fixtures {
    use tempfile::TempDir;
    use tt_agent::Agent;
    use tt_core::{AgentId, GeoPoint, StopId};
    use tt_schedule::{Schedule, Trip, TripPurpose};
    use tt_sim::{Sim, SimBuilder, SimConfig};
    use tt_spatial::{BusStop, DijkstraRouter, PathResolver};

    use crate::row::{AgentSnapshotRow, FlowEdgeRow, RouteStopRow};

    /// Degrees of latitude per kilometre.
    const DEG_PER_KM: f64 = 1.0 / 111.195;

    pub fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    pub fn snap_row(agent_id: u32, minute: u32) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            minute,
            lat:             30.69,
            lon:             -88.10,
            state:           "riding",
            mode:            "transit",
            trips_done:      1,
            walking_minutes: 4,
            riding_minutes:  6,
            waiting_minutes: 0,
            distance_km:     2.75,
            carbon_kg:       0.2,
        }
    }

    pub fn flow_row() -> FlowEdgeRow {
        let mut hourly = [0; 24];
        hourly[8] = 7;
        hourly[17] = 3;
        FlowEdgeRow { from_stop: 1, to_stop: 2, count: 10, peak_hour: Some(8), hourly }
    }

    pub fn route_rows() -> Vec<RouteStopRow> {
        (0..3)
            .map(|i| RouteStopRow {
                route_id: "route-1".into(),
                name:     "line 0 - line 2".into(),
                color:    "#e6194b".into(),
                seq:      i,
                stop_id:  i + 1,
                lat:      30.69 + f64::from(i) * DEG_PER_KM,
                lon:      -88.10,
            })
            .collect()
    }

    /// Ten commuters riding three stops north at 08:00 over a 600-minute run
    /// with a snapshot every two hours.
    pub fn commuter_sim() -> Sim {
        let base = GeoPoint::new(30.69, -88.10);
        let stops: Vec<BusStop> = (0..3)
            .map(|i| {
                let pos = GeoPoint::new(base.lat + f64::from(i) * DEG_PER_KM, base.lon);
                BusStop::new(StopId(i + 1), format!("line {i}"), pos)
            })
            .collect();
        let dest = stops[2].pos;
        let agents: Vec<Agent> = (0..10)
            .map(|i| {
                let trip = Trip { departure: 480, destination: dest, dwell: 120, purpose: TripPurpose::Employment };
                Agent::new(AgentId(i), 40, base, Schedule::new(vec![trip]))
            })
            .collect();

        let config = SimConfig {
            agent_count:       10,
            total_minutes:     600,
            snapshot_interval: 120,
            ..SimConfig::default()
        };
        SimBuilder::new(config)
            .stops(stops)
            .agents(agents)
            .resolver(PathResolver::with_router(DijkstraRouter, 1))
            .build()
            .unwrap()
    }
}

#[cfg(test)]
mod row_tests {
    use tt_agent::Agent;
    use tt_core::{AgentId, GeoPoint, Minute, StopId};
    use tt_flow::{BusRoute, FlowEdge};
    use tt_schedule::Schedule;

    use crate::row::{AgentSnapshotRow, FlowEdgeRow, RouteStopRow};

    #[test]
    fn snapshot_copies_agent_fields() {
        let mut agent = Agent::new(AgentId(7), 33, GeoPoint::new(30.7, -88.1), Schedule::empty());
        agent.stats.add_walking(0.5);
        let row = AgentSnapshotRow::from_agent(Minute(90), &agent);
        assert_eq!(row.agent_id, 7);
        assert_eq!(row.minute, 90);
        assert_eq!(row.state, "at_home");
        assert_eq!(row.mode, "idle");
        assert_eq!(row.walking_minutes, 1);
        assert_eq!(row.distance_km, 0.5);
    }

    #[test]
    fn unused_edge_has_no_peak() {
        let row = FlowEdgeRow::from(&FlowEdge::new(StopId(1), StopId(2)));
        assert_eq!(row.count, 0);
        assert_eq!(row.peak_hour, None);
        assert_eq!(row.hourly_joined(), vec!["0"; 24].join(";"));
    }

    #[test]
    fn route_expands_to_one_row_per_stop() {
        let route = BusRoute {
            id:       "route-4".into(),
            name:     "a - c".into(),
            color:    "#3cb44b".into(),
            stops:    vec![StopId(3), StopId(9), StopId(5)],
            geometry: vec![GeoPoint::new(30.6, -88.0), GeoPoint::new(30.7, -88.0), GeoPoint::new(30.8, -88.0)],
        };
        let rows = RouteStopRow::from_route(&route);
        let seq: Vec<(u32, u32)> = rows.iter().map(|r| (r.seq, r.stop_id)).collect();
        assert_eq!(seq, vec![(0, 3), (1, 9), (2, 5)]);
        assert!(rows.iter().all(|r| r.route_id == "route-4"));
    }
}

#[cfg(test)]
mod csv_tests {
    use tt_sim::SimulationMetrics;

    use super::fixtures::{flow_row, route_rows, snap_row, tmp};
    use crate::csv::CsvWriter;
    use crate::row::MetricsRow;
    use crate::writer::OutputWriter;

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        for name in ["agent_snapshots.csv", "metrics.csv", "flow_edges.csv", "routes.csv"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(headers(&dir.path().join("flow_edges.csv")), ["from_stop", "to_stop", "count", "peak_hour", "hourly"]);
        assert_eq!(
            headers(&dir.path().join("routes.csv")),
            ["route_id", "name", "color", "seq", "stop_id", "lat", "lon"]
        );
        let snap = headers(&dir.path().join("agent_snapshots.csv"));
        assert_eq!(snap.len(), 12);
        assert_eq!(&snap[..3], ["minute", "agent_id", "lat"]);
        assert_eq!(headers(&dir.path().join("metrics.csv")).len(), 13);
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 60), snap_row(1, 60), snap_row(2, 60)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "60"); // minute
        assert_eq!(&rows[2][1], "2"); // agent_id
        assert_eq!(&rows[1][4], "riding");
        assert_eq!(&rows[1][10], "2.75");
    }

    #[test]
    fn csv_metrics_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let metrics = SimulationMetrics { total_agents: 12, riding: 5, avg_age: 41.25, ..Default::default() };
        w.write_metrics(&MetricsRow { minute: 480, metrics }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("metrics.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "480");
        assert_eq!(&rows[0][1], "12");
        assert_eq!(&rows[0][5], "5");
        assert_eq!(&rows[0][8], "41.25");
    }

    #[test]
    fn csv_flow_and_routes() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let mut unused = flow_row();
        unused.count = 0;
        unused.peak_hour = None;
        unused.hourly = [0; 24];
        w.write_flow(&[flow_row(), unused]).unwrap();
        w.write_routes(&route_rows()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("flow_edges.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][3], "8");
        assert_eq!(rows[0][4].split(';').count(), 24);
        assert_eq!(rows[0][4].split(';').nth(17), Some("3"));
        assert_eq!(&rows[1][3], "", "no peak is written as an empty field");

        let mut rdr = csv::Reader::from_path(dir.path().join("routes.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[2][3], "2");
        assert_eq!(&rows[2][4], "3");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batches_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
        w.write_flow(&[]).unwrap();
        w.write_routes(&[]).unwrap();
    }

    #[test]
    fn missing_dir_is_io_error() {
        let dir = tmp();
        let err = CsvWriter::new(&dir.path().join("nope")).err().unwrap();
        assert!(matches!(err, crate::OutputError::Csv(_) | crate::OutputError::Io(_)));
    }
}

#[cfg(test)]
mod observer_tests {
    use super::fixtures::{commuter_sim, tmp};
    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    fn records(path: std::path::PathBuf) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn integration_csv() {
        let mut sim = commuter_sim();
        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none(), "no write errors expected");

        // Snapshots at elapsed 0, 120, 240, 360, 480: 5 × 10 agents.
        let snaps = records(dir.path().join("agent_snapshots.csv"));
        assert_eq!(snaps.len(), 50);

        let metrics = records(dir.path().join("metrics.csv"));
        let minutes: Vec<&str> = metrics.iter().map(|r| r.get(0).unwrap()).collect();
        assert_eq!(minutes, ["0", "120", "240", "360", "480"]);

        let flow = records(dir.path().join("flow_edges.csv"));
        let edges: Vec<(&str, &str, &str)> =
            flow.iter().map(|r| (&r[0], &r[1], &r[2])).collect();
        assert_eq!(edges, vec![("1", "2", "10"), ("2", "3", "10")]);

        let routes = records(dir.path().join("routes.csv"));
        let stops: Vec<&str> = routes.iter().map(|r| r.get(4).unwrap()).collect();
        assert_eq!(stops, ["1", "2", "3"]);
    }

    #[test]
    fn into_writer_after_run() {
        let mut sim = commuter_sim();
        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run_ticks(10, &mut obs);
        let mut writer = obs.into_writer();
        crate::writer::OutputWriter::finish(&mut writer).unwrap();
        assert_eq!(records(dir.path().join("agent_snapshots.csv")).len(), 10);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tt_sim::SimulationMetrics;

    use super::fixtures::{commuter_sim, flow_row, route_rows, snap_row, tmp};
    use crate::observer::SimOutputObserver;
    use crate::row::MetricsRow;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn count(dir: &std::path::Path, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(dir.join("output.db")).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 1), snap_row(1, 1), snap_row(2, 1)]).unwrap();
        w.finish().unwrap();
        assert_eq!(count(dir.path(), "agent_snapshots"), 3);
    }

    #[test]
    fn sqlite_metrics_row() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let metrics = SimulationMetrics { total_agents: 3, at_home: 2, total_carbon_kg: 0.18, ..Default::default() };
        w.write_metrics(&MetricsRow { minute: 60, metrics }).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (home, carbon): (i64, f64) = conn
            .query_row("SELECT at_home, total_carbon_kg FROM metrics WHERE minute = 60", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(home, 2);
        assert_eq!(carbon, 0.18);
    }

    #[test]
    fn sqlite_null_peak_hour() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let mut unused = flow_row();
        unused.to_stop = 3;
        unused.peak_hour = None;
        w.write_flow(&[flow_row(), unused]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let peak: Option<i64> = conn
            .query_row("SELECT peak_hour FROM flow_edges WHERE to_stop = 3", [], |r| r.get(0))
            .unwrap();
        assert_eq!(peak, None);
        assert_eq!(count(dir.path(), "flow_edges"), 2);
    }

    #[test]
    fn sqlite_routes() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_routes(&route_rows()).unwrap();
        w.finish().unwrap();
        assert_eq!(count(dir.path(), "routes"), 3);
    }

    #[test]
    fn integration_sqlite() {
        let mut sim = commuter_sim();
        let dir = tmp();
        let mut obs = SimOutputObserver::new(SqliteWriter::new(dir.path()).unwrap());
        sim.run(&mut obs);
        assert!(obs.take_error().is_none());
        drop(obs);

        assert_eq!(count(dir.path(), "agent_snapshots"), 50);
        assert_eq!(count(dir.path(), "metrics"), 5);
        assert_eq!(count(dir.path(), "flow_edges"), 2);
        assert_eq!(count(dir.path(), "routes"), 3);
    }
}
