//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables: `agent_snapshots`, `metrics`, `flow_edges` and `routes`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, FlowEdgeRow, MetricsRow, OutputResult, RouteStopRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 minute          INTEGER NOT NULL,
                 agent_id        INTEGER NOT NULL,
                 lat             REAL    NOT NULL,
                 lon             REAL    NOT NULL,
                 state           TEXT    NOT NULL,
                 mode            TEXT    NOT NULL,
                 trips_done      INTEGER NOT NULL,
                 walking_minutes INTEGER NOT NULL,
                 riding_minutes  INTEGER NOT NULL,
                 waiting_minutes INTEGER NOT NULL,
                 distance_km     REAL    NOT NULL,
                 carbon_kg       REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS metrics (
                 minute             INTEGER PRIMARY KEY,
                 total_agents       INTEGER NOT NULL,
                 at_home            INTEGER NOT NULL,
                 walking_to_stop    INTEGER NOT NULL,
                 waiting            INTEGER NOT NULL,
                 riding             INTEGER NOT NULL,
                 walking_to_dest    INTEGER NOT NULL,
                 at_destination     INTEGER NOT NULL,
                 avg_age            REAL    NOT NULL,
                 avg_travel_minutes REAL    NOT NULL,
                 avg_wait_minutes   REAL    NOT NULL,
                 total_carbon_kg    REAL    NOT NULL,
                 total_distance_km  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS flow_edges (
                 from_stop INTEGER NOT NULL,
                 to_stop   INTEGER NOT NULL,
                 count     INTEGER NOT NULL,
                 peak_hour INTEGER,
                 hourly    TEXT    NOT NULL,
                 PRIMARY KEY (from_stop, to_stop)
             );
             CREATE TABLE IF NOT EXISTS routes (
                 route_id TEXT    NOT NULL,
                 name     TEXT    NOT NULL,
                 color    TEXT    NOT NULL,
                 seq      INTEGER NOT NULL,
                 stop_id  INTEGER NOT NULL,
                 lat      REAL    NOT NULL,
                 lon      REAL    NOT NULL,
                 PRIMARY KEY (route_id, seq)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (minute, agent_id, lat, lon, state, mode, trips_done, \
                  walking_minutes, riding_minutes, waiting_minutes, distance_km, carbon_kg) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.minute,
                    row.agent_id,
                    row.lat,
                    row.lon,
                    row.state,
                    row.mode,
                    row.trips_done,
                    row.walking_minutes,
                    row.riding_minutes,
                    row.waiting_minutes,
                    row.distance_km,
                    row.carbon_kg,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        let m = &row.metrics;
        self.conn.execute(
            "INSERT INTO metrics \
             (minute, total_agents, at_home, walking_to_stop, waiting, riding, \
              walking_to_dest, at_destination, avg_age, avg_travel_minutes, \
              avg_wait_minutes, total_carbon_kg, total_distance_km) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            rusqlite::params![
                row.minute,
                m.total_agents as i64,
                m.at_home as i64,
                m.walking_to_stop as i64,
                m.waiting as i64,
                m.riding as i64,
                m.walking_to_dest as i64,
                m.at_destination as i64,
                m.avg_age,
                m.avg_travel_minutes,
                m.avg_wait_minutes,
                m.total_carbon_kg,
                m.total_distance_km,
            ],
        )?;
        Ok(())
    }

    fn write_flow(&mut self, rows: &[FlowEdgeRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO flow_edges (from_stop, to_stop, count, peak_hour, hourly) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.from_stop,
                    row.to_stop,
                    row.count as i64,
                    row.peak_hour,
                    row.hourly_joined(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_routes(&mut self, rows: &[RouteStopRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO routes (route_id, name, color, seq, stop_id, lat, lon) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.route_id,
                    row.name,
                    row.color,
                    row.seq,
                    row.stop_id,
                    row.lat,
                    row.lon,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
