//! Plain data row types written by output backends.

use tt_agent::Agent;
use tt_core::{HOURS_PER_DAY, Minute};
use tt_flow::{BusRoute, FlowEdge};
use tt_sim::SimulationMetrics;

/// One agent's state at a snapshot minute.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:        u32,
    pub minute:          u32,
    pub lat:             f64,
    pub lon:             f64,
    pub state:           &'static str,
    pub mode:            &'static str,
    /// Trips completed so far.
    pub trips_done:      u32,
    pub walking_minutes: u32,
    pub riding_minutes:  u32,
    pub waiting_minutes: u32,
    pub distance_km:     f64,
    pub carbon_kg:       f64,
}

impl AgentSnapshotRow {
    pub fn from_agent(minute: Minute, agent: &Agent) -> Self {
        Self {
            agent_id:        agent.id.0,
            minute:          minute.0,
            lat:             agent.pos.lat,
            lon:             agent.pos.lon,
            state:           agent.state.as_str(),
            mode:            agent.mode.as_str(),
            trips_done:      agent.cursor as u32,
            walking_minutes: agent.stats.walking_minutes,
            riding_minutes:  agent.stats.riding_minutes,
            waiting_minutes: agent.stats.waiting_minutes,
            distance_km:     agent.stats.distance_km,
            carbon_kg:       agent.stats.carbon_kg,
        }
    }
}

/// Population metrics at a snapshot minute.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub minute:  u32,
    pub metrics: SimulationMetrics,
}

/// One directed flow edge.  `hourly` holds the 24 bucket counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowEdgeRow {
    pub from_stop: u32,
    pub to_stop:   u32,
    pub count:     u64,
    /// `None` for an edge that was never used.
    pub peak_hour: Option<u8>,
    pub hourly:    [u64; HOURS_PER_DAY],
}

impl FlowEdgeRow {
    /// Bucket counts joined with `;`, used by both backends.
    pub fn hourly_joined(&self) -> String {
        self.hourly
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl From<&FlowEdge> for FlowEdgeRow {
    fn from(e: &FlowEdge) -> Self {
        Self {
            from_stop: e.from.0,
            to_stop:   e.to.0,
            count:     e.count,
            peak_hour: e.peak_hour().map(|h| h as u8),
            hourly:    e.hourly,
        }
    }
}

/// One stop of one synthesized corridor.  A route with `n` stops is `n` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStopRow {
    pub route_id: String,
    pub name:     String,
    pub color:    String,
    pub seq:      u32,
    pub stop_id:  u32,
    pub lat:      f64,
    pub lon:      f64,
}

impl RouteStopRow {
    pub fn from_route(route: &BusRoute) -> Vec<Self> {
        route
            .stops
            .iter()
            .zip(&route.geometry)
            .enumerate()
            .map(|(i, (stop, pos))| Self {
                route_id: route.id.clone(),
                name:     route.name.clone(),
                color:    route.color.clone(),
                seq:      i as u32,
                stop_id:  stop.0,
                lat:      pos.lat,
                lon:      pos.lon,
            })
            .collect()
    }
}
