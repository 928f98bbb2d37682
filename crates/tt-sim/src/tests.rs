//! Integration tests for tt-sim.

use tt_agent::{Agent, AgentState};
use tt_core::{AgentId, GeoPoint, Minute, PoiId, Region, StopId};
use tt_flow::{BusRoute, FlowRecorder};
use tt_schedule::{PoiCategory, PointOfInterest, Schedule, Trip, TripPurpose};
use tt_spatial::BusStop;

use crate::{SimConfig, SimObserver, SimulationMetrics, StepOutcome};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Degrees of latitude per kilometre.
const DEG_PER_KM: f64 = 1.0 / 111.195;

fn test_config(agent_count: usize, total_minutes: u32) -> SimConfig {
    SimConfig {
        seed: 42,
        agent_count,
        total_minutes,
        snapshot_interval: 30,
        ..SimConfig::default()
    }
}

fn region() -> Region {
    SimConfig::default().region
}

/// 5 × 5 grid of stops spread over the default region.
fn grid_stops() -> Vec<BusStop> {
    let mut stops = Vec::new();
    for i in 0..5 {
        for j in 0..5 {
            let id = i * 5 + j + 1;
            let pos = GeoPoint::new(30.62 + f64::from(i) * 0.035, -88.20 + f64::from(j) * 0.045);
            stops.push(BusStop::new(StopId(id), format!("grid {i}-{j}"), pos));
        }
    }
    stops
}

fn city_pois() -> Vec<PointOfInterest> {
    use PoiCategory::*;
    [
        (Education, 30.64, -88.15),
        (Education, 30.74, -88.05),
        (Employment, 30.69, -88.10),
        (Employment, 30.70, -88.04),
        (Retail, 30.66, -88.08),
        (Healthcare, 30.72, -88.12),
        (Social, 30.68, -88.02),
        (Leisure, 30.63, -88.18),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(c, lat, lon))| {
        PointOfInterest::new(PoiId(i as u32), format!("poi {i}"), c, GeoPoint::new(lat, lon))
    })
    .collect()
}

/// Three stops due north of `base`, 1 km apart, ids 1..=3.
fn line_stops(base: GeoPoint) -> Vec<BusStop> {
    (0..3)
        .map(|i| {
            let pos = GeoPoint::new(base.lat + f64::from(i) * DEG_PER_KM, base.lon);
            BusStop::new(StopId(i + 1), format!("line {i}"), pos)
        })
        .collect()
}

fn base() -> GeoPoint {
    GeoPoint::new(30.69, -88.10)
}

fn commuter(id: u32, departure: u32, destination: GeoPoint) -> Agent {
    let trip = Trip { departure, destination, dwell: 120, purpose: TripPurpose::Employment };
    Agent::new(AgentId(id), 40, base(), Schedule::new(vec![trip]))
}

/// Counts every observer callback.
#[derive(Default)]
struct Recorder {
    starts:    u32,
    ends:      u32,
    skipped:   u32,
    snapshots: Vec<(Minute, SimulationMetrics)>,
    ended:     Option<(Minute, u64, usize)>,
    consistent: bool,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _minute: Minute) {
        self.starts += 1;
    }

    fn on_tick_end(&mut self, _minute: Minute, outcome: &StepOutcome) {
        self.ends += 1;
        if !outcome.is_advanced() {
            self.skipped += 1;
        }
    }

    fn on_snapshot(&mut self, minute: Minute, agents: &[Agent], metrics: &SimulationMetrics) {
        if self.snapshots.is_empty() {
            self.consistent = true;
        }
        self.consistent &= agents.iter().all(|a| a.stats.is_consistent());
        self.snapshots.push((minute, metrics.clone()));
    }

    fn on_sim_end(&mut self, final_minute: Minute, flow: &FlowRecorder, routes: &[BusRoute]) {
        self.ended = Some((final_minute, flow.total_hops(), routes.len()));
    }
}

// ── SimContext ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod context_tests {
    use tt_flow::SynthesisConfig;
    use tt_mobility::MobilityParams;
    use tt_spatial::{DijkstraRouter, PathResolver};

    use super::*;
    use crate::SimContext;

    fn snapshot(agents: &[Agent]) -> Vec<(GeoPoint, AgentState, usize, u32, u32)> {
        agents
            .iter()
            .map(|a| (a.pos, a.state, a.cursor, a.dwell, a.stats.total_minutes))
            .collect()
    }

    #[test]
    fn single_stop_network_leaves_agents_unchanged() {
        let mut ctx = SimContext::new(region(), MobilityParams::default());
        let mut agents = vec![commuter(0, 480, base()), commuter(1, 0, base())];
        let before = snapshot(&agents);
        let stops = &line_stops(base())[..1];

        let outcome = ctx.step_simulation(&mut agents, Minute(480), stops);

        assert_eq!(outcome, StepOutcome::InvalidNetwork { usable_stops: 1 });
        assert_eq!(snapshot(&agents), before);
        assert!(agents.iter().all(|a| a.mode.is_idle()));
        assert!(ctx.flow_edges().is_empty());
    }

    #[test]
    fn out_of_region_and_duplicate_stops_do_not_count() {
        let mut ctx = SimContext::new(region(), MobilityParams::default());
        let mut agents = vec![commuter(0, 0, base())];
        let mut stops = line_stops(base());
        stops[1].pos = GeoPoint::new(45.0, -88.1);
        stops[2].id = StopId(1);

        let outcome = ctx.step_simulation(&mut agents, Minute(0), &stops);
        assert_eq!(outcome, StepOutcome::InvalidNetwork { usable_stops: 1 });
        assert!(agents[0].mode.is_idle());
    }

    #[test]
    fn before_departure_agent_stays_home() {
        let mut ctx = SimContext::new(region(), MobilityParams::default());
        let mut agents = vec![commuter(0, 480, line_stops(base())[2].pos)];
        for m in 0..480 {
            ctx.step_simulation(&mut agents, Minute(m), &line_stops(base()));
        }
        assert_eq!(agents[0].pos, base());
        assert_eq!(agents[0].state, AgentState::AtHome);
    }

    #[test]
    fn graph_rebuilds_only_on_stop_change() {
        let mut ctx = SimContext::new(region(), MobilityParams::default());
        let mut agents: Vec<Agent> = Vec::new();
        let stops = line_stops(base());

        let first = ctx.step_simulation(&mut agents, Minute(0), &stops);
        let second = ctx.step_simulation(&mut agents, Minute(1), &stops);
        assert_eq!(first, StepOutcome::Advanced { agents: 0, graph_rebuilt: true });
        assert_eq!(second, StepOutcome::Advanced { agents: 0, graph_rebuilt: false });

        let fewer = &stops[..2];
        let third = ctx.step_simulation(&mut agents, Minute(2), fewer);
        assert_eq!(third, StepOutcome::Advanced { agents: 0, graph_rebuilt: true });
        assert_eq!(ctx.resolver().stats().rebuilds, 2);
    }

    /// Ten commuters ride stop 1 → 2 → 3 (k = 1 forces the middle stop).
    fn busy_line() -> (SimContext, Vec<BusStop>) {
        let resolver = PathResolver::with_router(DijkstraRouter, 1);
        let mut ctx = SimContext::with_resolver(region(), MobilityParams::default(), resolver);
        let stops = line_stops(base());
        let mut agents: Vec<Agent> = (0..10).map(|i| commuter(i, 480, stops[2].pos)).collect();
        for m in 480..540 {
            ctx.step_simulation(&mut agents, Minute(m), &stops);
        }
        assert!(agents.iter().all(|a| a.cursor == 1));
        (ctx, stops)
    }

    #[test]
    fn riders_accumulate_flow() {
        let (mut ctx, _) = busy_line();
        let edges = ctx.flow_edges();
        let counts: Vec<(u32, u32, u64)> = edges.iter().map(|e| (e.from.0, e.to.0, e.count)).collect();
        assert_eq!(counts, vec![(1, 2, 10), (2, 3, 10)]);
        assert_eq!(edges[0].peak_hour(), Some(8));

        ctx.clear_flow();
        assert!(ctx.flow_edges().is_empty());
    }

    #[test]
    fn corridor_from_simulated_flow() {
        let (mut ctx, stops) = busy_line();
        let cfg = SynthesisConfig { min_count: 5, top_edges: 10, max_routes: 1, ..Default::default() };

        let first = ctx.generate_routes_from_flow(&stops, &cfg);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].stops, vec![StopId(1), StopId(2), StopId(3)]);

        let second = ctx.generate_routes_from_flow(&stops, &cfg);
        assert_eq!(second[0].stops, first[0].stops);
        assert_ne!(second[0].id, first[0].id);
        assert_eq!(ctx.routes().len(), 2);

        ctx.clear_routes();
        assert!(ctx.routes().is_empty());
        assert!(!ctx.flow_edges().is_empty(), "clearing routes keeps flow");
    }

    #[test]
    fn no_demand_no_routes() {
        let mut ctx = SimContext::new(region(), MobilityParams::default());
        let routes = ctx.generate_routes_from_flow(&grid_stops(), &SynthesisConfig::default());
        assert!(routes.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let (mut ctx, stops) = busy_line();
        ctx.generate_routes_from_flow(&stops, &SynthesisConfig::default());
        ctx.reset();
        assert!(ctx.flow_edges().is_empty());
        assert!(ctx.routes().is_empty());
        assert!(ctx.resolver().graph().is_empty());
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics_tests {
    use super::*;
    use crate::calculate_metrics;

    #[test]
    fn empty_population_is_all_zero() {
        assert_eq!(calculate_metrics(&[]), SimulationMetrics::default());
    }

    #[test]
    fn counts_averages_and_rounding() {
        let mut agents: Vec<Agent> = (0..3).map(|i| commuter(i, 480, base())).collect();
        agents[0].age = 10;
        agents[1].age = 20;
        agents[2].age = 31;
        agents[1].state = AgentState::Riding;
        agents[2].state = AgentState::AtDestination;
        agents[0].stats.add_riding(1.0, 0.123);
        agents[1].stats.add_riding(1.0, 0.456);
        agents[1].stats.add_walking(0.333);

        let m = calculate_metrics(&agents);
        assert_eq!(m.total_agents, 3);
        assert_eq!(m.at_home, 1);
        assert_eq!(m.riding, 1);
        assert_eq!(m.at_destination, 1);
        assert_eq!(m.count(AgentState::Riding), 1);
        assert_eq!(m.travelling(), 1);
        assert_eq!(m.avg_age, 20.33);
        assert_eq!(m.avg_travel_minutes, 1.0);
        assert_eq!(m.avg_wait_minutes, 0.0);
        assert_eq!(m.total_carbon_kg, 0.58);
        assert_eq!(m.total_distance_km, 2.33);
    }

    #[test]
    fn state_counts_sum_to_population() {
        let mut agents: Vec<Agent> = (0..12).map(|i| commuter(i, 480, base())).collect();
        for (a, s) in agents.iter_mut().zip(AgentState::ALL.iter().cycle()) {
            a.state = *s;
        }
        let m = calculate_metrics(&agents);
        let sum: usize = AgentState::ALL.iter().map(|&s| m.count(s)).sum();
        assert_eq!(sum, 12);
        assert_eq!(m.waiting, 2);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod config_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn default_is_valid() {
        let c = SimConfig::default();
        c.validate().unwrap();
        assert_eq!(c.end_minute(), Minute(1_440));
        assert_eq!(c.make_clock().current, Minute(0));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c = SimConfig::from_json_str(
            r#"{ "seed": 7, "agent_count": 10, "synthesis": { "min_count": 9 } }"#,
        )
        .unwrap();
        assert_eq!(c.seed, 7);
        assert_eq!(c.agent_count, 10);
        assert_eq!(c.total_minutes, 1_440);
        assert_eq!(c.synthesis.min_count, 9);
        assert_eq!(c.synthesis.top_edges, 40);
        assert_eq!(c.mobility.walk_speed_kmh, 5.0);
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(SimConfig::from_json_str("{ seed: }"), Err(SimError::Config(_))));
    }

    #[test]
    fn inverted_region_rejected() {
        let json = r#"{ "region": { "min_lat": 31.0, "max_lat": 30.0, "min_lon": -88.2, "max_lon": -88.0 } }"#;
        assert!(matches!(
            SimConfig::from_json_str(json),
            Err(SimError::Core(tt_core::CoreError::InvalidRegion(_)))
        ));
    }

    #[test]
    fn overflowing_end_minute_rejected() {
        let c = SimConfig { start_minute: u32::MAX - 5, total_minutes: 10, ..SimConfig::default() };
        assert!(matches!(c.validate(), Err(SimError::Config(_))));

        let json = format!(r#"{{ "start_minute": {}, "total_minutes": 10 }}"#, u32::MAX - 5);
        assert!(SimConfig::from_json_str(&json).is_err());

        let edge = SimConfig { start_minute: u32::MAX - 10, total_minutes: 10, ..SimConfig::default() };
        edge.validate().unwrap();
        assert_eq!(edge.end_minute(), Minute(u32::MAX));
    }

    #[test]
    fn overflowing_config_never_reaches_the_driver() {
        let c = SimConfig { start_minute: u32::MAX - 5, total_minutes: 10, ..SimConfig::default() };
        assert!(crate::SimBuilder::new(c).build().is_err());
    }

    #[test]
    fn zero_length_run_rejected() {
        let c = SimConfig { total_minutes: 0, ..SimConfig::default() };
        assert!(matches!(c.validate(), Err(SimError::Config(_))));
    }

    #[test]
    fn non_positive_speed_rejected() {
        let mut c = SimConfig::default();
        c.mobility.transit_speed_kmh = -1.0;
        assert!(matches!(c.validate(), Err(SimError::Config(_))));
    }

    #[test]
    fn json_round_trip_keeps_values() {
        let c = test_config(12, 90);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), c);
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use tt_core::SimRng;

    use super::*;
    use crate::{SimBuilder, SimError};

    #[test]
    fn builds_population_inside_region() {
        let sim = SimBuilder::new(test_config(40, 60))
            .stops(grid_stops())
            .pois(city_pois())
            .build()
            .unwrap();
        assert_eq!(sim.agents.len(), 40);
        assert!(sim.agents.iter().all(|a| region().contains(a.home)));
        assert_eq!(sim.now(), Minute(0));
    }

    #[test]
    fn agent_count_mismatch_errors() {
        let err = SimBuilder::new(test_config(3, 60))
            .agents(vec![commuter(0, 480, base())])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::AgentCountMismatch { expected: 3, got: 1, .. }));
    }

    #[test]
    fn invalid_config_errors() {
        let err = SimBuilder::new(test_config(3, 0)).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn custom_sampler_places_homes() {
        let mut at_base = |_: &mut SimRng| base();
        let sim = SimBuilder::new(test_config(5, 60))
            .pois(city_pois())
            .build_with(&mut at_base)
            .unwrap();
        assert!(sim.agents.iter().all(|a| a.home == base()));
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::{NoopObserver, Sim, SimBuilder};

    fn day_sim(agents: usize) -> Sim {
        SimBuilder::new(test_config(agents, 1_440))
            .stops(grid_stops())
            .pois(city_pois())
            .build()
            .unwrap()
    }

    #[test]
    fn run_reaches_end_and_reports() {
        let mut sim = day_sim(30);
        let mut obs = Recorder::default();
        sim.run(&mut obs);

        assert_eq!(sim.now(), Minute(1_440));
        assert_eq!(obs.starts, 1_440);
        assert_eq!(obs.ends, 1_440);
        assert_eq!(obs.skipped, 0);
        assert_eq!(obs.snapshots.len(), 48);
        assert!(obs.consistent);
        let (end, hops, _) = obs.ended.unwrap();
        assert_eq!(end, Minute(1_440));
        assert_eq!(hops, sim.context.flow().total_hops());
    }

    #[test]
    fn population_travels_during_the_day() {
        let mut sim = day_sim(60);
        sim.run(&mut NoopObserver);
        let m = sim.metrics();
        assert!(m.total_distance_km > 0.0);
        assert!(m.avg_travel_minutes > 0.0);
        assert_eq!(m.waiting, 0);
        assert_eq!(m.avg_wait_minutes, 0.0);
        assert!(sim.agents.iter().all(|a| a.stats.is_consistent()));
        assert!(sim.agents.iter().all(|a| region().contains(a.pos)));
    }

    #[test]
    fn same_seed_same_day() {
        let mut a = day_sim(25);
        let mut b = day_sim(25);
        a.run(&mut NoopObserver);
        b.run(&mut NoopObserver);
        assert_eq!(a.context.flow_edges(), b.context.flow_edges());
        assert_eq!(a.metrics(), b.metrics());
        let stops = |s: &Sim| s.context.routes().iter().map(|r| r.stops.clone()).collect::<Vec<_>>();
        assert_eq!(stops(&a), stops(&b));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = day_sim(5);
        sim.run_ticks(90, &mut NoopObserver);
        assert_eq!(sim.now(), Minute(90));
        assert!(sim.context.routes().is_empty());
    }

    #[test]
    fn no_stops_skips_every_tick() {
        let mut sim = SimBuilder::new(test_config(5, 600)).pois(city_pois()).build().unwrap();
        let homes: Vec<GeoPoint> = sim.agents.iter().map(|a| a.pos).collect();
        let mut obs = Recorder::default();
        sim.run(&mut obs);
        assert_eq!(obs.skipped, 600);
        let after: Vec<GeoPoint> = sim.agents.iter().map(|a| a.pos).collect();
        assert_eq!(homes, after);
    }

    #[test]
    fn reset_rewinds() {
        let mut sim = day_sim(20);
        sim.run_ticks(600, &mut NoopObserver);
        sim.reset();
        assert_eq!(sim.now(), Minute(0));
        assert!(sim.context.flow_edges().is_empty());
        for a in &sim.agents {
            assert_eq!(a.pos, a.home);
            assert_eq!(a.cursor, 0);
            assert_eq!(a.stats.total_minutes, 0);
        }
    }

    #[test]
    fn stop_change_mid_run_rebuilds() {
        let mut sim = day_sim(10);
        sim.run_ticks(10, &mut NoopObserver);
        let mut fewer = grid_stops();
        fewer.truncate(20);
        sim.set_stops(fewer);
        let outcome = sim.tick(&mut NoopObserver);
        assert_eq!(outcome, StepOutcome::Advanced { agents: 10, graph_rebuilt: true });
        assert_eq!(sim.network().len(), 20);
    }

    #[test]
    fn stop_set_is_sanitised_once() {
        let mut stops = grid_stops();
        stops.push(BusStop::new(StopId(99), "far away", GeoPoint::new(45.0, -88.1)));
        stops.push(stops[0].clone());
        let mut sim = SimBuilder::new(test_config(5, 60))
            .stops(stops)
            .pois(city_pois())
            .build()
            .unwrap();
        assert_eq!(sim.stops().len(), 27);
        assert_eq!(sim.network().len(), 25);

        let first = sim.tick(&mut NoopObserver);
        let second = sim.tick(&mut NoopObserver);
        assert_eq!(first, StepOutcome::Advanced { agents: 5, graph_rebuilt: true });
        assert_eq!(second, StepOutcome::Advanced { agents: 5, graph_rebuilt: false });

        sim.set_stops(vec![BusStop::new(StopId(1), "lonely", base())]);
        assert_eq!(sim.tick(&mut NoopObserver), StepOutcome::InvalidNetwork { usable_stops: 1 });
    }
}
