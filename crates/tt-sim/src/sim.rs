//! The `Sim` struct and its minute loop.

use tracing::info;

use tt_agent::Agent;
use tt_core::{Minute, SimClock};
use tt_flow::BusRoute;
use tt_spatial::{BusStop, DijkstraRouter, Router, StopNetwork};

use crate::{SimConfig, SimContext, SimObserver, SimulationMetrics, StepOutcome, calculate_metrics};

/// The simulation driver.
///
/// `Sim` owns the population, the current stop set and the
/// [`SimContext`], and advances them one minute per tick:
///
/// 1. `on_tick_start`
/// 2. [`SimContext::step_simulation`] over every agent
/// 3. `on_tick_end`, then `on_snapshot` on snapshot minutes
/// 4. clock advance
///
/// After the last minute, [`run`](Self::run) synthesizes corridors from the
/// day's flow and calls `on_sim_end`.  Pausing is simply not calling the
/// next tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router = DijkstraRouter> {
    pub config:  SimConfig,
    pub clock:   SimClock,
    pub agents:  Vec<Agent>,
    pub context: SimContext<R>,
    /// Stop set as supplied.  Replace with [`set_stops`](Self::set_stops)
    /// between ticks to model network changes.
    pub(crate) stops:   Vec<BusStop>,
    /// `stops` filtered to the region, refreshed only by `set_stops`.
    pub(crate) network: StopNetwork,
}

impl<R: Router> Sim<R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current minute to `config.end_minute()`, then synthesize
    /// corridors from the recorded flow.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        let end = self.config.end_minute();
        while self.clock.current < end {
            self.tick(observer);
        }
        let routes = self.synthesize_routes();
        info!(
            minute = %self.clock.current,
            agents = self.agents.len(),
            hops = self.context.flow().total_hops(),
            corridors = routes.len(),
            "simulation finished"
        );
        observer.on_sim_end(self.clock.current, self.context.flow(), &routes);
    }

    /// Run exactly `n` minutes from the current position (ignores the end
    /// minute and does not synthesize corridors).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u32, observer: &mut O) {
        for _ in 0..n {
            self.tick(observer);
        }
    }

    /// Advance one minute.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> StepOutcome {
        let now = self.clock.current;
        observer.on_tick_start(now);

        let outcome = self.context.step_network(&mut self.agents, now, &self.network);
        observer.on_tick_end(now, &outcome);

        let interval = self.config.snapshot_interval;
        if interval > 0 && self.clock.elapsed().is_multiple_of(interval) {
            observer.on_snapshot(now, &self.agents, &calculate_metrics(&self.agents));
        }

        self.clock.advance();
        outcome
    }

    pub fn now(&self) -> Minute {
        self.clock.current
    }

    pub fn metrics(&self) -> SimulationMetrics {
        calculate_metrics(&self.agents)
    }

    /// Replace the stop set used from the next tick on.
    pub fn set_stops(&mut self, stops: Vec<BusStop>) {
        self.network = self.context.prepare_network(&stops);
        self.stops = stops;
    }

    pub fn stops(&self) -> &[BusStop] {
        &self.stops
    }

    /// The sanitised snapshot every tick steps against.
    pub fn network(&self) -> &StopNetwork {
        &self.network
    }

    /// Synthesize corridors from the flow so far using `config.synthesis`.
    pub fn synthesize_routes(&mut self) -> Vec<BusRoute> {
        let synthesis = self.config.synthesis;
        self.context.generate_routes_from_flow(&self.stops, &synthesis)
    }

    /// Rewind to the start: every agent back home with its original schedule,
    /// the clock at the start minute, and the context cleared.
    pub fn reset(&mut self) {
        for agent in &mut self.agents {
            agent.reset();
        }
        self.clock.reset();
        self.context.reset();
    }
}
