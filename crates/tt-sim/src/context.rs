//! The per-simulation context every core operation runs against.
//!
//! `SimContext` owns the state that outlives a single tick: the path
//! resolver (graph + memoized paths), the flow recorder and the corridors
//! synthesized so far.  One context belongs to one simulation; it is created
//! at start and cleared by [`reset`](SimContext::reset).

use tracing::{debug, warn};

use tt_agent::Agent;
use tt_core::{Minute, Region};
use tt_flow::{BusRoute, FlowEdge, FlowRecorder, SynthesisConfig, synthesize};
use tt_mobility::{AgentStepper, MobilityParams};
use tt_spatial::{BusStop, DijkstraRouter, PathResolver, Router, StopNetwork};

/// What one call to [`SimContext::step_simulation`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Every agent was advanced one minute.
    Advanced {
        agents:        usize,
        /// The stop set changed and the graph was rebuilt before stepping.
        graph_rebuilt: bool,
    },
    /// Fewer than two usable stops; no agent was touched.
    InvalidNetwork { usable_stops: usize },
}

impl StepOutcome {
    pub fn is_advanced(&self) -> bool {
        matches!(self, StepOutcome::Advanced { .. })
    }
}

pub struct SimContext<R: Router = DijkstraRouter> {
    region:    Region,
    params:    MobilityParams,
    resolver:  PathResolver<R>,
    flow:      FlowRecorder,
    routes:    Vec<BusRoute>,
    route_seq: u64,
}

impl SimContext<DijkstraRouter> {
    pub fn new(region: Region, params: MobilityParams) -> Self {
        Self::with_resolver(region, params, PathResolver::new())
    }
}

impl<R: Router> SimContext<R> {
    pub fn with_resolver(region: Region, params: MobilityParams, resolver: PathResolver<R>) -> Self {
        Self {
            region,
            params,
            resolver,
            flow: FlowRecorder::new(),
            routes: Vec::new(),
            route_seq: 0,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn params(&self) -> &MobilityParams {
        &self.params
    }

    pub fn resolver(&self) -> &PathResolver<R> {
        &self.resolver
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance every agent by exactly one minute.
    ///
    /// `stops` is filtered to the region and deduplicated first.  With fewer
    /// than two stops left the agents are returned untouched.  A changed
    /// stop set rebuilds the graph and drops memoized paths; agents already
    /// riding keep the path they boarded.
    pub fn step_simulation(
        &mut self,
        agents: &mut [Agent],
        minute: Minute,
        stops:  &[BusStop],
    ) -> StepOutcome {
        let network = self.prepare_network(stops);
        self.step_network(agents, minute, &network)
    }

    /// The region-filtered, deduplicated snapshot of `stops` that
    /// [`step_network`](Self::step_network) expects.
    pub fn prepare_network(&self, stops: &[BusStop]) -> StopNetwork {
        StopNetwork::sanitise(stops, &self.region)
    }

    /// Like [`step_simulation`](Self::step_simulation) over a snapshot that
    /// was already prepared, so a caller with an unchanged stop set does not
    /// re-filter it every minute.
    pub fn step_network(
        &mut self,
        agents:  &mut [Agent],
        minute:  Minute,
        network: &StopNetwork,
    ) -> StepOutcome {
        if !network.is_usable() {
            warn!(
                %minute,
                usable = network.len(),
                "skipping tick: stop network needs at least two stops"
            );
            return StepOutcome::InvalidNetwork { usable_stops: network.len() };
        }

        let graph_rebuilt = self.resolver.sync(network);

        let mut stepper =
            AgentStepper::new(&mut self.resolver, &mut self.flow, &self.params, &self.region);
        for agent in agents.iter_mut() {
            stepper.step(agent, minute);
        }

        StepOutcome::Advanced { agents: agents.len(), graph_rebuilt }
    }

    // ── Flow ──────────────────────────────────────────────────────────────

    pub fn flow(&self) -> &FlowRecorder {
        &self.flow
    }

    /// Snapshot of every recorded edge, ascending by `(from, to)`.
    pub fn flow_edges(&self) -> Vec<FlowEdge> {
        self.flow.snapshot()
    }

    pub fn clear_flow(&mut self) {
        debug!(edges = self.flow.len(), hops = self.flow.total_hops(), "clearing flow");
        self.flow.clear();
    }

    // ── Corridors ─────────────────────────────────────────────────────────

    /// Chain the current flow into new corridors over `stops`.
    ///
    /// The produced routes are returned and also kept in the context until
    /// [`clear_routes`](Self::clear_routes).  Ids are unique within this
    /// context.
    pub fn generate_routes_from_flow(
        &mut self,
        stops:  &[BusStop],
        config: &SynthesisConfig,
    ) -> Vec<BusRoute> {
        let network = StopNetwork::sanitise(stops, &self.region);
        let edges = self.flow.snapshot();
        let routes = synthesize(&edges, &network, config, &mut self.route_seq);
        self.routes.extend(routes.iter().cloned());
        routes
    }

    /// Every corridor produced since the last clear.
    pub fn routes(&self) -> &[BusRoute] {
        &self.routes
    }

    pub fn clear_routes(&mut self) {
        self.routes.clear();
    }

    /// Drop flow, corridors, the graph and all memoized paths.
    pub fn reset(&mut self) {
        self.flow.clear();
        self.routes.clear();
        self.route_seq = 0;
        self.resolver.invalidate();
    }
}
