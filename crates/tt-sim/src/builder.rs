//! Fluent builder for constructing a [`Sim`].

use tt_agent::{Agent, HomeSampler, PopulationBuilder};
use tt_core::{GeoPoint, Region, SimRng};
use tt_schedule::PointOfInterest;
use tt_spatial::{BusStop, DijkstraRouter, PathResolver, Router};

use crate::{Sim, SimConfig, SimContext, SimError, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                                            |
/// |------------------|----------------------------------------------------|
/// | `.stops(v)`      | No stops (every tick is skipped until set)         |
/// | `.pois(v)`       | No POIs (agents only make their return-home trip)  |
/// | `.agents(v)`     | `config.agent_count` agents, homes uniform in region |
/// | `.resolver(r)`   | Dijkstra over the default k-nearest graph          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .stops(stops)
///     .pois(pois)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<R: Router = DijkstraRouter> {
    config:   SimConfig,
    stops:    Vec<BusStop>,
    pois:     Vec<PointOfInterest>,
    agents:   Option<Vec<Agent>>,
    resolver: PathResolver<R>,
}

impl SimBuilder<DijkstraRouter> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            stops:    Vec::new(),
            pois:     Vec::new(),
            agents:   None,
            resolver: PathResolver::new(),
        }
    }
}

impl<R: Router> SimBuilder<R> {
    pub fn stops(mut self, stops: Vec<BusStop>) -> Self {
        self.stops = stops;
        self
    }

    pub fn pois(mut self, pois: Vec<PointOfInterest>) -> Self {
        self.pois = pois;
        self
    }

    /// Use a ready-made population.  Its length must equal
    /// `config.agent_count`.
    pub fn agents(mut self, agents: Vec<Agent>) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Swap the routing engine or neighbour count.
    pub fn resolver<R2: Router>(self, resolver: PathResolver<R2>) -> SimBuilder<R2> {
        SimBuilder {
            config: self.config,
            stops: self.stops,
            pois: self.pois,
            agents: self.agents,
            resolver,
        }
    }

    /// Validate inputs and return a ready-to-run [`Sim`].  Without
    /// [`agents`](Self::agents), homes are drawn uniformly from the region.
    pub fn build(self) -> SimResult<Sim<R>> {
        let region = self.config.region;
        self.build_with(&mut uniform_in(region))
    }

    /// Like [`build`](Self::build) but draws homes from `sampler` when no
    /// population was supplied.
    pub fn build_with<S: HomeSampler + ?Sized>(self, sampler: &mut S) -> SimResult<Sim<R>> {
        self.config.validate()?;
        let expected = self.config.agent_count;

        let agents = match self.agents {
            Some(a) => {
                if a.len() != expected {
                    return Err(SimError::AgentCountMismatch {
                        expected,
                        got:  a.len(),
                        what: "agents",
                    });
                }
                a
            }
            None => PopulationBuilder::new(expected, self.config.seed).build(&self.pois, sampler),
        };

        let context = SimContext::with_resolver(self.config.region, self.config.mobility, self.resolver);
        let network = context.prepare_network(&self.stops);

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            agents,
            stops: self.stops,
            network,
            context,
        })
    }
}

/// Home sampler drawing uniformly from `region`.
pub fn uniform_in(region: Region) -> impl FnMut(&mut SimRng) -> GeoPoint {
    move |rng: &mut SimRng| {
        GeoPoint::new(
            rng.gen_range(region.min_lat..=region.max_lat),
            rng.gen_range(region.min_lon..=region.max_lon),
        )
    }
}
