//! Population construction: homes, ages, primary POIs and schedules.
//!
//! # Usage
//!
//! ```rust
//! use tt_agent::PopulationBuilder;
//! use tt_core::{GeoPoint, SimRng};
//!
//! let mut sampler = |rng: &mut SimRng| {
//!     GeoPoint::new(30.60 + rng.gen_range(0.0..0.2), -88.20 + rng.gen_range(0.0..0.2))
//! };
//! let agents = PopulationBuilder::new(100, /*seed=*/ 42).build(&[], &mut sampler);
//!
//! assert_eq!(agents.len(), 100);
//! assert!(agents.iter().all(|a| a.pos == a.home));
//! ```
//!
//! Homes and ages are drawn sequentially from one `SimRng` (the sampler is a
//! `FnMut`).  Schedules are drawn from each agent's own `AgentRng`, so they
//! can be generated in any order; with the `parallel` feature they run on
//! Rayon's pool and the result is identical.

use tracing::info;

use tt_core::{AgentId, AgentRng, GeoPoint, SimRng};
use tt_schedule::{PointOfInterest, ScheduleGenerator};

use crate::Agent;

/// Stream offset for the home sampler's child RNG.
const HOME_STREAM: u64 = 1;

// ── HomeSampler ───────────────────────────────────────────────────────────────

/// Supplies home coordinates.  Implemented for any
/// `FnMut(&mut SimRng) -> GeoPoint`.
pub trait HomeSampler {
    fn sample(&mut self, rng: &mut SimRng) -> GeoPoint;
}

impl<F> HomeSampler for F
where
    F: FnMut(&mut SimRng) -> GeoPoint,
{
    #[inline]
    fn sample(&mut self, rng: &mut SimRng) -> GeoPoint {
        self(rng)
    }
}

// ── AgeMix ────────────────────────────────────────────────────────────────────

/// Population shares per age band.  The senior share is the remainder.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgeMix {
    pub child: f64,
    pub adult: f64,
}

impl Default for AgeMix {
    fn default() -> Self {
        Self { child: 0.20, adult: 0.62 }
    }
}

impl AgeMix {
    /// Draw an age: children 5–17, adults 18–64, seniors 65–90.
    pub fn sample(&self, rng: &mut SimRng) -> u8 {
        let r: f64 = rng.gen_range(0.0..1.0);
        if r < self.child {
            rng.gen_range(5..=17)
        } else if r < self.child + self.adult {
            rng.gen_range(18..=64)
        } else {
            rng.gen_range(65..=90)
        }
    }
}

// ── PopulationBuilder ─────────────────────────────────────────────────────────

/// Fluent builder for a `Vec<Agent>`.
pub struct PopulationBuilder {
    count:   usize,
    seed:    u64,
    age_mix: AgeMix,
}

impl PopulationBuilder {
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, age_mix: AgeMix::default() }
    }

    pub fn age_mix(mut self, mix: AgeMix) -> Self {
        self.age_mix = mix;
        self
    }

    /// Create the agents.  Agent `i` gets `AgentId(i)`.
    pub fn build<S: HomeSampler + ?Sized>(
        self,
        pois:    &[PointOfInterest],
        sampler: &mut S,
    ) -> Vec<Agent> {
        let mut rng = SimRng::new(self.seed);
        let mut home_rng = rng.child(HOME_STREAM);

        let draws: Vec<(GeoPoint, u8)> = (0..self.count)
            .map(|_| (sampler.sample(&mut home_rng), self.age_mix.sample(&mut rng)))
            .collect();

        let generator = ScheduleGenerator::new(pois);
        let seed = self.seed;
        let make = |(i, (home, age)): (usize, (GeoPoint, u8))| {
            let id = AgentId(i as u32);
            let mut agent_rng = AgentRng::new(seed, id);
            let primary = generator.assign_primary(home, age, &mut agent_rng);
            let schedule = generator.generate(home, age, primary, &mut agent_rng);
            Agent::new(id, age, home, schedule).with_primary(primary.map(|p| p.id))
        };

        #[cfg(not(feature = "parallel"))]
        let agents: Vec<Agent> = draws.into_iter().enumerate().map(make).collect();

        #[cfg(feature = "parallel")]
        let agents: Vec<Agent> = {
            use rayon::prelude::*;
            draws.into_par_iter().enumerate().map(make).collect()
        };

        let trips: usize = agents.iter().map(|a| a.schedule.len()).sum();
        info!(agents = agents.len(), trips, pois = pois.len(), seed, "created population");
        agents
    }
}

/// Create `count` agents with homes from `sampler` and schedules over `pois`.
///
/// Shorthand for `PopulationBuilder::new(count, seed).build(pois, sampler)`.
pub fn create_agents<S: HomeSampler + ?Sized>(
    count:   usize,
    pois:    &[PointOfInterest],
    sampler: &mut S,
    seed:    u64,
) -> Vec<Agent> {
    PopulationBuilder::new(count, seed).build(pois, sampler)
}
