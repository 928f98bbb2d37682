//! Run configuration.

use serde::{Deserialize, Serialize};

use tt_core::{MINUTES_PER_DAY, Minute, Region, SimClock};
use tt_flow::SynthesisConfig;
use tt_mobility::MobilityParams;

use crate::{SimError, SimResult};

/// Everything needed to reproduce a run.
///
/// Usually loaded from JSON by the application; missing fields fall back to
/// [`Default`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Master seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Agents to create when the builder is not handed a population.
    pub agent_count: usize,

    /// The modeled area.  Stops outside it are ignored and every agent
    /// position is clamped into it.
    pub region: Region,

    /// Absolute minute the run starts at (0 = day 0, 00:00).
    pub start_minute: u32,

    /// Minutes to simulate.  One day is 1440.
    pub total_minutes: u32,

    /// Report a snapshot every N minutes.  0 disables snapshots.
    pub snapshot_interval: u32,

    pub mobility: MobilityParams,

    pub synthesis: SynthesisConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:              42,
            agent_count:       500,
            region:            Region {
                min_lat: 30.60,
                max_lat: 30.78,
                min_lon: -88.22,
                max_lon: -88.00,
            },
            start_minute:      0,
            total_minutes:     MINUTES_PER_DAY,
            snapshot_interval: 60,
            mobility:          MobilityParams::default(),
            synthesis:         SynthesisConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        self.region.validate()?;
        if self.region.min_lat == self.region.max_lat || self.region.min_lon == self.region.max_lon {
            return Err(SimError::Config(format!("region has zero area: {:?}", self.region)));
        }
        if self.total_minutes == 0 {
            return Err(SimError::Config("total_minutes must be positive".into()));
        }
        if self.start_minute.checked_add(self.total_minutes).is_none() {
            return Err(SimError::Config(format!(
                "start_minute {} + total_minutes {} overflows the minute counter",
                self.start_minute, self.total_minutes
            )));
        }
        if !self.mobility.is_valid() {
            return Err(SimError::Config(format!(
                "speeds must be positive and emission non-negative: {:?}",
                self.mobility
            )));
        }
        if self.synthesis.max_routes > 0 && self.synthesis.max_stops_per_route < 3 {
            return Err(SimError::Config(
                "max_stops_per_route below 3 can never produce a corridor".into(),
            ));
        }
        Ok(())
    }

    /// The minute at which the run ends (exclusive).  Only meaningful on a
    /// config that passed [`validate`](Self::validate).
    #[inline]
    pub fn end_minute(&self) -> Minute {
        Minute(self.start_minute) + self.total_minutes
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(Minute(self.start_minute))
    }
}
