//! The `Agent` record and its state machine vocabulary.
//!
//! An agent has two views of "what it is doing":
//!
//! - [`AgentState`] is the presentation state reported to metrics and
//!   output.
//! - [`AgentMode`] is the stepper's internal mode.  The transit variant
//!   carries the path being ridden so the two can never disagree about
//!   which stop comes next.

use std::fmt;
use std::sync::Arc;

use tt_core::{AgentId, GeoPoint, PoiId, StopId};
use tt_schedule::{AgeGroup, Schedule, Trip};
use tt_spatial::StopPath;

// ── AgentState ────────────────────────────────────────────────────────────────

/// What an observer sees the agent doing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentState {
    #[default]
    AtHome,
    WalkingToStop,
    Waiting,
    Riding,
    WalkingToDest,
    AtDestination,
}

impl AgentState {
    pub const ALL: [AgentState; 6] = [
        AgentState::AtHome,
        AgentState::WalkingToStop,
        AgentState::Waiting,
        AgentState::Riding,
        AgentState::WalkingToDest,
        AgentState::AtDestination,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::AtHome        => "at_home",
            AgentState::WalkingToStop => "walking_to_stop",
            AgentState::Waiting       => "waiting",
            AgentState::Riding        => "riding",
            AgentState::WalkingToDest => "walking_to_dest",
            AgentState::AtDestination => "at_destination",
        }
    }

    /// `true` for states in which the agent is away from any activity.
    pub fn is_travelling(self) -> bool {
        matches!(
            self,
            AgentState::WalkingToStop
                | AgentState::Waiting
                | AgentState::Riding
                | AgentState::WalkingToDest
        )
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── AgentMode ─────────────────────────────────────────────────────────────────

/// The stepper's internal mode.
#[derive(Clone, Debug, Default)]
pub enum AgentMode {
    /// Not travelling; waiting for the next trip's departure (or done).
    #[default]
    Idle,
    /// Riding along `path`, currently heading for `path.stops[next]`.
    ///
    /// `hop_started` is set once the hop `path[next - 1] → path[next]` has
    /// been counted in the flow recorder.
    Transit {
        path:        Arc<StopPath>,
        next:        usize,
        hop_started: bool,
    },
    /// Walking from the alighting stop to the trip destination.
    WalkFinal,
    /// Walking the whole trip because no stop path exists.
    WalkDirect,
}

impl AgentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentMode::Idle          => "idle",
            AgentMode::Transit { .. } => "transit",
            AgentMode::WalkFinal     => "walk_final",
            AgentMode::WalkDirect    => "walk_direct",
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, AgentMode::Idle)
    }

    /// `true` for the two walking modes.
    #[inline]
    pub fn is_walking(&self) -> bool {
        matches!(self, AgentMode::WalkFinal | AgentMode::WalkDirect)
    }
}

// ── TravelStats ───────────────────────────────────────────────────────────────

/// Cumulative per-agent travel accounting.
///
/// Every accrual method bumps its own category and `total_minutes` together,
/// so `walking + riding + waiting == total` holds after any sequence of
/// calls.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelStats {
    pub walking_minutes: u32,
    pub riding_minutes:  u32,
    pub waiting_minutes: u32,
    pub total_minutes:   u32,
    pub distance_km:     f64,
    pub carbon_kg:       f64,
}

impl TravelStats {
    /// One minute on foot covering `km`.
    pub fn add_walking(&mut self, km: f64) {
        self.walking_minutes += 1;
        self.total_minutes += 1;
        self.distance_km += km;
    }

    /// One minute on board covering `km`, emitting `kg_per_km` per km.
    pub fn add_riding(&mut self, km: f64, kg_per_km: f64) {
        self.riding_minutes += 1;
        self.total_minutes += 1;
        self.distance_km += km;
        self.carbon_kg += km * kg_per_km;
    }

    /// One minute spent waiting at a stop.
    pub fn add_waiting(&mut self) {
        self.waiting_minutes += 1;
        self.total_minutes += 1;
    }

    pub fn is_consistent(&self) -> bool {
        self.walking_minutes + self.riding_minutes + self.waiting_minutes == self.total_minutes
    }
}

// ── Agent ─────────────────────────────────────────────────────────────────────

/// One simulated person.  Mutated only by the stepper.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id:          AgentId,
    pub age:         u8,
    pub age_group:   AgeGroup,
    pub home:        GeoPoint,
    pub pos:         GeoPoint,
    /// Where the agent is currently heading, if travelling.
    pub target:      Option<GeoPoint>,
    /// Stop nearest the agent when the current trip started.
    pub origin_stop: Option<StopId>,
    /// Stop nearest the current trip's destination.
    pub dest_stop:   Option<StopId>,
    /// School or workplace, if one was assigned.
    pub primary_poi: Option<PoiId>,
    pub state:       AgentState,
    pub mode:        AgentMode,
    pub schedule:    Schedule,
    /// Index of the next (or current) trip in `schedule`.
    pub cursor:      usize,
    /// Minutes of dwell left at the current location.
    pub dwell:       u32,
    pub stats:       TravelStats,
}

impl Agent {
    /// A fresh agent at home with nothing done yet.
    pub fn new(id: AgentId, age: u8, home: GeoPoint, schedule: Schedule) -> Self {
        Self {
            id,
            age,
            age_group: AgeGroup::from_age(age),
            home,
            pos: home,
            target: None,
            origin_stop: None,
            dest_stop: None,
            primary_poi: None,
            state: AgentState::AtHome,
            mode: AgentMode::Idle,
            schedule,
            cursor: 0,
            dwell: 0,
            stats: TravelStats::default(),
        }
    }

    pub fn with_primary(mut self, poi: Option<PoiId>) -> Self {
        self.primary_poi = poi;
        self
    }

    /// The trip at the cursor; `None` once the day is done.
    #[inline]
    pub fn current_trip(&self) -> Option<&Trip> {
        self.schedule.get(self.cursor)
    }

    #[inline]
    pub fn is_dwelling(&self) -> bool {
        self.dwell > 0
    }

    /// `true` once every trip has been completed.
    pub fn is_done(&self) -> bool {
        self.cursor >= self.schedule.len() && self.mode.is_idle() && self.dwell == 0
    }

    /// Put the agent back at home with its schedule untouched and all
    /// progress and accounting discarded.
    pub fn reset(&mut self) {
        self.pos = self.home;
        self.target = None;
        self.origin_stop = None;
        self.dest_stop = None;
        self.state = AgentState::AtHome;
        self.mode = AgentMode::Idle;
        self.cursor = 0;
        self.dwell = 0;
        self.stats = TravelStats::default();
    }
}
