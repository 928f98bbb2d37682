//! The per-agent, per-minute state machine.
//!
//! | Mode / condition      | Action this minute                                   | State after        |
//! |-----------------------|------------------------------------------------------|--------------------|
//! | dwell > 0             | decrement dwell                                      | `at_home` if cursor 0, else `at_destination` |
//! | idle, no trip left    | nothing                                              | `at_home`          |
//! | idle, before departure| nothing                                              | unchanged          |
//! | idle, departure due   | snap origin/destination stops, resolve path          | `riding` or `walking_to_dest` |
//! | transit, path done    | switch to walk_final                                 | `walking_to_dest`  |
//! | transit               | ride toward next stop, record hop start              | `riding`           |
//! | walk_final/direct     | walk toward destination; on arrival start dwell      | `walking_to_dest` / `at_destination` |

use tracing::trace;

use tt_agent::{Agent, AgentMode, AgentState};
use tt_core::{Minute, Region, TravelMode};
use tt_flow::FlowRecorder;
use tt_spatial::{DijkstraRouter, PathResolver, Router};

use crate::{MobilityParams, move_toward};

/// Advances agents one minute at a time against a shared resolver and flow
/// recorder.
///
/// Borrowed for the duration of one tick; the simulation context owns the
/// resolver and recorder between ticks.
pub struct AgentStepper<'a, R: Router = DijkstraRouter> {
    pub resolver: &'a mut PathResolver<R>,
    pub flow:     &'a mut FlowRecorder,
    pub params:   &'a MobilityParams,
    pub region:   &'a Region,
}

impl<'a, R: Router> AgentStepper<'a, R> {
    pub fn new(
        resolver: &'a mut PathResolver<R>,
        flow:     &'a mut FlowRecorder,
        params:   &'a MobilityParams,
        region:   &'a Region,
    ) -> Self {
        Self { resolver, flow, params, region }
    }

    /// Apply one minute of `agent`'s state machine.
    pub fn step(&mut self, agent: &mut Agent, now: Minute) {
        if agent.dwell > 0 {
            agent.dwell -= 1;
            agent.state = if agent.cursor == 0 {
                AgentState::AtHome
            } else {
                AgentState::AtDestination
            };
            return;
        }

        match agent.mode {
            AgentMode::Idle => self.step_idle(agent, now),
            AgentMode::Transit { .. } => self.step_transit(agent, now),
            AgentMode::WalkFinal | AgentMode::WalkDirect => self.step_walk(agent),
        }
    }

    fn step_idle(&mut self, agent: &mut Agent, now: Minute) {
        let Some(trip) = agent.current_trip() else {
            agent.state = AgentState::AtHome;
            return;
        };
        if now.of_day() < trip.departure {
            return;
        }
        let trip_destination = trip.destination;

        // The home sampler is external; a degenerate home is pulled into the
        // region here rather than moved through by the first step.
        agent.pos = self.region.clamp(agent.pos);
        let destination = self.region.clamp(trip_destination);
        agent.target = Some(destination);
        agent.origin_stop = self.resolver.nearest_stop(agent.pos);
        agent.dest_stop = self.resolver.nearest_stop(destination);

        let path = match (agent.origin_stop, agent.dest_stop) {
            (Some(from), Some(to)) => match self.resolver.resolve(from, to) {
                Ok(path) => Some(path),
                Err(e) => {
                    trace!(agent = %agent.id, error = %e, "no stop path, walking");
                    None
                }
            },
            _ => None,
        };

        match path {
            Some(path) => {
                agent.mode = AgentMode::Transit { path, next: 0, hop_started: false };
                agent.state = AgentState::Riding;
            }
            None => {
                agent.mode = AgentMode::WalkDirect;
                agent.state = AgentState::WalkingToDest;
            }
        }
    }

    fn step_transit(&mut self, agent: &mut Agent, now: Minute) {
        let AgentMode::Transit { path, next, hop_started } = &mut agent.mode else {
            return;
        };

        if *next >= path.len() {
            agent.mode = AgentMode::WalkFinal;
            agent.target = agent.current_trip().map(|t| self.region.clamp(t.destination));
            agent.state = AgentState::WalkingToDest;
            return;
        }

        if *next >= 1 && !*hop_started {
            self.flow.record(path.stops[*next - 1], path.stops[*next], now);
            *hop_started = true;
        }

        let target = path.points[*next];
        let step = move_toward(
            agent.pos,
            target,
            self.params.km_per_minute(TravelMode::Bus),
            self.region,
        );
        if step.arrived {
            *next += 1;
            *hop_started = false;
        }

        agent.pos = step.pos;
        agent.target = Some(target);
        agent.stats.add_riding(step.moved_km, self.params.emission_kg_per_km(TravelMode::Bus));
        agent.state = AgentState::Riding;
    }

    fn step_walk(&mut self, agent: &mut Agent) {
        let Some(trip) = agent.current_trip() else {
            agent.mode = AgentMode::Idle;
            agent.state = AgentState::AtHome;
            return;
        };
        let destination = self.region.clamp(trip.destination);
        let dwell = trip.dwell;

        let step = move_toward(
            agent.pos,
            destination,
            self.params.km_per_minute(TravelMode::Walk),
            self.region,
        );
        agent.pos = step.pos;
        agent.stats.add_walking(step.moved_km);

        if step.arrived {
            agent.target = None;
            agent.dwell = dwell;
            agent.cursor += 1;
            agent.mode = AgentMode::Idle;
            agent.state = AgentState::AtDestination;
        } else {
            agent.target = Some(destination);
            agent.state = AgentState::WalkingToDest;
        }
    }
}
