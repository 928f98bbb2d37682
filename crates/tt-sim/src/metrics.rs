//! Population-level statistics.

use serde::Serialize;

use tt_agent::{Agent, AgentState};

/// A point-in-time summary of the population.  Averages and sums are
/// rounded to two decimals.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimulationMetrics {
    pub total_agents:       usize,
    pub at_home:            usize,
    pub walking_to_stop:    usize,
    pub waiting:            usize,
    pub riding:             usize,
    pub walking_to_dest:    usize,
    pub at_destination:     usize,
    pub avg_age:            f64,
    /// Mean of each agent's total travel minutes.
    pub avg_travel_minutes: f64,
    pub avg_wait_minutes:   f64,
    pub total_carbon_kg:    f64,
    pub total_distance_km:  f64,
}

impl SimulationMetrics {
    pub fn count(&self, state: AgentState) -> usize {
        match state {
            AgentState::AtHome        => self.at_home,
            AgentState::WalkingToStop => self.walking_to_stop,
            AgentState::Waiting       => self.waiting,
            AgentState::Riding        => self.riding,
            AgentState::WalkingToDest => self.walking_to_dest,
            AgentState::AtDestination => self.at_destination,
        }
    }

    /// Agents currently between activities.
    pub fn travelling(&self) -> usize {
        self.walking_to_stop + self.waiting + self.riding + self.walking_to_dest
    }
}

/// Summarise `agents`.  Pure; an empty slice yields all zeros.
pub fn calculate_metrics(agents: &[Agent]) -> SimulationMetrics {
    let mut m = SimulationMetrics { total_agents: agents.len(), ..Default::default() };
    if agents.is_empty() {
        return m;
    }

    let mut age_sum = 0.0;
    let mut travel_sum = 0.0;
    let mut wait_sum = 0.0;
    let mut carbon = 0.0;
    let mut distance = 0.0;

    for a in agents {
        match a.state {
            AgentState::AtHome        => m.at_home += 1,
            AgentState::WalkingToStop => m.walking_to_stop += 1,
            AgentState::Waiting       => m.waiting += 1,
            AgentState::Riding        => m.riding += 1,
            AgentState::WalkingToDest => m.walking_to_dest += 1,
            AgentState::AtDestination => m.at_destination += 1,
        }
        age_sum += f64::from(a.age);
        travel_sum += f64::from(a.stats.total_minutes);
        wait_sum += f64::from(a.stats.waiting_minutes);
        carbon += a.stats.carbon_kg;
        distance += a.stats.distance_km;
    }

    let n = agents.len() as f64;
    m.avg_age = round2(age_sum / n);
    m.avg_travel_minutes = round2(travel_sum / n);
    m.avg_wait_minutes = round2(wait_sum / n);
    m.total_carbon_kg = round2(carbon);
    m.total_distance_km = round2(distance);
    m
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
