//! Directed stop-to-stop traversal counts.

use std::collections::BTreeMap;

use tt_core::{HOURS_PER_DAY, Minute, StopId};

/// Traffic on one directed stop pair.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowEdge {
    pub from:   StopId,
    pub to:     StopId,
    /// Total hop starts on this edge.
    pub count:  u64,
    /// Hop starts bucketed by simulated hour of day.  Sums to `count`.
    pub hourly: [u64; HOURS_PER_DAY],
}

impl FlowEdge {
    pub fn new(from: StopId, to: StopId) -> Self {
        Self { from, to, count: 0, hourly: [0; HOURS_PER_DAY] }
    }

    /// Busiest hour of day, earliest on ties.  `None` for an unused edge.
    pub fn peak_hour(&self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let mut best = 0;
        for (hour, &n) in self.hourly.iter().enumerate() {
            if n > self.hourly[best] {
                best = hour;
            }
        }
        Some(best)
    }
}

/// Append-only accumulator of [`FlowEdge`]s keyed by `(from, to)`.
#[derive(Clone, Debug, Default)]
pub struct FlowRecorder {
    edges: BTreeMap<(StopId, StopId), FlowEdge>,
}

impl FlowRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one hop start from `from` to `to` at `minute`.
    pub fn record(&mut self, from: StopId, to: StopId, minute: Minute) {
        let edge = self
            .edges
            .entry((from, to))
            .or_insert_with(|| FlowEdge::new(from, to));
        edge.count += 1;
        edge.hourly[minute.hour_of_day()] += 1;
    }

    pub fn get(&self, from: StopId, to: StopId) -> Option<&FlowEdge> {
        self.edges.get(&(from, to))
    }

    /// Edges in ascending `(from, to)` order.
    pub fn iter(&self) -> impl Iterator<Item = &FlowEdge> + '_ {
        self.edges.values()
    }

    /// Owned copy of every edge, ascending by `(from, to)`.
    pub fn snapshot(&self) -> Vec<FlowEdge> {
        self.edges.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of all edge counts.
    pub fn total_hops(&self) -> u64 {
        self.edges.values().map(|e| e.count).sum()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }
}
