//! Greedy corridor synthesis from recorded flow.
//!
//! # Algorithm
//!
//! 1. Keep edges with `count >= min_count` whose endpoints are both in the
//!    stop network, order by count descending (ties by ascending
//!    `(from, to)`) and truncate to `top_edges`.
//! 2. Index the kept edges by tail stop (outgoing) and head stop (incoming);
//!    each list inherits the global order.
//! 3. Seed a chain with the best unused edge.  Extend forward with the best
//!    unused outgoing edge of the tail, then backward with the best unused
//!    incoming edge of the head.  Extension stops at a revisited stop, at a
//!    stop with no candidate, or at `max_stops_per_route`.
//! 4. Chains of three or more stops become corridors.
//!
//! The result is deliberately greedy.  It is deterministic for a given edge
//! set and config.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use tt_core::{GeoPoint, StopId};
use tt_spatial::StopNetwork;

use crate::{BusRoute, FlowEdge, ROUTE_PALETTE};

/// Shortest chain accepted as a corridor.
const MIN_CORRIDOR_STOPS: usize = 3;

/// Tuning knobs for [`synthesize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynthesisConfig {
    /// Highest-count edges considered at all.
    pub top_edges:           usize,
    /// Minimum hop count for an edge to qualify.
    pub min_count:           u64,
    /// Corridors produced per call, at most.
    pub max_routes:          usize,
    /// Chain length cap, in stops.
    pub max_stops_per_route: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            top_edges:           40,
            min_count:           3,
            max_routes:          5,
            max_stops_per_route: 12,
        }
    }
}

/// Chain high-flow edges into at most `config.max_routes` corridors.
///
/// `next_id` numbers the produced routes and is advanced once per route, so
/// a caller that keeps it across calls never reuses an id.  Returns an empty
/// `Vec` when no edge meets the threshold.
pub fn synthesize(
    edges:   &[FlowEdge],
    network: &StopNetwork,
    config:  &SynthesisConfig,
    next_id: &mut u64,
) -> Vec<BusRoute> {
    let stops: FxHashMap<StopId, (&str, GeoPoint)> = network
        .stops()
        .iter()
        .map(|s| (s.id, (s.name.as_str(), s.pos)))
        .collect();

    // ── 1. Candidate edges ──────────────────────────────────────────────────
    let mut ranked: Vec<&FlowEdge> = edges
        .iter()
        .filter(|e| e.count >= config.min_count)
        .filter(|e| stops.contains_key(&e.from) && stops.contains_key(&e.to))
        .collect();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.from.cmp(&b.from))
            .then(a.to.cmp(&b.to))
    });
    ranked.truncate(config.top_edges);

    if ranked.is_empty() {
        debug!(edges = edges.len(), min_count = config.min_count, "no edge meets the flow threshold");
        return Vec::new();
    }

    // ── 2. Adjacency by edge index ──────────────────────────────────────────
    let mut outgoing: FxHashMap<StopId, Vec<usize>> = FxHashMap::default();
    let mut incoming: FxHashMap<StopId, Vec<usize>> = FxHashMap::default();
    for (i, e) in ranked.iter().enumerate() {
        outgoing.entry(e.from).or_default().push(i);
        incoming.entry(e.to).or_default().push(i);
    }

    // ── 3. Grow chains ──────────────────────────────────────────────────────
    let mut used = vec![false; ranked.len()];
    let mut routes = Vec::new();

    for seed in 0..ranked.len() {
        if routes.len() >= config.max_routes {
            break;
        }
        if used[seed] {
            continue;
        }
        used[seed] = true;

        let mut chain = VecDeque::from([ranked[seed].from, ranked[seed].to]);
        let mut on_chain: FxHashSet<StopId> = chain.iter().copied().collect();

        while chain.len() < config.max_stops_per_route {
            let Some(&tail) = chain.back() else { break };
            let Some(e) = best_unused(&outgoing, tail, &used) else { break };
            let next = ranked[e].to;
            if !on_chain.insert(next) {
                break;
            }
            used[e] = true;
            chain.push_back(next);
        }

        while chain.len() < config.max_stops_per_route {
            let Some(&head) = chain.front() else { break };
            let Some(e) = best_unused(&incoming, head, &used) else { break };
            let prev = ranked[e].from;
            if !on_chain.insert(prev) {
                break;
            }
            used[e] = true;
            chain.push_front(prev);
        }

        // ── 4. Accept ───────────────────────────────────────────────────────
        if chain.len() < MIN_CORRIDOR_STOPS {
            continue;
        }
        let resolved: Vec<(&str, GeoPoint)> =
            chain.iter().filter_map(|id| stops.get(id).copied()).collect();
        if resolved.len() != chain.len() {
            continue;
        }

        let n = *next_id;
        *next_id += 1;
        let first = resolved.first().map_or("", |s| s.0);
        let last = resolved.last().map_or("", |s| s.0);
        routes.push(BusRoute {
            id:       format!("route-{n}"),
            name:     format!("{first} - {last}"),
            color:    ROUTE_PALETTE[routes.len() % ROUTE_PALETTE.len()].to_owned(),
            stops:    chain.into_iter().collect(),
            geometry: resolved.into_iter().map(|s| s.1).collect(),
        });
    }

    info!(
        candidates = ranked.len(),
        routes = routes.len(),
        "synthesized corridors from flow"
    );
    routes
}

#[inline]
fn best_unused(adj: &FxHashMap<StopId, Vec<usize>>, stop: StopId, used: &[bool]) -> Option<usize> {
    adj.get(&stop)?.iter().copied().find(|&e| !used[e])
}
