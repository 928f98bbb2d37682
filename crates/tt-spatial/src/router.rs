//! Routing trait and default Dijkstra implementation.
//!
//! `PathResolver` calls routing through the [`Router`] trait, so an A* or a
//! contraction hierarchy can replace [`DijkstraRouter`] without touching the
//! resolver or the stepper.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tt_core::{GeoPoint, StopId};

use crate::graph::{NodeId, TransitGraph};
use crate::{SpatialError, SpatialResult};

// ── StopPath ──────────────────────────────────────────────────────────────────

/// A shortest path through the stop graph.
#[derive(Debug, Clone, PartialEq)]
pub struct StopPath {
    /// Stops in travel order, origin first, destination last.
    pub stops:    Vec<StopId>,
    /// Coordinates of `stops`, same order.  Stored so that an agent riding a
    /// memoized path never depends on the graph it was computed on.
    pub points:   Vec<GeoPoint>,
    /// Sum of edge weights in kilometres.
    pub total_km: f64,
}

impl StopPath {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// `true` if origin and destination are the same stop.
    pub fn is_trivial(&self) -> bool {
        self.stops.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine over a [`TransitGraph`].
pub trait Router {
    /// Compute a path from `from` to `to`.
    ///
    /// `from == to` yields the one-stop path.  Returns
    /// [`SpatialError::NoPath`] when the stops are disconnected and
    /// [`SpatialError::UnknownStop`] when either is missing from `graph`.
    fn route(&self, graph: &TransitGraph, from: StopId, to: StopId) -> SpatialResult<StopPath>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra over the CSR stop graph, weighted by geodesic km.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, graph: &TransitGraph, from: StopId, to: StopId) -> SpatialResult<StopPath> {
        let src = graph.node_of(from).ok_or(SpatialError::UnknownStop(from))?;
        let dst = graph.node_of(to).ok_or(SpatialError::UnknownStop(to))?;
        dijkstra(graph, src, dst).ok_or(SpatialError::NoPath { from, to })
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Min-heap entry.  Ordering is reversed on cost so `BinaryHeap` pops the
/// cheapest; the node id breaks ties deterministically.
#[derive(Copy, Clone, PartialEq)]
struct Frontier {
    cost: f64,
    node: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(graph: &TransitGraph, from: NodeId, to: NodeId) -> Option<StopPath> {
    if from == to {
        return Some(reconstruct(graph, &[], from, to, 0.0));
    }

    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    // prev_edge[v] = edge index that reached v; usize::MAX for unreached.
    let mut prev_edge = vec![usize::MAX; n];

    dist[from.index()] = 0.0;
    let mut heap = BinaryHeap::new();
    heap.push(Frontier { cost: 0.0, node: from });

    while let Some(Frontier { cost, node }) = heap.pop() {
        if node == to {
            return Some(reconstruct(graph, &prev_edge, from, to, cost));
        }
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        for edge in graph.out_edges(node) {
            let next = graph.edge_to[edge];
            let candidate = cost + graph.edge_km[edge];
            if candidate < dist[next.index()] {
                dist[next.index()] = candidate;
                prev_edge[next.index()] = edge;
                heap.push(Frontier { cost: candidate, node: next });
            }
        }
    }

    None
}

fn reconstruct(
    graph:     &TransitGraph,
    prev_edge: &[usize],
    from:      NodeId,
    to:        NodeId,
    total_km:  f64,
) -> StopPath {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        cur = graph.edge_from[e];
        nodes.push(cur);
    }
    nodes.reverse();
    StopPath {
        stops:  nodes.iter().map(|&n| graph.stop_of(n)).collect(),
        points: nodes.iter().map(|&n| graph.node_pos[n.index()]).collect(),
        total_km,
    }
}
