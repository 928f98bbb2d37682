//! Transit graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Nodes are dense indices assigned in stop-snapshot order; `node_stop` maps
//! them back to the provider's `StopId`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over a local equirectangular projection of the
//! stops answers nearest-stop and k-nearest queries.  Scaling longitude by
//! `cos(reference latitude)` makes planar distance rank points the same way
//! great-circle distance does at city scale.

use std::collections::BTreeSet;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use tt_core::{GeoPoint, StopId};

use crate::StopNetwork;

/// Neighbours linked per stop.
pub const DEFAULT_K: usize = 14;

/// Dense index of a stop inside one `TransitGraph`.  Meaningless across
/// rebuilds; hold `StopId`s instead.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [projected x, lat]
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── TransitGraph ──────────────────────────────────────────────────────────────

/// Undirected stop graph (stored as paired directed edges) in CSR format,
/// plus a spatial index for nearest-stop snapping.
///
/// Construct with [`TransitGraph::k_nearest`] or [`TransitGraphBuilder`].
pub struct TransitGraph {
    /// Position of each node, indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Provider id of each node, indexed by `NodeId`.
    pub node_stop: Vec<StopId>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each directed edge (sorted by source).
    pub edge_from: Vec<NodeId>,

    /// Destination node of each directed edge.
    pub edge_to: Vec<NodeId>,

    /// Geodesic length of each edge in kilometres.  The Dijkstra weight.
    pub edge_km: Vec<f64>,

    stop_index:  FxHashMap<StopId, NodeId>,
    lon_scale:   f64,
    spatial_idx: RTree<NodeEntry>,
}

impl TransitGraph {
    /// Link every stop in `network` to its `k` nearest neighbours by
    /// great-circle distance, symmetrically.
    ///
    /// Candidates come from the R-tree (a generous `2k + 1` of them) and are
    /// re-ranked by haversine distance, ties by `StopId`, before the top `k`
    /// are taken.
    pub fn k_nearest(network: &StopNetwork, k: usize) -> Self {
        let mut b = TransitGraphBuilder::with_capacity(network.len());
        for stop in network.stops() {
            b.add_stop(stop.id, stop.pos);
        }

        let index = b.spatial_index();
        let n = network.len();
        let fetch = (2 * k + 1).min(n);

        for (i, stop) in network.stops().iter().enumerate() {
            let me = NodeId(i as u32);
            let mut candidates: Vec<(f64, StopId, NodeId)> = index
                .nearest_neighbor_iter(&project(stop.pos, b.lon_scale))
                .filter(|e| e.id != me)
                .take(fetch)
                .map(|e| {
                    let other = &network.stops()[e.id.index()];
                    (stop.pos.distance_km(other.pos), other.id, e.id)
                })
                .collect();
            candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            for &(_, _, other) in candidates.iter().take(k) {
                b.add_link(me, other);
            }
        }

        b.build()
    }

    /// Construct an empty graph with no nodes or edges.
    pub fn empty() -> Self {
        TransitGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of directed edges (twice the number of undirected links).
    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn node_of(&self, stop: StopId) -> Option<NodeId> {
        self.stop_index.get(&stop).copied()
    }

    #[inline]
    pub fn stop_of(&self, node: NodeId) -> StopId {
        self.node_stop[node.index()]
    }

    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = usize> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        start..end
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// `(neighbour, km)` pairs for `stop`; empty if the stop is unknown.
    pub fn neighbors(&self, stop: StopId) -> Vec<(StopId, f64)> {
        let Some(node) = self.node_of(stop) else {
            return Vec::new();
        };
        self.out_edges(node)
            .map(|e| (self.stop_of(self.edge_to[e]), self.edge_km[e]))
            .collect()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The stop nearest to `pos`; `None` only for an empty graph.
    pub fn nearest_stop(&self, pos: GeoPoint) -> Option<StopId> {
        self.spatial_idx
            .nearest_neighbor(&project(pos, self.lon_scale))
            .map(|e| self.stop_of(e.id))
    }
}

#[inline]
fn project(pos: GeoPoint, lon_scale: f64) -> [f64; 2] {
    [pos.lon * lon_scale, pos.lat]
}

// ── TransitGraphBuilder ───────────────────────────────────────────────────────

/// Construct a [`TransitGraph`] incrementally, then call
/// [`build`](Self::build).
///
/// Links are undirected and deduplicated, so adding `a–b` and later `b–a`
/// yields one pair of directed edges.
///
/// # Example
///
/// ```
/// use tt_core::{GeoPoint, StopId};
/// use tt_spatial::TransitGraphBuilder;
///
/// let mut b = TransitGraphBuilder::new();
/// let a = b.add_stop(StopId(10), GeoPoint::new(30.69, -88.04));
/// let c = b.add_stop(StopId(11), GeoPoint::new(30.70, -88.03));
/// b.add_link(a, c);
/// b.add_link(c, a);
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2);
/// ```
pub struct TransitGraphBuilder {
    nodes:     Vec<(StopId, GeoPoint)>,
    links:     BTreeSet<(NodeId, NodeId)>,
    lat_sum:   f64,
    lon_scale: f64,
}

impl TransitGraphBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            links:     BTreeSet::new(),
            lat_sum:   0.0,
            lon_scale: 1.0,
        }
    }

    /// Add a stop and return its `NodeId` (sequential from 0).
    pub fn add_stop(&mut self, id: StopId, pos: GeoPoint) -> NodeId {
        let node = NodeId(self.nodes.len() as u32);
        self.nodes.push((id, pos));
        self.lat_sum += pos.lat;
        let mean_lat = self.lat_sum / self.nodes.len() as f64;
        self.lon_scale = mean_lat.to_radians().cos();
        node
    }

    /// Add an undirected link.  Self-links are ignored.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        if a != b {
            self.links.insert((a.min(b), a.max(b)));
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn spatial_index(&self) -> RTree<NodeEntry> {
        let entries = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &(_, pos))| NodeEntry {
                point: project(pos, self.lon_scale),
                id:    NodeId(i as u32),
            })
            .collect();
        RTree::bulk_load(entries)
    }

    /// Consume the builder and produce a [`TransitGraph`].
    pub fn build(self) -> TransitGraph {
        let node_count = self.nodes.len();
        let spatial_idx = self.spatial_index();

        // Expand each undirected link into two directed edges, sorted by source.
        let mut directed: Vec<(NodeId, NodeId)> = self
            .links
            .iter()
            .flat_map(|&(a, b)| [(a, b), (b, a)])
            .collect();
        directed.sort_unstable();

        let edge_km: Vec<f64> = directed
            .iter()
            .map(|&(a, b)| self.nodes[a.index()].1.distance_km(self.nodes[b.index()].1))
            .collect();
        let edge_from: Vec<NodeId> = directed.iter().map(|e| e.0).collect();
        let edge_to:   Vec<NodeId> = directed.iter().map(|e| e.1).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _) in &directed {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, directed.len());

        let stop_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &(id, _))| (id, NodeId(i as u32)))
            .collect();

        TransitGraph {
            node_pos:  self.nodes.iter().map(|n| n.1).collect(),
            node_stop: self.nodes.iter().map(|n| n.0).collect(),
            node_out_start,
            edge_from,
            edge_to,
            edge_km,
            stop_index,
            lon_scale: self.lon_scale,
            spatial_idx,
        }
    }
}

impl Default for TransitGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
