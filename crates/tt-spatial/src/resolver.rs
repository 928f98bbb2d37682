//! The memoizing path resolver.
//!
//! `PathResolver` owns the current [`TransitGraph`] and a `(from, to)` →
//! path cache.  Both are tied to the [`NetworkSignature`] they were built
//! from: [`sync`](PathResolver::sync) compares signatures and, on any
//! change, rebuilds the graph and drops every memoized path.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use tt_core::{GeoPoint, StopId};

use crate::{
    DEFAULT_K, DijkstraRouter, NetworkSignature, Router, SpatialError, SpatialResult, StopNetwork,
    StopPath, TransitGraph,
};

/// Counters for cache behaviour, exposed for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub rebuilds: u64,
    pub hits:     u64,
    pub misses:   u64,
}

/// Cached value: a shared path, or a remembered "no path".
type Memo = Option<Arc<StopPath>>;

pub struct PathResolver<R: Router = DijkstraRouter> {
    router:    R,
    k:         usize,
    graph:     TransitGraph,
    signature: Option<NetworkSignature>,
    cache:     FxHashMap<(StopId, StopId), Memo>,
    stats:     ResolverStats,
}

impl PathResolver<DijkstraRouter> {
    /// Dijkstra over a [`DEFAULT_K`]-nearest graph.
    pub fn new() -> Self {
        Self::with_router(DijkstraRouter, DEFAULT_K)
    }
}

impl Default for PathResolver<DijkstraRouter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Router> PathResolver<R> {
    pub fn with_router(router: R, k: usize) -> Self {
        Self {
            router,
            k,
            graph:     TransitGraph::empty(),
            signature: None,
            cache:     FxHashMap::default(),
            stats:     ResolverStats::default(),
        }
    }

    /// Make the graph match `network`.
    ///
    /// Rebuilds (and clears the path cache) only when the network's
    /// signature differs from the one the current graph was built for.
    /// Returns `true` if a rebuild happened.
    pub fn sync(&mut self, network: &StopNetwork) -> bool {
        let signature = network.signature();
        if self.signature.as_ref() == Some(&signature) {
            return false;
        }
        self.graph = TransitGraph::k_nearest(network, self.k);
        self.cache.clear();
        self.stats.rebuilds += 1;
        debug!(
            stops = self.graph.node_count(),
            edges = self.graph.edge_count(),
            k = self.k,
            "rebuilt transit graph"
        );
        self.signature = Some(signature);
        true
    }

    /// Drop the graph and every memoized path.  The next `sync` rebuilds.
    pub fn invalidate(&mut self) {
        self.graph = TransitGraph::empty();
        self.signature = None;
        self.cache.clear();
    }

    pub fn graph(&self) -> &TransitGraph {
        &self.graph
    }

    pub fn signature(&self) -> Option<&NetworkSignature> {
        self.signature.as_ref()
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    pub fn cached_paths(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    pub fn nearest_stop(&self, pos: GeoPoint) -> Option<StopId> {
        self.graph.nearest_stop(pos)
    }

    /// Shortest path from `from` to `to`, memoized per pair.
    ///
    /// Repeated calls under an unchanged signature return the same `Arc`.
    /// A missing path is memoized too and reported as
    /// [`SpatialError::NoPath`] every time.
    pub fn resolve(&mut self, from: StopId, to: StopId) -> SpatialResult<Arc<StopPath>> {
        let memo = match self.cache.get(&(from, to)) {
            Some(memo) => {
                self.stats.hits += 1;
                memo.clone()
            }
            None => {
                self.stats.misses += 1;
                let memo = match self.router.route(&self.graph, from, to) {
                    Ok(path) => Some(Arc::new(path)),
                    Err(SpatialError::NoPath { .. }) => None,
                    Err(e) => return Err(e),
                };
                self.cache.insert((from, to), memo.clone());
                memo
            }
        };
        memo.ok_or(SpatialError::NoPath { from, to })
    }
}
