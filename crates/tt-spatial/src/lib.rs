//! `tt-spatial`: stops, the transit graph, and shortest-path resolution.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`stops`]    | `BusStop`, `StopNetwork` (sanitised snapshot), `NetworkSignature` |
//! | [`graph`]    | `TransitGraph` (CSR + R-tree), `TransitGraphBuilder`        |
//! | [`router`]   | `Router` trait, `StopPath`, `DijkstraRouter`                |
//! | [`resolver`] | `PathResolver`: graph + memoized paths, rebuilt on signature change |
//! | [`loader`]   | `load_stops_csv`, `load_stops_reader`                       |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Graph model
//!
//! Every stop is linked to its [`DEFAULT_K`] nearest neighbours by
//! great-circle distance.  Links are undirected: if either endpoint lists
//! the other among its nearest, both directions exist.  Edge weight is the
//! geodesic length in kilometres.

pub mod error;
pub mod graph;
pub mod loader;
pub mod resolver;
pub mod router;
pub mod stops;


pub use error::{SpatialError, SpatialResult};
pub use graph::{DEFAULT_K, NodeId, TransitGraph, TransitGraphBuilder};
pub use loader::{load_stops_csv, load_stops_reader};
pub use resolver::{PathResolver, ResolverStats};
pub use router::{DijkstraRouter, Router, StopPath};
pub use stops::{BusStop, NetworkSignature, StopNetwork};
