//! Transit stops and the sanitised stop snapshot the core works on.

use rustc_hash::FxHashSet;

use tt_core::{GeoPoint, Region, StopId};

/// How many ids from each end of the snapshot go into its signature.
const SIGNATURE_SAMPLE: usize = 3;

/// A boarding/alighting point.  Immutable reference data.
#[derive(Clone, Debug, PartialEq)]
pub struct BusStop {
    pub id:   StopId,
    pub name: String,
    pub pos:  GeoPoint,
}

impl BusStop {
    pub fn new(id: StopId, name: impl Into<String>, pos: GeoPoint) -> Self {
        Self { id, name: name.into(), pos }
    }
}

// ── NetworkSignature ──────────────────────────────────────────────────────────

/// Cheap identity of a stop snapshot: its size plus the ids at both ends.
///
/// Graphs and memoized paths are valid only for the signature they were
/// built against.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NetworkSignature {
    pub count: usize,
    pub head:  Vec<StopId>,
    pub tail:  Vec<StopId>,
}

// ── StopNetwork ───────────────────────────────────────────────────────────────

/// A snapshot of stops that lie inside the modeled region, deduplicated by
/// id (first occurrence wins), in input order.
#[derive(Clone, Debug, Default)]
pub struct StopNetwork {
    stops: Vec<BusStop>,
}

impl StopNetwork {
    /// Filter `stops` to those inside `region` and drop repeated ids.
    pub fn sanitise(stops: &[BusStop], region: &Region) -> Self {
        let mut seen = FxHashSet::default();
        let stops = stops
            .iter()
            .filter(|s| region.contains(s.pos))
            .filter(|s| seen.insert(s.id))
            .cloned()
            .collect();
        Self { stops }
    }

    /// Wrap stops that are already known to be clean (tests, loaders that
    /// validated upstream).  Repeated ids are still dropped.
    pub fn from_trusted(stops: Vec<BusStop>) -> Self {
        let mut seen = FxHashSet::default();
        Self {
            stops: stops.into_iter().filter(|s| seen.insert(s.id)).collect(),
        }
    }

    /// Routing needs at least two distinct stops.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.stops.len() >= 2
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[BusStop] {
        &self.stops
    }

    pub fn get(&self, id: StopId) -> Option<&BusStop> {
        self.stops.iter().find(|s| s.id == id)
    }

    pub fn signature(&self) -> NetworkSignature {
        let n = self.stops.len();
        let k = SIGNATURE_SAMPLE.min(n);
        NetworkSignature {
            count: n,
            head:  self.stops[..k].iter().map(|s| s.id).collect(),
            tail:  self.stops[n - k..].iter().map(|s| s.id).collect(),
        }
    }
}
