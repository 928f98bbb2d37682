//! Synthesized corridors.

use tt_core::{GeoPoint, StopId};

/// Display colours handed out to corridors in production order.
pub const ROUTE_PALETTE: [&str; 8] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231",
    "#911eb4", "#46f0f0", "#f032e6", "#bcf60c",
];

/// A candidate corridor produced by [`synthesize`](crate::synthesize).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BusRoute {
    pub id:       String,
    pub name:     String,
    pub color:    String,
    /// Stops in travel order.  Always at least three.
    pub stops:    Vec<StopId>,
    /// Coordinates of `stops`, same order.
    pub geometry: Vec<GeoPoint>,
}

impl BusRoute {
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Sum of straight-line segment lengths along `geometry`.
    pub fn length_km(&self) -> f64 {
        self.geometry
            .windows(2)
            .map(|w| w[0].distance_km(w[1]))
            .sum()
    }
}
