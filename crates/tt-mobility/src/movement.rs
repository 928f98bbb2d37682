//! The one movement primitive every travelling agent uses.

use tt_core::{GeoPoint, Region};

/// Result of one [`move_toward`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    /// New position, already clamped to the region.
    pub pos:      GeoPoint,
    /// Geodesic distance actually covered.  Shorter than the step on arrival.
    pub moved_km: f64,
    pub arrived:  bool,
}

/// Move from `from` toward `to` by at most `step_km`.
///
/// Within reach, the result snaps exactly onto `to` and reports the true
/// remaining distance as moved.  Otherwise the position is interpolated by
/// `step_km / remaining`.  Either way the position is clamped to `region`.
pub fn move_toward(from: GeoPoint, to: GeoPoint, step_km: f64, region: &Region) -> Step {
    let remaining = from.distance_km(to);
    if !remaining.is_finite() || remaining <= step_km {
        return Step {
            pos:      region.clamp(to),
            moved_km: if remaining.is_finite() { remaining } else { 0.0 },
            arrived:  true,
        };
    }
    Step {
        pos:      region.clamp(from.lerp(to, step_km / remaining)),
        moved_km: step_km,
        arrived:  false,
    }
}
