//! Speeds and emission factors used by the stepper.

use tt_core::TravelMode;

/// Per-mode movement parameters.  One tick is one minute, so speeds are
/// converted to km per minute at the point of use.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MobilityParams {
    pub walk_speed_kmh:             f64,
    pub transit_speed_kmh:          f64,
    /// kg CO2 per passenger-km while riding.
    pub transit_emission_kg_per_km: f64,
}

impl Default for MobilityParams {
    fn default() -> Self {
        Self {
            walk_speed_kmh:             TravelMode::Walk.default_speed_kmh(),
            transit_speed_kmh:          TravelMode::Bus.default_speed_kmh(),
            transit_emission_kg_per_km: TravelMode::Bus.default_emission_kg_per_km(),
        }
    }
}

impl MobilityParams {
    pub fn speed_kmh(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Walk => self.walk_speed_kmh,
            TravelMode::Bus  => self.transit_speed_kmh,
        }
    }

    /// Distance covered in one tick.
    #[inline]
    pub fn km_per_minute(&self, mode: TravelMode) -> f64 {
        self.speed_kmh(mode) / 60.0
    }

    pub fn emission_kg_per_km(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Walk => 0.0,
            TravelMode::Bus  => self.transit_emission_kg_per_km,
        }
    }

    /// Speeds finite and positive, emission finite and non-negative.
    pub fn is_valid(&self) -> bool {
        let speed_ok = |s: f64| s.is_finite() && s > 0.0;
        speed_ok(self.walk_speed_kmh)
            && speed_ok(self.transit_speed_kmh)
            && self.transit_emission_kg_per_km.is_finite()
            && self.transit_emission_kg_per_km >= 0.0
    }
}
