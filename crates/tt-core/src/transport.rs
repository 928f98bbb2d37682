//! Travel modes an agent can be using while in motion.

/// How an agent covers ground during a movement step.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMode {
    /// On foot: access, egress, and direct walks.
    Walk,
    /// Riding transit between stops.
    Bus,
}

impl TravelMode {
    /// Default cruising speed in km/h.
    pub fn default_speed_kmh(self) -> f64 {
        match self {
            TravelMode::Walk => 5.0,
            TravelMode::Bus  => 25.0,
        }
    }

    /// Default per-passenger emission factor in kg CO2 per km.
    pub fn default_emission_kg_per_km(self) -> f64 {
        match self {
            TravelMode::Walk => 0.0,
            TravelMode::Bus  => 0.089,
        }
    }

    /// Human-readable label, used in CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walk => "walk",
            TravelMode::Bus  => "bus",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
