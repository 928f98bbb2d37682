//! Geographic coordinate type, haversine distance, and the modeled region.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Movement accounting compares
//! distances after every one-minute step, so single precision would drift
//! measurably over a simulated day.

use crate::{CoreError, CoreResult};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// Linear interpolation in lat/lon space; `t = 0` is `self`, `t = 1` is
    /// `target`.
    #[inline]
    pub fn lerp(self, target: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (target.lat - self.lat) * t,
            lon: self.lon + (target.lon - self.lon) * t,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Region ────────────────────────────────────────────────────────────────────

/// The axis-aligned lat/lon box the simulation is confined to.
///
/// Every coordinate the core produces passes through [`Region::clamp`], so
/// out-of-region and non-finite values never survive a movement step.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Region {
    /// Build a region, rejecting non-finite or inverted bounds.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> CoreResult<Self> {
        let region = Self { min_lat, max_lat, min_lon, max_lon };
        region.validate()?;
        Ok(region)
    }

    /// Check that the bounds are finite and non-inverted.
    pub fn validate(&self) -> CoreResult<()> {
        let bounds = [self.min_lat, self.max_lat, self.min_lon, self.max_lon];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(CoreError::InvalidRegion(format!("non-finite bounds {self:?}")));
        }
        if self.min_lat > self.max_lat || self.min_lon > self.max_lon {
            return Err(CoreError::InvalidRegion(format!("inverted bounds {self:?}")));
        }
        Ok(())
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) * 0.5,
            (self.min_lon + self.max_lon) * 0.5,
        )
    }

    /// `true` if `p` is finite and inside the box (bounds inclusive).
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.is_finite()
            && (self.min_lat..=self.max_lat).contains(&p.lat)
            && (self.min_lon..=self.max_lon).contains(&p.lon)
    }

    /// Clamp `p` into the region.  A non-finite component is replaced by the
    /// corresponding component of the region centre.
    pub fn clamp(&self, p: GeoPoint) -> GeoPoint {
        let c = self.center();
        let lat = if p.lat.is_finite() { p.lat } else { c.lat };
        let lon = if p.lon.is_finite() { p.lon } else { c.lon };
        GeoPoint {
            lat: lat.clamp(self.min_lat, self.max_lat),
            lon: lon.clamp(self.min_lon, self.max_lon),
        }
    }
}
