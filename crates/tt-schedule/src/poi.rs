//! Points of interest supplied by the city data provider.

use std::str::FromStr;

use tt_core::{GeoPoint, PoiId};

use crate::ScheduleError;

/// What a point of interest is used for.  Trip policies select destinations
/// by category.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum PoiCategory {
    Education,
    Employment,
    Retail,
    Healthcare,
    Social,
    Leisure,
    Religious,
}

impl PoiCategory {
    pub const ALL: [PoiCategory; 7] = [
        PoiCategory::Education,
        PoiCategory::Employment,
        PoiCategory::Retail,
        PoiCategory::Healthcare,
        PoiCategory::Social,
        PoiCategory::Leisure,
        PoiCategory::Religious,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PoiCategory::Education  => "education",
            PoiCategory::Employment => "employment",
            PoiCategory::Retail     => "retail",
            PoiCategory::Healthcare => "healthcare",
            PoiCategory::Social     => "social",
            PoiCategory::Leisure    => "leisure",
            PoiCategory::Religious  => "religious",
        }
    }
}

impl FromStr for PoiCategory {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PoiCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScheduleError::UnknownCategory(s.to_owned()))
    }
}

impl std::fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A school, workplace, shop, clinic, … that trips can target.
#[derive(Clone, Debug, PartialEq)]
pub struct PointOfInterest {
    pub id:       PoiId,
    pub name:     String,
    pub category: PoiCategory,
    pub pos:      GeoPoint,
}

impl PointOfInterest {
    pub fn new(id: PoiId, name: impl Into<String>, category: PoiCategory, pos: GeoPoint) -> Self {
        Self { id, name: name.into(), category, pos }
    }
}
