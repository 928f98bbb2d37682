//! CSV point-of-interest loader.
//!
//! # CSV format
//!
//! One row per point of interest:
//!
//! ```csv
//! id,name,category,lat,lon
//! 1,Murphy High,education,30.6870,-88.0850
//! 2,Port Authority,employment,30.6920,-88.0400
//! ```
//!
//! `category` is one of `education`, `employment`, `retail`, `healthcare`,
//! `social`, `leisure`, `religious` (case-insensitive).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use tt_core::{GeoPoint, PoiId};

use crate::{PointOfInterest, ScheduleError};

#[derive(Deserialize)]
struct PoiRecord {
    id:       u32,
    name:     String,
    category: String,
    lat:      f64,
    lon:      f64,
}

/// Load points of interest from a CSV file.
pub fn load_pois_csv(path: &Path) -> Result<Vec<PointOfInterest>, ScheduleError> {
    let file = std::fs::File::open(path)?;
    load_pois_reader(file)
}

/// Like [`load_pois_csv`] but accepts any `Read` source.
pub fn load_pois_reader<R: Read>(reader: R) -> Result<Vec<PointOfInterest>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut pois = Vec::new();

    for result in csv_reader.deserialize::<PoiRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let pos = GeoPoint::new(row.lat, row.lon);
        if !pos.is_finite() {
            return Err(ScheduleError::Parse(format!(
                "point of interest {} has a non-finite coordinate",
                row.id
            )));
        }
        pois.push(PointOfInterest {
            id:       PoiId(row.id),
            name:     row.name,
            category: row.category.parse()?,
            pos,
        });
    }

    debug!(count = pois.len(), "loaded points of interest");
    Ok(pois)
}
