//! CSV stop loader.
//!
//! ```csv
//! id,name,lat,lon
//! 1,Government St & Royal,30.6905,-88.0422
//! 2,Bienville Square,30.6917,-88.0440
//! ```
//!
//! Rows are returned as-is; region filtering and id deduplication happen in
//! [`StopNetwork::sanitise`](crate::StopNetwork::sanitise) on every tick, so
//! the loader does not second-guess the provider.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use tt_core::{GeoPoint, StopId};

use crate::{BusStop, SpatialError};

#[derive(Deserialize)]
struct StopRecord {
    id:   u32,
    name: String,
    lat:  f64,
    lon:  f64,
}

/// Load stops from a CSV file.
pub fn load_stops_csv(path: &Path) -> Result<Vec<BusStop>, SpatialError> {
    let file = std::fs::File::open(path)?;
    load_stops_reader(file)
}

/// Like [`load_stops_csv`] but accepts any `Read` source.
pub fn load_stops_reader<R: Read>(reader: R) -> Result<Vec<BusStop>, SpatialError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let stops = csv_reader
        .deserialize::<StopRecord>()
        .map(|row| {
            let row = row.map_err(|e| SpatialError::Parse(e.to_string()))?;
            Ok(BusStop::new(StopId(row.id), row.name, GeoPoint::new(row.lat, row.lon)))
        })
        .collect::<Result<Vec<_>, SpatialError>>()?;
    debug!(count = stops.len(), "loaded stops");
    Ok(stops)
}
