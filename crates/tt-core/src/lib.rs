//! `tt-core`: foundational types for the transit twin workspace.
//!
//! This crate is a dependency of every other `tt-*` crate.  It has no `tt-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StopId`, `PoiId`                          |
//! | [`geo`]         | `GeoPoint`, haversine distance, `Region` clamping     |
//! | [`time`]        | `Minute`, `SimClock`, minute-of-day helpers           |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`transport`]   | `TravelMode` enum and its default speeds              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, Region};
pub use ids::{AgentId, PoiId, StopId};
pub use rng::{AgentRng, SimRng};
pub use time::{HOURS_PER_DAY, MINUTES_PER_DAY, Minute, SimClock};
pub use transport::TravelMode;
