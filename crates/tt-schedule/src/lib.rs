//! `tt-schedule`: points of interest, trip policies, and daily schedules.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`poi`]       | `PointOfInterest`, `PoiCategory`                          |
//! | [`trip`]      | `Trip`, `TripPurpose`, `Schedule`                         |
//! | [`policy`]    | `AgeGroup`, `TripPolicy`, `Destination`, per-band tables  |
//! | [`generator`] | `ScheduleGenerator`                                       |
//! | [`loader`]    | `load_pois_csv`, `load_pois_reader`                       |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Day model (summary)
//!
//! Every agent carries one `Schedule` for the simulated day: trips sorted by
//! departure minute-of-day, each naming a destination coordinate and how long
//! the agent dwells there.  Schedules are generated once, at population
//! creation, from the policy table of the agent's age band.

pub mod error;
pub mod generator;
pub mod loader;
pub mod poi;
pub mod policy;
pub mod trip;


pub use error::{ScheduleError, ScheduleResult};
pub use generator::ScheduleGenerator;
pub use loader::{load_pois_csv, load_pois_reader};
pub use poi::{PoiCategory, PointOfInterest};
pub use policy::{AgeGroup, Destination, TripPolicy};
pub use trip::{Schedule, Trip, TripPurpose};
