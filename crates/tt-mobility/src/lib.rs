//! `tt-mobility`: how agents move through a simulated minute.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`movement`] | `move_toward`, `Step`: bounded linear step with snap-on-arrival |
//! | [`params`]   | `MobilityParams`: walking/transit speed, emission factor    |
//! | [`stepper`]  | `AgentStepper`: the per-agent minute state machine          |
//!
//! # Movement model
//!
//! Agents move continuously: each minute a travelling agent advances by
//! `speed / 60` km along a straight line in lat/lon toward its current
//! target (the next stop while riding, the trip destination while walking).
//! A step that would pass the target lands exactly on it.  Waiting at stops
//! is not modeled; an agent boards the moment it activates a trip.

pub mod movement;
pub mod params;
pub mod stepper;


pub use movement::{Step, move_toward};
pub use params::MobilityParams;
pub use stepper::AgentStepper;
