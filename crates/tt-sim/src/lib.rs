//! `tt-sim`: the minute loop and everything it carries between ticks.
//!
//! # One tick
//!
//! ```text
//! step_simulation(agents, minute, stops):
//!   ① Sanitise: keep stops inside the region, drop repeated ids;
//!                 fewer than two left → InvalidNetwork, agents untouched.
//!   ② Sync:     rebuild the k-nearest graph and drop memoized paths if
//!                 the stop-set signature changed.
//!   ③ Step:     every agent runs one minute of its state machine,
//!                 recording hop starts in the flow recorder.
//! ```
//!
//! # Crate layout
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`context`] | `SimContext`, `StepOutcome`                             |
//! | [`metrics`] | `SimulationMetrics`, `calculate_metrics`                |
//! | [`sim`]     | `Sim` driver (`run`, `run_ticks`, `tick`, `reset`)      |
//! | [`builder`] | `SimBuilder`, `uniform_in`                              |
//! | [`observer`]| `SimObserver`, `NoopObserver`                           |
//! | [`config`]  | `SimConfig` (JSON-loadable)                             |
//! | [`error`]   | `SimError`, `SimResult<T>`                              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Generates the population's schedules on Rayon's pool.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tt_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let mut sim = SimBuilder::new(SimConfig::default())
//!     .stops(stops)
//!     .pois(pois)
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! println!("{:?}", sim.context.routes());
//! ```

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::{SimBuilder, uniform_in};
pub use config::SimConfig;
pub use context::{SimContext, StepOutcome};
pub use error::{SimError, SimResult};
pub use metrics::{SimulationMetrics, calculate_metrics};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
