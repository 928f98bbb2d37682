//! `tt-agent`: the simulated population.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`agent`]   | `Agent`, `AgentState`, `AgentMode`, `TravelStats`          |
//! | [`builder`] | `PopulationBuilder`, `create_agents`, `HomeSampler`, `AgeMix` |
//!
//! Agents are plain records in a `Vec<Agent>` indexed by `AgentId`.  Each one
//! is touched once per minute by the stepper and never interacts with
//! another.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Schedule generation on Rayon's thread pool.             |
//! | `serde`    | Derives on `AgentState` and `TravelStats`.              |

pub mod agent;
pub mod builder;


pub use agent::{Agent, AgentMode, AgentState, TravelStats};
pub use builder::{AgeMix, HomeSampler, PopulationBuilder, create_agents};
