//! `tt-flow`: demand capture and corridor synthesis.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`recorder`] | `FlowEdge`, `FlowRecorder` (count + hourly histogram)  |
//! | [`route`]    | `BusRoute`, the colour palette                         |
//! | [`synth`]    | `SynthesisConfig`, `synthesize` (greedy chaining)      |
//!
//! The recorder is written by the agent stepper once per hop start and read
//! by the synthesizer.  Neither ever decrements or reorders past data.

pub mod recorder;
pub mod route;
pub mod synth;


pub use recorder::{FlowEdge, FlowRecorder};
pub use route::{BusRoute, ROUTE_PALETTE};
pub use synth::{SynthesisConfig, synthesize};
