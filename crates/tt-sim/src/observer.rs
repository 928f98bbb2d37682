//! Simulation observer trait for progress reporting and data collection.

use tt_agent::Agent;
use tt_core::Minute;
use tt_flow::{BusRoute, FlowRecorder};

use crate::{SimulationMetrics, StepOutcome};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// minute loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust
/// use tt_core::Minute;
/// use tt_sim::{SimObserver, StepOutcome};
///
/// struct SkippedTicks(u32);
///
/// impl SimObserver for SkippedTicks {
///     fn on_tick_end(&mut self, _minute: Minute, outcome: &StepOutcome) {
///         if !outcome.is_advanced() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each minute, before any agent moves.
    fn on_tick_start(&mut self, _minute: Minute) {}

    /// Called after every agent has been stepped (or the tick was skipped).
    fn on_tick_end(&mut self, _minute: Minute, _outcome: &StepOutcome) {}

    /// Called every `config.snapshot_interval` minutes with the population
    /// and its metrics after that minute's step.
    fn on_snapshot(&mut self, _minute: Minute, _agents: &[Agent], _metrics: &SimulationMetrics) {}

    /// Called once after the final minute, with the day's flow and the
    /// corridors synthesized from it.
    fn on_sim_end(&mut self, _final_minute: Minute, _flow: &FlowRecorder, _routes: &[BusRoute]) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
