//! Runner launch: plan construction, spawn/wait and exit propagation.
mod plan;
mod runner;
mod startup;

pub use plan::LaunchPlan;
pub use runner::{run_runner, RunnerOutcome};
pub use startup::{run_launch, RuntimeExit};
