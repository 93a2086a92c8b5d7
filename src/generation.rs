//! Angle generation: run state, fan-out executor and the single run entry point.

pub mod executor;
pub mod run;
pub mod state;

pub use executor::GenerationExecutor;
pub use run::{run_generate, GenerateOutcome, GenerateRequest};
pub use state::{progress_percent, ProgressUpdate, RunState};
