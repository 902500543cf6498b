pub mod exit;
mod run;
pub mod types;

pub use run::{CommandRunner, RunnerConfig};
pub use types::{Command, CommandResult, OutputTarget, RunOutcome};
