//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `deploy_hook_core::api` instead of reaching into internal modules.

pub use crate::config::{load_default, load_from, AppConfig, DeployConfig, HttpServerConfig};
pub use crate::deploy::{resolve_tag, runner_config, DeployPlan, DEFAULT_TAG};
pub use crate::error::{CliError, ConfigError, RunnerError};
pub use crate::runner::{
    exit::exit_code, Command, CommandResult, CommandRunner, OutputTarget, RunOutcome,
    RunnerConfig,
};
