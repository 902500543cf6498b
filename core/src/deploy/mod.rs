mod plan;

pub use plan::{resolve_tag, runner_config, DeployPlan, DEFAULT_TAG};
