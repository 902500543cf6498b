use crate::config::DeployConfig;
use crate::runner::{Command, RunnerConfig};

/// Ref checked out when a request names none.
pub const DEFAULT_TAG: &str = "HEAD";

pub fn resolve_tag(tag: Option<&str>) -> &str {
    tag.unwrap_or(DEFAULT_TAG)
}

/// The fixed command sequence of a deploy: fetch, fetch tags, checkout, the
/// deploy script and the service restart.
#[derive(Debug, Clone)]
pub struct DeployPlan {
    git: String,
    remote: String,
    script: Option<Command>,
    restart: Option<Command>,
}

impl DeployPlan {
    pub fn from_config(cfg: &DeployConfig) -> Self {
        Self {
            git: cfg.git.clone(),
            remote: cfg.remote.clone(),
            script: Command::from_argv(cfg.script.iter().cloned()),
            restart: Command::from_argv(cfg.restart.iter().cloned()),
        }
    }

    pub fn commands(&self, tag: &str) -> Vec<Command> {
        let mut commands = vec![
            Command::new(&self.git).args(["fetch", self.remote.as_str()]),
            Command::new(&self.git).args(["fetch", "--tags", self.remote.as_str()]),
            Command::new(&self.git).args(["checkout", tag]),
        ];
        commands.extend(self.script.iter().cloned());
        commands.extend(self.restart.iter().cloned());
        commands
    }
}

pub fn runner_config(cfg: &DeployConfig) -> RunnerConfig {
    RunnerConfig {
        workdir: cfg.workdir.clone(),
        envs: cfg.env.clone(),
    }
}
