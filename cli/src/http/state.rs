//! HTTP服务器共享状态

use std::sync::Arc;

use chrono::{DateTime, Local};
use deploy_hook_core::api::{runner_config, CommandRunner, DeployConfig, DeployPlan};

/// 每个请求共享的只读状态（进程启动时构建一次）
#[derive(Clone)]
pub struct AppState {
    pub runner: Arc<CommandRunner>,
    pub plan: Arc<DeployPlan>,
    pub started_at: DateTime<Local>,
}

impl AppState {
    pub fn new(deploy: &DeployConfig) -> Self {
        Self {
            runner: Arc::new(CommandRunner::new(runner_config(deploy))),
            plan: Arc::new(DeployPlan::from_config(deploy)),
            started_at: Local::now(),
        }
    }
}
