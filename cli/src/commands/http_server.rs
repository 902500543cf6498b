//! HTTP服务器命令处理器

use crate::commands::cli::Args;
use crate::http::{
    server::{self, ServerConfig},
    AppState,
};
use deploy_hook_core::api::{load_from, CliError};

/// 处理服务器启动：合并配置（CLI 参数 > 环境变量 > 配置文件）并启动服务器
pub async fn handle_http_server(args: Args) -> Result<(), CliError> {
    let mut cfg = load_from(&args.config)?;
    args.apply_to(&mut cfg);

    let state = AppState::new(&cfg.deploy);
    let config = ServerConfig {
        host: cfg.http_server.host.clone(),
        port: cfg.http_server.port,
        debug: args.debug,
    };

    tracing::info!(
        "Starting deploy hook on {} (workdir: {}, remote: {})",
        config.addr(),
        cfg.deploy.workdir.display(),
        cfg.deploy.remote
    );

    server::start_server(config, state).await
}
