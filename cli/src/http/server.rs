//! HTTP服务器生命周期管理

use crate::http::{
    middleware::{create_trace_layer, request_logger},
    routes::create_router,
    AppState,
};
use axum::middleware;
use deploy_hook_core::api::CliError;
use std::future::Future;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// HTTP服务器配置（进程启动时构建一次）
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 4747,
            debug: false,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 启动HTTP服务器，直到收到 Ctrl+C 或 SIGTERM
pub async fn start_server(config: ServerConfig, state: AppState) -> Result<(), CliError> {
    let listener = bind(&config).await?;
    serve(listener, &config, state, shutdown_signal()).await
}

/// 绑定监听地址
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, CliError> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| CliError::Bind {
            addr: config.addr(),
            source,
        })
}

/// 在已绑定的listener上提供服务，`shutdown` 完成后优雅关闭
pub async fn serve<F>(
    listener: TcpListener,
    config: &ServerConfig,
    state: AppState,
    shutdown: F,
) -> Result<(), CliError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let router = create_router(state).layer(middleware::from_fn(request_logger));
    let app = if config.debug {
        router.layer(create_trace_layer())
    } else {
        router
    };

    match listener.local_addr() {
        Ok(addr) => info!("HTTP server listening on http://{} (debug: {})", addr, config.debug),
        Err(e) => warn!("HTTP server listening on unknown address: {}", e),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Starting graceful shutdown...");
        })
        .await
        .map_err(CliError::Server)?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C signal");
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM signal");
        }
    }
}

/// 等待 SIGTERM 信号（Unix系统）
#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            warn!("Failed to setup SIGTERM handler: {}", e);
            std::future::pending::<()>().await
        }
    }
}

/// 非 Unix 系统不支持 SIGTERM，永久等待
#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
