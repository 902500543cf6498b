use clap::Parser;
mod commands;
mod http;
use commands::{cli, http_server};
use deploy_hook_core::api::CliError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let args = cli::Args::parse();

    // RUST_LOG 优先；否则 debug 模式输出 debug 级别日志
    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    http_server::handle_http_server(args).await
}
