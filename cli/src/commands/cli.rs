use std::path::PathBuf;

use clap::Parser;
use deploy_hook_core::api::AppConfig;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "HTTP-triggered deployment hook")]
pub struct Args {
    /// Verbose mode: debug-level logs and per-request HTTP tracing.
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Config file (TOML). A missing file means built-in defaults.
    #[arg(long, default_value = deploy_hook_core::config::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Directory the deploy commands run in.
    #[arg(long)]
    pub workdir: Option<PathBuf>,
}

impl Args {
    /// CLI flags take precedence over the config file and env overrides.
    pub fn apply_to(&self, cfg: &mut AppConfig) {
        if let Some(host) = &self.host {
            cfg.http_server.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.http_server.port = port;
        }
        if let Some(workdir) = &self.workdir {
            cfg.deploy.workdir = workdir.clone();
        }
    }
}
