use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http_server: HttpServerConfig,

    #[serde(default)]
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4747
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Where and how a deploy runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,

    /// git binary used for fetch and checkout.
    #[serde(default = "default_git")]
    pub git: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_script")]
    pub script: Vec<String>,

    #[serde(default = "default_restart")]
    pub restart: Vec<String>,

    /// Extra environment entries for every deploy command.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

fn default_workdir() -> PathBuf {
    PathBuf::from("/home/dmp/dmp-graph")
}

fn default_git() -> String {
    "git".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_script() -> Vec<String> {
    vec!["bash".into(), "deploy/deploy.bash".into()]
}

fn default_restart() -> Vec<String> {
    vec!["service".into(), "neo4j".into(), "restart".into()]
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            workdir: default_workdir(),
            git: default_git(),
            remote: default_remote(),
            script: default_script(),
            restart: default_restart(),
            env: HashMap::new(),
        }
    }
}
