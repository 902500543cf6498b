use std::path::Path;

use crate::error::ConfigError;

use super::types::AppConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const ENV_HOST: &str = "DEPLOY_HOOK_HOST";
const ENV_PORT: &str = "DEPLOY_HOOK_PORT";
const ENV_WORKDIR: &str = "DEPLOY_HOOK_WORKDIR";

/// Loads `config.toml` from the current directory, falling back to defaults.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    load_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// Loads the config at `path` (defaults when the file is absent), then applies
/// `DEPLOY_HOOK_*` overrides from the process environment.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let mut cfg = read_file(path)?;
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok())?;
    validate(&cfg)?;
    Ok(cfg)
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("config file {} not found, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(ENV_HOST) {
        if !v.trim().is_empty() {
            cfg.http_server.host = v.trim().to_string();
        }
    }

    if let Some(v) = lookup(ENV_PORT) {
        if !v.trim().is_empty() {
            cfg.http_server.port = v.trim().parse().map_err(|_| ConfigError::EnvInvalid {
                key: ENV_PORT.to_string(),
                value: v.clone(),
            })?;
        }
    }

    if let Some(v) = lookup(ENV_WORKDIR) {
        if !v.trim().is_empty() {
            cfg.deploy.workdir = v.trim().into();
        }
    }

    Ok(())
}

pub(crate) fn validate(cfg: &AppConfig) -> Result<(), ConfigError> {
    if cfg.deploy.git.trim().is_empty() {
        return Err(ConfigError::Validation("deploy.git must not be empty".into()));
    }
    if cfg.deploy.remote.trim().is_empty() {
        return Err(ConfigError::Validation(
            "deploy.remote must not be empty".into(),
        ));
    }
    Ok(())
}
