//! Configuration for the deploy hook.
//!
//! - `types.rs` (data structures + defaults)
//! - `load.rs`  (IO: file loading + env overrides)

mod load;
mod types;

pub use load::{load_default, load_from, DEFAULT_CONFIG_PATH};
pub use types::{AppConfig, DeployConfig, HttpServerConfig};
