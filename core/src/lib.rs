//! Sequential command runner and deploy plan behind the deploy hook.

pub mod api;
pub mod config;
pub mod deploy;
pub mod error;
pub mod runner;
