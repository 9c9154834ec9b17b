//! Small helpers shared by the workspace crates: environment access and
//! TOML configuration loading with structured errors.

pub mod config;
pub mod env;
