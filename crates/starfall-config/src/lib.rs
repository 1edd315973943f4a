//! Runtime configuration for the locomotion core.
//!
//! Settings persist to disk as RON files with forward-compatible
//! defaults (missing sections fall back rather than failing the load),
//! and CLI flags override file values via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, InputConfig, PlayerConfig, WorldConfig,
};
pub use error::ConfigError;
