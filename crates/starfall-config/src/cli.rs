//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line arguments. CLI values override settings loaded from
/// `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "starfall", about = "Planet-surface locomotion core")]
pub struct CliArgs {
    /// Planet surface radius in meters.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Gravity magnitude in m/s².
    #[arg(long)]
    pub gravity: Option<f32>,

    /// Walk speed in m/s.
    #[arg(long)]
    pub walk_speed: Option<f32>,

    /// Run speed in m/s.
    #[arg(long)]
    pub run_speed: Option<f32>,

    /// View-mode transition duration in seconds.
    #[arg(long)]
    pub transition_secs: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.radius {
            self.world.radius = radius;
        }
        if let Some(gravity) = args.gravity {
            self.world.gravity = gravity;
        }
        if let Some(walk) = args.walk_speed {
            self.player.walk_speed = walk;
        }
        if let Some(run) = args.run_speed {
            self.player.run_speed = run;
        }
        if let Some(secs) = args.transition_secs {
            self.camera.transition_secs = secs;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override_applies_only_given_values() {
        let mut config = Config::default();
        let args = CliArgs {
            gravity: Some(3.7),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.gravity, 3.7);
        assert_eq!(config.debug.log_level, "debug");
        assert_eq!(config.world.radius, Config::default().world.radius);
    }

    #[test]
    fn test_empty_args_change_nothing() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }
}
