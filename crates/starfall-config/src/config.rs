//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Planet geometry and gravity.
    pub world: WorldConfig,
    /// Movement tuning.
    pub player: PlayerConfig,
    /// Third-person rig and transition tuning.
    pub camera: CameraConfig,
    /// Look/orbit input tuning.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Planet geometry and gravity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Planet surface radius in meters.
    pub radius: f32,
    /// Gravity magnitude in m/s², always directed at the planet center.
    pub gravity: f32,
    /// Terrain chunk size in meters, consumed by streaming collaborators.
    pub chunk_size: f32,
}

/// Movement tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walk speed in m/s.
    pub walk_speed: f32,
    /// Run speed in m/s.
    pub run_speed: f32,
    /// Instantaneous vertical velocity applied on jump, in m/s.
    pub jump_impulse: f32,
    /// Eye height above the surface; the ground-clamp altitude.
    pub player_height: f32,
}

/// Third-person rig and view-transition tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Closest orbit distance in meters.
    pub min_distance: f32,
    /// Farthest orbit distance in meters.
    pub max_distance: f32,
    /// Orbit distance at session start.
    pub default_distance: f32,
    /// Meters of distance change per zoom input unit.
    pub zoom_sensitivity: f32,
    /// Exponential rate at which the live distance chases the target.
    pub zoom_rate: f32,
    /// Exponential rate at which the camera chases its candidate position.
    pub follow_rate: f32,
    /// Exponential rate for camera-up alignment across large jumps.
    pub up_rate: f32,
    /// Rig pivot height above the actor, in meters.
    pub rig_height: f32,
    /// Look-at point height above the actor, in meters.
    pub look_at_height: f32,
    /// Margin kept between the camera and an obstructing surface.
    pub collision_padding: f32,
    /// View-mode transition duration in seconds.
    pub transition_secs: f32,
    /// First-person pitch clamp in degrees.
    pub first_person_pitch_limit_deg: f32,
    /// Third-person orbit pitch clamp in degrees.
    pub third_person_pitch_limit_deg: f32,
}

/// Look/orbit input tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// First-person look sensitivity (radians per device unit).
    pub mouse_sensitivity: f32,
    /// Third-person orbit sensitivity (radians per device unit).
    pub orbit_sensitivity: f32,
    /// Invert the vertical look axis.
    pub invert_y: bool,
}

/// Debug/development settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            gravity: 9.8,
            chunk_size: 16.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.3,
            run_speed: 8.0,
            jump_impulse: 5.0,
            player_height: 1.8,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 20.0,
            default_distance: 6.0,
            zoom_sensitivity: 1.0,
            zoom_rate: 8.0,
            follow_rate: 12.0,
            up_rate: 5.0,
            rig_height: 1.5,
            look_at_height: 1.2,
            collision_padding: 0.2,
            transition_secs: 0.6,
            first_person_pitch_limit_deg: 89.0,
            third_person_pitch_limit_deg: 60.0,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.003,
            orbit_sensitivity: 0.005,
            invert_y: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// The default config directory under the platform config root.
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("starfall")
    }

    /// Load config from the given directory, or create a default config
    /// file there.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or if the default file cannot be written.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;
            info!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            info!("created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    ///
    /// # Errors
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::Write)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;
        std::fs::write(&config_path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .expect("serialize");
        assert!(ron_str.contains("radius: 100.0"));
        assert!(ron_str.contains("walk_speed: 4.3"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).expect("serialize");
        let deserialized: Config = ron::from_str(&ron_str).expect("parse");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(world: (radius: 50.0))";
        let config: Config = ron::from_str(ron_str).expect("parse");
        assert_eq!(config.world.radius, 50.0);
        assert_eq!(config.player, PlayerConfig::default());
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_or_create(dir.path()).expect("create");
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_save_then_load_round_trips_changes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = Config::default();
        config.world.gravity = 3.7;
        config.camera.transition_secs = 1.25;
        config.save(dir.path()).expect("save");

        let loaded = Config::load_or_create(dir.path()).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.ron"), "not ron {{{{").expect("write");
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
