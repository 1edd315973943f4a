//! Key bindings with RON persistence and default fallback.
//!
//! Bindings are stored on disk as a map of action name to key name so the
//! file stays readable and survives winit enum changes. Unknown key names
//! fall back to the default binding with a logged warning rather than
//! failing the load.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;
use winit::keyboard::KeyCode;

use crate::events::MoveAction;

/// Maps movement actions and the view toggle to physical keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    /// Walk forward.
    pub forward: KeyCode,
    /// Walk backward.
    pub backward: KeyCode,
    /// Strafe left.
    pub left: KeyCode,
    /// Strafe right.
    pub right: KeyCode,
    /// Hold to run.
    pub run: KeyCode,
    /// Jump.
    pub jump: KeyCode,
    /// Toggle first-person / third-person view.
    pub toggle_view: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            run: KeyCode::ShiftLeft,
            jump: KeyCode::Space,
            toggle_view: KeyCode::KeyV,
        }
    }
}

/// On-disk representation: action name → key name.
#[derive(Serialize, Deserialize)]
struct NamedBindings(HashMap<String, String>);

impl KeyBindings {
    /// Resolve a key to the action bound to it, if any.
    #[must_use]
    pub fn action_for(&self, key: KeyCode) -> Option<MoveAction> {
        if key == self.forward {
            Some(MoveAction::Forward)
        } else if key == self.backward {
            Some(MoveAction::Backward)
        } else if key == self.left {
            Some(MoveAction::Left)
        } else if key == self.right {
            Some(MoveAction::Right)
        } else if key == self.run {
            Some(MoveAction::Run)
        } else if key == self.jump {
            Some(MoveAction::Jump)
        } else {
            None
        }
    }

    /// Whether `key` is the view-mode toggle.
    #[must_use]
    pub fn is_toggle_view(&self, key: KeyCode) -> bool {
        key == self.toggle_view
    }

    /// Serialize to a RON string of named bindings.
    ///
    /// # Errors
    /// Returns an error if RON serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        let mut map = HashMap::new();
        map.insert("forward".to_string(), key_name(self.forward).to_string());
        map.insert("backward".to_string(), key_name(self.backward).to_string());
        map.insert("left".to_string(), key_name(self.left).to_string());
        map.insert("right".to_string(), key_name(self.right).to_string());
        map.insert("run".to_string(), key_name(self.run).to_string());
        map.insert("jump".to_string(), key_name(self.jump).to_string());
        map.insert(
            "toggle_view".to_string(),
            key_name(self.toggle_view).to_string(),
        );
        ron::ser::to_string_pretty(&NamedBindings(map), ron::ser::PrettyConfig::default())
    }

    /// Parse from a RON string of named bindings. Unknown actions are
    /// ignored; unknown key names keep the default for that action.
    ///
    /// # Errors
    /// Returns an error if the RON itself is malformed.
    pub fn from_ron(contents: &str) -> Result<Self, ron::error::SpannedError> {
        let named: NamedBindings = ron::from_str(contents)?;
        let mut bindings = Self::default();
        for (action, name) in &named.0 {
            let Some(key) = parse_key(name) else {
                warn!("unknown key name {name:?} for action {action:?}; keeping default");
                continue;
            };
            match action.as_str() {
                "forward" => bindings.forward = key,
                "backward" => bindings.backward = key,
                "left" => bindings.left = key,
                "right" => bindings.right = key,
                "run" => bindings.run = key,
                "jump" => bindings.jump = key,
                "toggle_view" => bindings.toggle_view = key,
                other => warn!("unknown action {other:?} in bindings file"),
            }
        }
        Ok(bindings)
    }

    /// Save bindings to a RON file, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Load bindings from a RON file.
    ///
    /// Falls back to [`KeyBindings::default`] on a missing or malformed
    /// file, logging a warning.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_ron(&contents) {
                Ok(bindings) => bindings,
                Err(e) => {
                    warn!("malformed bindings file {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

/// Stable name for a key code, used in the bindings file.
fn key_name(key: KeyCode) -> &'static str {
    match key {
        KeyCode::KeyA => "A",
        KeyCode::KeyB => "B",
        KeyCode::KeyC => "C",
        KeyCode::KeyD => "D",
        KeyCode::KeyE => "E",
        KeyCode::KeyF => "F",
        KeyCode::KeyQ => "Q",
        KeyCode::KeyR => "R",
        KeyCode::KeyS => "S",
        KeyCode::KeyV => "V",
        KeyCode::KeyW => "W",
        KeyCode::KeyX => "X",
        KeyCode::KeyZ => "Z",
        KeyCode::Space => "Space",
        KeyCode::ShiftLeft => "LShift",
        KeyCode::ShiftRight => "RShift",
        KeyCode::ControlLeft => "LCtrl",
        KeyCode::ControlRight => "RCtrl",
        KeyCode::Tab => "Tab",
        KeyCode::ArrowUp => "Up",
        KeyCode::ArrowDown => "Down",
        KeyCode::ArrowLeft => "Left",
        KeyCode::ArrowRight => "Right",
        _ => "Unknown",
    }
}

/// Inverse of [`key_name`]. `None` for unrecognized names.
fn parse_key(name: &str) -> Option<KeyCode> {
    let key = match name {
        "A" => KeyCode::KeyA,
        "B" => KeyCode::KeyB,
        "C" => KeyCode::KeyC,
        "D" => KeyCode::KeyD,
        "E" => KeyCode::KeyE,
        "F" => KeyCode::KeyF,
        "Q" => KeyCode::KeyQ,
        "R" => KeyCode::KeyR,
        "S" => KeyCode::KeyS,
        "V" => KeyCode::KeyV,
        "W" => KeyCode::KeyW,
        "X" => KeyCode::KeyX,
        "Z" => KeyCode::KeyZ,
        "Space" => KeyCode::Space,
        "LShift" => KeyCode::ShiftLeft,
        "RShift" => KeyCode::ShiftRight,
        "LCtrl" => KeyCode::ControlLeft,
        "RCtrl" => KeyCode::ControlRight,
        "Tab" => KeyCode::Tab,
        "Up" => KeyCode::ArrowUp,
        "Down" => KeyCode::ArrowDown,
        "Left" => KeyCode::ArrowLeft,
        "Right" => KeyCode::ArrowRight,
        _ => return None,
    };
    Some(key)
}
