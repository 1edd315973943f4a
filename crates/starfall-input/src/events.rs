//! Typed input events consumed by the locomotion controllers.

use serde::{Deserialize, Serialize};

/// A discrete movement action bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveAction {
    /// Walk toward the view direction.
    Forward,
    /// Walk away from the view direction.
    Backward,
    /// Strafe left.
    Left,
    /// Strafe right.
    Right,
    /// Hold to run instead of walk.
    Run,
    /// Jump (grounded only; queued otherwise).
    Jump,
}

/// One input event with a concrete payload shape per kind.
///
/// Controllers never see raw device APIs; translation from a specific input
/// backend into these events is the router's concern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A movement key transitioned to pressed or released.
    Move {
        /// Which bound action changed.
        action: MoveAction,
        /// `true` on key-down, `false` on key-up.
        pressed: bool,
    },
    /// Pointer look delta, emitted only while the pointer is captured
    /// (first-person mouse look).
    Look {
        /// Horizontal delta in device units.
        dx: f32,
        /// Vertical delta in device units.
        dy: f32,
    },
    /// Drag delta, emitted only while the orbit button or a touch drag is
    /// held (third-person orbit).
    Orbit {
        /// Horizontal delta in device units.
        dx: f32,
        /// Vertical delta in device units.
        dy: f32,
    },
    /// Zoom input in scroll lines / pinch units. Positive zooms in.
    Zoom {
        /// Accumulated zoom delta for the frame.
        delta: f32,
    },
    /// The view-mode toggle key was pressed.
    ToggleView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_event_carries_action_and_edge() {
        let ev = InputEvent::Move {
            action: MoveAction::Forward,
            pressed: true,
        };
        match ev {
            InputEvent::Move { action, pressed } => {
                assert_eq!(action, MoveAction::Forward);
                assert!(pressed);
            }
            _ => panic!("wrong variant"),
        }
    }
}
