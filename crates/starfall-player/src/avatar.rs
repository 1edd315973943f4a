//! Avatar puppet boundary: the visual body driven by a controller.

use glam::Vec3;

/// Per-frame actor state pushed to the puppet.
///
/// The puppet owns its animation state machine; the controller only feeds
/// it facts and never inspects bones or clips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvatarState {
    /// Actor position (Cartesian, world space).
    pub position: Vec3,
    /// Actor velocity including the vertical component.
    pub velocity: Vec3,
    /// Whether the actor is standing on the surface.
    pub grounded: bool,
    /// Whether a jump impulse fired this frame.
    pub jumping: bool,
}

/// Contract between a locomotion controller and its visual body.
pub trait AvatarPuppet {
    /// One-time placement when the controller is first positioned.
    fn initialize(&mut self, position: Vec3);
    /// Per-frame position update.
    fn set_position(&mut self, position: Vec3);
    /// Horizontal movement direction (unit or zero) and run flag.
    fn set_movement_direction(&mut self, direction: Vec3, running: bool);
    /// Full per-frame state push.
    fn update_state(&mut self, state: &AvatarState);
    /// Show or hide the body (hidden in first-person).
    fn set_visible(&mut self, visible: bool);
    /// Advance the puppet's own animation clock.
    fn update(&mut self, dt: f32);
    /// Release puppet resources. Called at most once per controller.
    fn dispose(&mut self);
}

/// A puppet that renders nothing. Used for headless sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAvatar;

impl AvatarPuppet for NullAvatar {
    fn initialize(&mut self, _position: Vec3) {}
    fn set_position(&mut self, _position: Vec3) {}
    fn set_movement_direction(&mut self, _direction: Vec3, _running: bool) {}
    fn update_state(&mut self, _state: &AvatarState) {}
    fn set_visible(&mut self, _visible: bool) {}
    fn update(&mut self, _dt: f32) {}
    fn dispose(&mut self) {}
}
