//! Shared locomotion integration: the actor body both controllers drive.
//!
//! The body owns position, velocity, movement flags, and grounded state,
//! and integrates one frame of movement, jump, gravity, and ground
//! collision against the sphere. The controllers differ only in how they
//! derive the tangent movement directions and the camera pose; the
//! integration itself is identical.

use glam::Vec3;
use starfall_input::MoveAction;
use starfall_world::{SphericalCoord, SphericalWorld};

/// Altitude margin above `player_height` before the actor is considered
/// airborne again. Absorbs floating-point jitter on a flat surface so the
/// grounded flag never oscillates while standing still.
pub(crate) const GROUND_MARGIN: f32 = 0.02;

/// Movement parameters shared by both controllers.
#[derive(Clone, Copy, Debug)]
pub struct LocomotionTuning {
    /// Walk speed in m/s.
    pub walk_speed: f32,
    /// Run speed in m/s.
    pub run_speed: f32,
    /// Instantaneous vertical velocity applied on jump, in m/s.
    pub jump_impulse: f32,
    /// Eye/anchor height above the surface; the ground-clamp altitude.
    pub player_height: f32,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            walk_speed: 4.3,
            run_speed: 8.0,
            jump_impulse: 5.0,
            player_height: 1.8,
        }
    }
}

/// Look/orbit input parameters.
#[derive(Clone, Copy, Debug)]
pub struct LookTuning {
    /// Radians of rotation per device delta unit.
    pub sensitivity: f32,
    /// Invert the vertical axis.
    pub invert_y: bool,
    /// Pitch clamp in radians; symmetric about the horizon.
    pub pitch_limit: f32,
}

impl LookTuning {
    /// Defaults for first-person mouse look (near-vertical pitch range).
    #[must_use]
    pub fn first_person() -> Self {
        Self {
            sensitivity: 0.003,
            invert_y: false,
            pitch_limit: 89.0_f32.to_radians(),
        }
    }

    /// Defaults for third-person orbit (narrower pitch range so the rig
    /// never flips over the actor).
    #[must_use]
    pub fn third_person() -> Self {
        Self {
            sensitivity: 0.005,
            invert_y: false,
            pitch_limit: 60.0_f32.to_radians(),
        }
    }
}

/// Outcome of one integration step, for the avatar push.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct StepOutcome {
    /// Horizontal movement direction this frame (unit or zero).
    pub moved: Vec3,
    /// Whether the jump impulse fired this frame.
    pub jumped: bool,
}

/// The actor's physical state and its per-frame integration.
#[derive(Clone, Debug)]
pub(crate) struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub running: bool,
    pub jump_queued: bool,
    pub grounded: bool,
    pub initialized: bool,
}

impl Body {
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            move_forward: false,
            move_backward: false,
            move_left: false,
            move_right: false,
            running: false,
            jump_queued: false,
            grounded: false,
            initialized: false,
        }
    }

    /// Fold a movement key edge into the flags.
    pub fn apply_move(&mut self, action: MoveAction, pressed: bool) {
        match action {
            MoveAction::Forward => self.move_forward = pressed,
            MoveAction::Backward => self.move_backward = pressed,
            MoveAction::Left => self.move_left = pressed,
            MoveAction::Right => self.move_right = pressed,
            MoveAction::Run => self.running = pressed,
            MoveAction::Jump => self.jump_queued = pressed,
        }
    }

    /// Reset to a fresh state at `position`.
    pub fn place(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.grounded = false;
        self.initialized = true;
    }

    /// Clear input flags (used on dispose so a stale held key cannot move
    /// a re-initialized controller).
    pub fn clear_input(&mut self) {
        self.move_forward = false;
        self.move_backward = false;
        self.move_left = false;
        self.move_right = false;
        self.running = false;
        self.jump_queued = false;
    }

    /// Integrate one frame of movement, jump, gravity, and ground
    /// collision.
    ///
    /// `move_dir_forward` / `move_dir_right` are tangent-plane unit
    /// directions derived from the controller's view yaw; pitch has
    /// already been projected out, so looking up or down never changes
    /// walking speed or heading.
    pub fn step(
        &mut self,
        world: &SphericalWorld,
        move_dir_forward: Vec3,
        move_dir_right: Vec3,
        tuning: &LocomotionTuning,
        dt: f32,
    ) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if !self.initialized {
            return outcome;
        }

        let up = world.up_at(self.position);

        // Sum the active flags into a raw tangent movement vector.
        let mut movement = Vec3::ZERO;
        if self.move_forward {
            movement += move_dir_forward;
        }
        if self.move_backward {
            movement -= move_dir_forward;
        }
        if self.move_right {
            movement += move_dir_right;
        }
        if self.move_left {
            movement -= move_dir_right;
        }
        outcome.moved = movement.normalize_or_zero();

        let speed = if self.running {
            tuning.run_speed
        } else {
            tuning.walk_speed
        };
        let step_vec = outcome.moved * speed * dt;

        // Jump sets the vertical velocity component, it does not add to it.
        if self.jump_queued && self.grounded {
            let vertical = self.velocity.dot(up);
            self.velocity += up * (tuning.jump_impulse - vertical);
            self.grounded = false;
            self.jump_queued = false;
            outcome.jumped = true;
        }

        // Gravity acts every frame; the ground clamp is what cancels it.
        self.velocity -= up * world.gravity() * dt;

        self.position += step_vec;
        self.position += self.velocity * dt;

        // Ground collision by altitude, not by any flat plane.
        let coord = world.to_spherical(self.position);
        if coord.altitude <= tuning.player_height {
            self.position = world.to_cartesian(SphericalCoord::new(
                coord.lat,
                coord.lon,
                tuning.player_height,
            ));
            let up_after = world.up_at(self.position);
            let inward = self.velocity.dot(up_after);
            if inward < 0.0 {
                self.velocity -= up_after * inward;
            }
            self.grounded = true;
        } else if coord.altitude > tuning.player_height + GROUND_MARGIN {
            self.grounded = false;
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> SphericalWorld {
        SphericalWorld::new(100.0, 9.8, 16.0)
    }

    fn tuning() -> LocomotionTuning {
        LocomotionTuning::default()
    }

    /// A body placed on the surface at the equator, settled onto the
    /// ground by one input-free step.
    fn settled_body(world: &SphericalWorld) -> Body {
        let mut body = Body::new();
        body.place(world.surface_point(0.0, 0.0, tuning().player_height));
        let frame = world.frame_at(body.position);
        body.step(world, frame.forward, frame.right, &tuning(), DT);
        assert!(body.grounded, "body should settle in one frame");
        body
    }

    #[test]
    fn test_uninitialized_body_does_not_move() {
        let w = world();
        let mut body = Body::new();
        body.move_forward = true;
        let outcome = body.step(&w, Vec3::X, Vec3::Z, &tuning(), DT);
        assert_eq!(body.position, Vec3::ZERO);
        assert_eq!(outcome.moved, Vec3::ZERO);
    }

    #[test]
    fn test_gravity_converges_to_ground_without_oscillating() {
        let w = world();
        let mut body = Body::new();
        body.place(w.surface_point(0.3, 0.5, 10.0));

        let frame = w.frame_at(body.position);
        let mut grounded_at = None;
        for i in 0..600 {
            body.step(&w, frame.forward, frame.right, &tuning(), DT);
            if body.grounded && grounded_at.is_none() {
                grounded_at = Some(i);
            }
            if let Some(landed) = grounded_at {
                assert!(
                    body.grounded,
                    "grounded state oscillated at frame {i} (landed at {landed})"
                );
            }
        }
        let landed = grounded_at.expect("never reached the ground");
        assert!(landed < 200, "took too long to land: {landed} frames");
        let alt = w.to_spherical(body.position).altitude;
        assert!(
            (alt - tuning().player_height).abs() < 1e-3,
            "settled at wrong altitude {alt}"
        );
    }

    #[test]
    fn test_altitude_never_below_player_height_after_step() {
        let w = world();
        let mut body = Body::new();
        // Start just above the ground with a hard downward velocity.
        body.place(w.surface_point(0.0, 0.0, tuning().player_height + 0.2));
        let up = w.up_at(body.position);
        body.velocity = -up * 50.0;

        let frame = w.frame_at(body.position);
        body.step(&w, frame.forward, frame.right, &tuning(), DT);
        let alt = w.to_spherical(body.position).altitude;
        assert!(
            alt >= tuning().player_height - 1e-4,
            "tunneled through the surface: altitude {alt}"
        );
    }

    #[test]
    fn test_landing_snaps_and_projects_velocity() {
        // Airborne with downward velocity 2.0, gravity 9.8, dt 0.1,
        // starting 0.05 above the clamp altitude: one step lands.
        let w = world();
        let mut body = Body::new();
        body.place(w.surface_point(0.2, 0.8, tuning().player_height + 0.05));
        let up = w.up_at(body.position);
        body.velocity = -up * 2.0;

        let frame = w.frame_at(body.position);
        body.step(&w, frame.forward, frame.right, &tuning(), 0.1);

        let coord = w.to_spherical(body.position);
        assert!(
            (coord.altitude - tuning().player_height).abs() < 1e-3,
            "altitude should snap to player height, got {}",
            coord.altitude
        );
        assert!(body.grounded);
        let up_after = w.up_at(body.position);
        assert!(
            body.velocity.dot(up_after) >= -1e-4,
            "inward velocity survived the landing"
        );
    }

    #[test]
    fn test_jump_sets_vertical_velocity_instantaneously() {
        let w = world();
        let mut body = settled_body(&w);
        body.jump_queued = true;

        let frame = w.frame_at(body.position);
        let outcome = body.step(&w, frame.forward, frame.right, &tuning(), DT);
        assert!(outcome.jumped);
        assert!(!body.jump_queued, "jump flag should be consumed");

        let up = w.up_at(body.position);
        let vertical = body.velocity.dot(up);
        let expected = tuning().jump_impulse - w.gravity() * DT;
        assert!(
            (vertical - expected).abs() < 0.1,
            "vertical velocity {vertical}, expected about {expected}"
        );
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let w = world();
        let mut body = Body::new();
        body.place(w.surface_point(0.0, 0.0, 20.0));
        body.jump_queued = true;

        let frame = w.frame_at(body.position);
        let outcome = body.step(&w, frame.forward, frame.right, &tuning(), DT);
        assert!(!outcome.jumped);
        assert!(body.jump_queued, "flag stays queued until grounded");
    }

    #[test]
    fn test_run_flag_scales_speed() {
        let w = world();
        let mut walk_body = settled_body(&w);
        let mut run_body = walk_body.clone();
        walk_body.move_forward = true;
        run_body.move_forward = true;
        run_body.running = true;

        let frame = w.frame_at(walk_body.position);
        let start = walk_body.position;
        walk_body.step(&w, frame.forward, frame.right, &tuning(), DT);
        run_body.step(&w, frame.forward, frame.right, &tuning(), DT);

        let walked = (walk_body.position - start).length();
        let ran = (run_body.position - start).length();
        let ratio = ran / walked;
        let expected = tuning().run_speed / tuning().walk_speed;
        assert!(
            (ratio - expected).abs() < 0.05,
            "run/walk ratio {ratio}, expected {expected}"
        );
    }

    #[test]
    fn test_clear_input_releases_all_flags() {
        let mut body = Body::new();
        body.apply_move(MoveAction::Forward, true);
        body.apply_move(MoveAction::Run, true);
        body.apply_move(MoveAction::Jump, true);
        body.clear_input();
        assert!(!body.move_forward);
        assert!(!body.running);
        assert!(!body.jump_queued);
    }
}
