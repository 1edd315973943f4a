//! First-person locomotion controller: the camera is the actor.

use std::sync::Arc;

use glam::{Quat, Vec3};
use starfall_input::InputEvent;
use starfall_world::SphericalWorld;

use crate::avatar::{AvatarPuppet, AvatarState};
use crate::locomotion::{Body, LocomotionTuning, LookTuning};
use crate::pose::CameraPose;

/// Walks, runs, and jumps on the sphere with mouse look; the camera pose
/// is identical to the actor pose. The avatar's own body is hidden so it
/// never blocks the view.
pub struct FirstPersonController {
    world: Arc<SphericalWorld>,
    body: Body,
    yaw: f32,
    pitch: f32,
    look: LookTuning,
    tuning: LocomotionTuning,
    avatar: Option<Box<dyn AvatarPuppet>>,
    avatar_initialized: bool,
    pose: CameraPose,
}

impl FirstPersonController {
    /// Create a controller over `world`. The controller is inert until
    /// [`set_position`](Self::set_position) is called.
    #[must_use]
    pub fn new(
        world: Arc<SphericalWorld>,
        tuning: LocomotionTuning,
        look: LookTuning,
        avatar: Option<Box<dyn AvatarPuppet>>,
    ) -> Self {
        Self {
            world,
            body: Body::new(),
            yaw: 0.0,
            pitch: 0.0,
            look,
            tuning,
            avatar,
            avatar_initialized: false,
            pose: CameraPose::default(),
        }
    }

    /// Fold one typed input event into the controller state. Movement
    /// edges set flags; `Look` deltas rotate yaw/pitch. Orbit and zoom
    /// events belong to the third-person controller and are ignored.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Move { action, pressed } => self.body.apply_move(action, pressed),
            InputEvent::Look { dx, dy } => {
                let vertical = if self.look.invert_y { -dy } else { dy };
                self.yaw -= dx * self.look.sensitivity;
                self.pitch -= vertical * self.look.sensitivity;
                self.pitch = self.pitch.clamp(-self.look.pitch_limit, self.look.pitch_limit);
            }
            InputEvent::Orbit { .. } | InputEvent::Zoom { .. } | InputEvent::ToggleView => {}
        }
    }

    /// (Re)initialize the controller at an explicit world position. The
    /// local frame is recomputed and the puppet is placed and hidden
    /// (first-person hides its own body).
    pub fn set_position(&mut self, position: Vec3) {
        self.body.place(position);
        if let Some(avatar) = self.avatar.as_mut() {
            if self.avatar_initialized {
                avatar.set_position(position);
            } else {
                avatar.initialize(position);
                self.avatar_initialized = true;
            }
            avatar.set_visible(false);
        }
        self.pose = self.pose_at(position);
    }

    /// One frame of integration. A no-op until `set_position` has run.
    pub fn update(&mut self, dt: f32) {
        if !self.body.initialized {
            return;
        }

        let up = self.world.up_at(self.body.position);
        let (view_forward, view_right) = self.view_directions(self.body.position);

        // Project the view directions onto the tangent plane so pitch
        // never changes walking speed or heading.
        let move_forward = (view_forward - up * view_forward.dot(up)).normalize_or_zero();
        let move_right = (view_right - up * view_right.dot(up)).normalize_or_zero();

        let outcome = self
            .body
            .step(&self.world, move_forward, move_right, &self.tuning, dt);

        self.pose = self.pose_at(self.body.position);

        if let Some(avatar) = self.avatar.as_mut() {
            avatar.set_position(self.body.position);
            avatar.set_movement_direction(outcome.moved, self.body.running);
            avatar.update_state(&AvatarState {
                position: self.body.position,
                velocity: self.body.velocity,
                grounded: self.body.grounded,
                jumping: outcome.jumped,
            });
            avatar.update(dt);
        }
    }

    /// The camera pose the controller would produce at `position` with
    /// its current yaw and pitch. Used for the live pose each frame and
    /// as the transition target when entering first-person.
    #[must_use]
    pub fn pose_at(&self, position: Vec3) -> CameraPose {
        let (forward, right) = self.view_directions(position);
        let up = right.cross(forward);
        CameraPose::from_basis(position, right, up, forward)
    }

    /// Yaw-then-pitch view directions at `position`: yaw rotates about the
    /// local up, pitch about the yaw-rotated right axis, in that order, so
    /// pitch never tilts the yaw axis.
    fn view_directions(&self, position: Vec3) -> (Vec3, Vec3) {
        let frame = self.world.frame_at(position);
        let yaw_rot = Quat::from_axis_angle(frame.up, self.yaw);
        let yawed_right = yaw_rot * frame.right;
        let view_rot = Quat::from_axis_angle(yawed_right, self.pitch) * yaw_rot;
        (view_rot * frame.forward, yawed_right)
    }

    /// Defensive copy of the actor position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Whether the actor is standing on the surface.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    /// Current camera pose.
    #[must_use]
    pub fn camera_pose(&self) -> CameraPose {
        self.pose
    }

    /// Current yaw in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Show or hide the puppet without re-placing it.
    pub fn set_avatar_visible(&mut self, visible: bool) {
        if let Some(avatar) = self.avatar.as_mut() {
            avatar.set_visible(visible);
        }
    }

    /// Release the puppet and clear input flags. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if let Some(mut avatar) = self.avatar.take() {
            avatar.dispose();
        }
        self.body.clear_input();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_input::MoveAction;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> Arc<SphericalWorld> {
        Arc::new(SphericalWorld::new(100.0, 9.8, 16.0))
    }

    fn controller(world: &Arc<SphericalWorld>) -> FirstPersonController {
        FirstPersonController::new(
            world.clone(),
            LocomotionTuning::default(),
            LookTuning::first_person(),
            None,
        )
    }

    /// Place on the surface and run one settle frame so the actor starts
    /// grounded at exactly player height.
    fn settled(world: &Arc<SphericalWorld>) -> FirstPersonController {
        let mut c = controller(world);
        let height = LocomotionTuning::default().player_height;
        c.set_position(world.surface_point(0.0, 0.0, height));
        c.update(DT);
        assert!(c.is_grounded());
        c
    }

    /// Shared recording puppet for visibility/lifecycle assertions.
    #[derive(Default)]
    struct RecordingAvatar {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl AvatarPuppet for RecordingAvatar {
        fn initialize(&mut self, _position: Vec3) {
            self.log.borrow_mut().push("initialize".into());
        }
        fn set_position(&mut self, _position: Vec3) {}
        fn set_movement_direction(&mut self, _direction: Vec3, _running: bool) {}
        fn update_state(&mut self, _state: &AvatarState) {}
        fn set_visible(&mut self, visible: bool) {
            self.log.borrow_mut().push(format!("visible={visible}"));
        }
        fn update(&mut self, _dt: f32) {}
        fn dispose(&mut self) {
            self.log.borrow_mut().push("dispose".into());
        }
    }

    #[test]
    fn test_update_before_set_position_is_a_no_op() {
        let w = world();
        let mut c = controller(&w);
        c.handle_event(&InputEvent::Move {
            action: MoveAction::Forward,
            pressed: true,
        });
        c.update(DT);
        assert_eq!(c.position(), Vec3::ZERO);
    }

    #[test]
    fn test_walk_step_matches_walk_speed() {
        // walk_speed 4.3 at dt 1/60: displacement ≈ 0.0717 along the
        // tangent forward, altitude pinned at player height.
        let w = world();
        let mut c = settled(&w);
        let start = c.position();

        c.handle_event(&InputEvent::Move {
            action: MoveAction::Forward,
            pressed: true,
        });
        c.update(DT);

        let displacement = (c.position() - start).length();
        let expected = 4.3 / 60.0;
        assert!(
            (displacement - expected).abs() < 1e-3,
            "displacement {displacement}, expected {expected}"
        );

        let alt = w.to_spherical(c.position()).altitude;
        let height = LocomotionTuning::default().player_height;
        assert!(
            (alt - height).abs() < 1e-4,
            "altitude drifted to {alt} while walking"
        );

        // Displacement is tangent: no component along the starting up.
        let up = w.up_at(start);
        let radial = (c.position() - start).dot(up);
        assert!(radial.abs() < 1e-2, "walk had radial component {radial}");
    }

    #[test]
    fn test_pitch_alone_produces_no_displacement() {
        let w = world();
        let mut c = settled(&w);
        let start = c.position();

        // Look straight down, then straight up, updating throughout.
        c.handle_event(&InputEvent::Look { dx: 0.0, dy: 400.0 });
        for _ in 0..120 {
            c.update(DT);
        }
        c.handle_event(&InputEvent::Look { dx: 0.0, dy: -800.0 });
        for _ in 0..120 {
            c.update(DT);
        }

        assert!(
            (c.position() - start).length() < 1e-3,
            "pitch-only look moved the actor by {}",
            (c.position() - start).length()
        );
    }

    #[test]
    fn test_pitch_clamps_at_limit() {
        let w = world();
        let mut c = controller(&w);
        c.handle_event(&InputEvent::Look {
            dx: 0.0,
            dy: -100_000.0,
        });
        assert!((c.pitch() - LookTuning::first_person().pitch_limit).abs() < 1e-5);

        c.handle_event(&InputEvent::Look {
            dx: 0.0,
            dy: 200_000.0,
        });
        assert!((c.pitch() + LookTuning::first_person().pitch_limit).abs() < 1e-5);
    }

    #[test]
    fn test_yaw_turns_the_walk_direction() {
        let w = world();
        let mut straight = settled(&w);
        let mut turned = settled(&w);
        let quarter_turn = std::f32::consts::FRAC_PI_2 / LookTuning::first_person().sensitivity;
        turned.handle_event(&InputEvent::Look {
            dx: quarter_turn,
            dy: 0.0,
        });

        let forward = InputEvent::Move {
            action: MoveAction::Forward,
            pressed: true,
        };
        straight.handle_event(&forward);
        turned.handle_event(&forward);
        let start = straight.position();
        straight.update(DT);
        turned.update(DT);

        let a = (straight.position() - start).normalize();
        let b = (turned.position() - start).normalize();
        assert!(
            a.dot(b).abs() < 0.05,
            "quarter-turn walk should be orthogonal, dot = {}",
            a.dot(b)
        );
    }

    #[test]
    fn test_jump_rises_then_lands_without_oscillation() {
        let w = world();
        let mut c = settled(&w);
        c.handle_event(&InputEvent::Move {
            action: MoveAction::Jump,
            pressed: true,
        });
        c.update(DT);
        c.handle_event(&InputEvent::Move {
            action: MoveAction::Jump,
            pressed: false,
        });
        assert!(!c.is_grounded(), "jump should leave the ground");

        let height = LocomotionTuning::default().player_height;
        let peak = (0..300)
            .map(|_| {
                c.update(DT);
                w.to_spherical(c.position()).altitude
            })
            .fold(0.0_f32, f32::max);
        assert!(peak > height + 0.5, "jump peak too low: {peak}");
        assert!(c.is_grounded(), "actor should land again");

        // Settled: further frames keep it grounded at the clamp altitude.
        for _ in 0..60 {
            c.update(DT);
            assert!(c.is_grounded());
        }
    }

    #[test]
    fn test_camera_pose_tracks_actor() {
        let w = world();
        let mut c = settled(&w);
        c.handle_event(&InputEvent::Move {
            action: MoveAction::Forward,
            pressed: true,
        });
        for _ in 0..30 {
            c.update(DT);
        }
        let pose = c.camera_pose();
        assert_eq!(pose.position, c.position());

        // View up stays close to the surface normal while unpitched.
        let up = w.up_at(c.position());
        assert!(pose.up().dot(up) > 0.99);
    }

    #[test]
    fn test_avatar_hidden_on_set_position_and_disposed_once() {
        let w = world();
        let log = Rc::new(RefCell::new(Vec::new()));
        let avatar = RecordingAvatar { log: log.clone() };
        let mut c = FirstPersonController::new(
            w.clone(),
            LocomotionTuning::default(),
            LookTuning::first_person(),
            Some(Box::new(avatar)),
        );
        c.set_position(w.surface_point(0.0, 0.0, 1.8));
        c.dispose();
        c.dispose();
        assert_eq!(
            *log.borrow(),
            vec!["initialize", "visible=false", "dispose"]
        );
    }
}
