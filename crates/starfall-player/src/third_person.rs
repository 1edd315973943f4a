//! Third-person locomotion controller: the camera orbits the actor.

use std::sync::Arc;

use glam::{Quat, Vec3};
use starfall_input::InputEvent;
use starfall_world::{ObstructionQuery, SphericalWorld};

use crate::avatar::{AvatarPuppet, AvatarState};
use crate::locomotion::{Body, LocomotionTuning, LookTuning};
use crate::pose::CameraPose;
use crate::rig::CameraRig;

/// Timestep used when evaluating a single rig tick outside the live
/// frame loop (initial placement and transition targets).
const PREVIEW_DT: f32 = 1.0 / 60.0;

/// Walks, runs, and jumps like the first-person controller, but the view
/// is a rig orbiting the actor: drag-based orbit, wheel/pinch zoom, and a
/// visible avatar body. Movement directions derive from the camera yaw so
/// strafing is always relative to the current view, not the actor facing.
pub struct ThirdPersonController {
    world: Arc<SphericalWorld>,
    body: Body,
    yaw: f32,
    pitch: f32,
    look: LookTuning,
    tuning: LocomotionTuning,
    rig: CameraRig,
    obstruction: Box<dyn ObstructionQuery>,
    avatar: Option<Box<dyn AvatarPuppet>>,
    avatar_initialized: bool,
    pose: CameraPose,
}

impl ThirdPersonController {
    /// Create a controller over `world` with the given rig and terrain
    /// obstruction collaborator. Inert until
    /// [`set_position`](Self::set_position) is called.
    #[must_use]
    pub fn new(
        world: Arc<SphericalWorld>,
        tuning: LocomotionTuning,
        look: LookTuning,
        rig: CameraRig,
        obstruction: Box<dyn ObstructionQuery>,
        avatar: Option<Box<dyn AvatarPuppet>>,
    ) -> Self {
        Self {
            world,
            body: Body::new(),
            yaw: 0.0,
            pitch: 0.0,
            look,
            tuning,
            rig,
            obstruction,
            avatar,
            avatar_initialized: false,
            pose: CameraPose::default(),
        }
    }

    /// Fold one typed input event into the controller state. Orbit drags
    /// rotate the rig; zoom adjusts its target distance. First-person
    /// `Look` events are ignored here.
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Move { action, pressed } => self.body.apply_move(action, pressed),
            InputEvent::Orbit { dx, dy } => {
                let vertical = if self.look.invert_y { -dy } else { dy };
                self.yaw -= dx * self.look.sensitivity;
                self.pitch -= vertical * self.look.sensitivity;
                self.pitch = self.pitch.clamp(-self.look.pitch_limit, self.look.pitch_limit);
            }
            InputEvent::Zoom { delta } => self.rig.zoom(delta),
            InputEvent::Look { .. } | InputEvent::ToggleView => {}
        }
    }

    /// (Re)initialize the controller at an explicit world position. The
    /// rig snaps behind the actor and the puppet is placed and shown.
    pub fn set_position(&mut self, position: Vec3) {
        self.body.place(position);
        self.rig.reset();
        if let Some(avatar) = self.avatar.as_mut() {
            if self.avatar_initialized {
                avatar.set_position(position);
            } else {
                avatar.initialize(position);
                self.avatar_initialized = true;
            }
            avatar.set_visible(true);
        }
        let view_forward = self.view_forward_at(position);
        self.pose = self.rig.update(
            PREVIEW_DT,
            &self.world,
            position,
            view_forward,
            self.obstruction.as_ref(),
        );
    }

    /// One frame: actor integration first, then the rig update. A no-op
    /// until `set_position` has run.
    pub fn update(&mut self, dt: f32) {
        if !self.body.initialized {
            return;
        }

        // Movement from the camera yaw only; pitch is view-only.
        let frame = self.world.frame_at(self.body.position);
        let yaw_rot = Quat::from_axis_angle(frame.up, self.yaw);
        let yawed_forward = yaw_rot * frame.forward;
        let yawed_right = yaw_rot * frame.right;
        let move_forward =
            (yawed_forward - frame.up * yawed_forward.dot(frame.up)).normalize_or_zero();
        let move_right = (yawed_right - frame.up * yawed_right.dot(frame.up)).normalize_or_zero();

        let outcome = self
            .body
            .step(&self.world, move_forward, move_right, &self.tuning, dt);

        // Camera placement runs after the actor has moved.
        let view_forward = self.view_forward_at(self.body.position);
        self.pose = self.rig.update(
            dt,
            &self.world,
            self.body.position,
            view_forward,
            self.obstruction.as_ref(),
        );

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

    /// The pose one rig tick would produce at `position`, without
    /// touching the live rig. Used as the transition target when entering
    /// third-person.
    #[must_use]
    pub fn preview_pose_at(&self, position: Vec3) -> CameraPose {
        let mut rig = self.rig.clone();
        rig.reset();
        rig.update(
            PREVIEW_DT,
            &self.world,
            position,
            self.view_forward_at(position),
            self.obstruction.as_ref(),
        )
    }

    /// Camera view direction at `position`: yaw about the local up, then
    /// pitch about the yaw-rotated right axis.
    fn view_forward_at(&self, position: Vec3) -> Vec3 {
        let frame = self.world.frame_at(position);
        let yaw_rot = Quat::from_axis_angle(frame.up, self.yaw);
        let yawed_right = yaw_rot * frame.right;
        Quat::from_axis_angle(yawed_right, self.pitch) * (yaw_rot * frame.forward)
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

    /// Current orbit yaw in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current orbit pitch in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Current smoothed orbit distance.
    #[must_use]
    pub fn rig_distance(&self) -> f32 {
        self.rig.distance()
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
