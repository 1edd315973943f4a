//! Camera manager: the first-person ⇄ third-person state machine.

use glam::Vec3;
use starfall_input::InputEvent;
use tracing::{debug, info};

use crate::first_person::FirstPersonController;
use crate::pose::CameraPose;
use crate::third_person::ThirdPersonController;
use crate::transition::ModeTransition;

/// The active camera view mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    /// Camera is the actor's eyes; avatar body hidden.
    FirstPerson,
    /// Camera orbits the actor; avatar body visible.
    ThirdPerson,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            ViewMode::FirstPerson => ViewMode::ThirdPerson,
            ViewMode::ThirdPerson => ViewMode::FirstPerson,
        }
    }
}

/// Owns the render-camera pose, both locomotion controllers, and the
/// animated transition between view modes.
///
/// Per frame: forward the drained input events via
/// [`handle_event`](Self::handle_event), then call
/// [`update`](Self::update) once. While a transition is in flight the
/// controllers receive events (no input is lost) but no `update` calls,
/// so the camera interpolates instead of snapping; the toggle is ignored
/// until the transition completes.
pub struct CameraManager {
    first_person: FirstPersonController,
    third_person: ThirdPersonController,
    mode: ViewMode,
    transition: Option<ModeTransition>,
    transition_duration: f32,
    pose: CameraPose,
    mode_listeners: Vec<Box<dyn FnMut(ViewMode)>>,
}

impl CameraManager {
    /// Create a manager over the two controllers, starting in
    /// `initial_mode` with the given transition duration in seconds.
    #[must_use]
    pub fn new(
        first_person: FirstPersonController,
        third_person: ThirdPersonController,
        initial_mode: ViewMode,
        transition_duration: f32,
    ) -> Self {
        Self {
            first_person,
            third_person,
            mode: initial_mode,
            transition: None,
            transition_duration,
            pose: CameraPose::default(),
            mode_listeners: Vec::new(),
        }
    }

    /// Register a typed callback fired when a mode transition completes.
    pub fn on_mode_changed(&mut self, listener: impl FnMut(ViewMode) + 'static) {
        self.mode_listeners.push(Box::new(listener));
    }

    /// Place both controllers at an explicit world position and show the
    /// puppet state appropriate for the current mode.
    pub fn set_position(&mut self, position: Vec3) {
        self.first_person.set_position(position);
        self.third_person.set_position(position);
        match self.mode {
            ViewMode::FirstPerson => {
                self.third_person.set_avatar_visible(false);
                self.pose = self.first_person.camera_pose();
            }
            ViewMode::ThirdPerson => {
                self.first_person.set_avatar_visible(false);
                self.pose = self.third_person.camera_pose();
            }
        }
    }

    /// Fold one typed input event into the system. The toggle drives the
    /// state machine; everything else reaches both controllers so held
    /// keys survive a mode swap.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if matches!(event, InputEvent::ToggleView) {
            self.toggle_view();
            return;
        }
        self.first_person.handle_event(event);
        self.third_person.handle_event(event);
    }

    /// Begin a transition to the other view mode. Ignored while a
    /// transition is already in flight.
    pub fn toggle_view(&mut self) {
        if self.transition.is_some() {
            debug!("view toggle ignored: transition in flight");
            return;
        }

        let shared = self.active_position();
        let entering = self.mode.other();
        let from = self.pose;
        // The target pose is evaluated at the shared position without
        // disturbing the live camera, so the interpolation has a true
        // start point.
        let to = match entering {
            ViewMode::FirstPerson => self.first_person.pose_at(shared),
            ViewMode::ThirdPerson => self.third_person.preview_pose_at(shared),
        };
        self.transition = Some(ModeTransition::new(
            from,
            to,
            entering,
            self.transition_duration,
        ));
        debug!(?entering, "view transition started");
    }

    /// One frame. Advances the transition if one is in flight, otherwise
    /// updates the active controller and reads its camera pose.
    pub fn update(&mut self, dt: f32) {
        if let Some(transition) = self.transition.as_mut() {
            self.pose = transition.advance(dt);
            if transition.finished() {
                let entered = transition.target_mode();
                self.transition = None;
                self.complete_transition(entered);
            }
            return;
        }

        match self.mode {
            ViewMode::FirstPerson => {
                self.first_person.update(dt);
                self.pose = self.first_person.camera_pose();
            }
            ViewMode::ThirdPerson => {
                self.third_person.update(dt);
                self.pose = self.third_person.camera_pose();
            }
        }
    }

    /// Swap the active controller, hand over the shared position, set
    /// puppet visibility for the entered mode, and notify listeners.
    fn complete_transition(&mut self, entered: ViewMode) {
        let shared = self.active_position();
        self.mode = entered;
        match entered {
            ViewMode::FirstPerson => {
                self.first_person.set_position(shared);
                self.third_person.set_avatar_visible(false);
            }
            ViewMode::ThirdPerson => {
                self.third_person.set_position(shared);
                self.first_person.set_avatar_visible(false);
            }
        }
        for listener in &mut self.mode_listeners {
            listener(entered);
        }
        info!(?entered, "view mode changed");
    }

    /// The actor position of whichever controller is currently
    /// authoritative.
    fn active_position(&self) -> Vec3 {
        match self.mode {
            ViewMode::FirstPerson => self.first_person.position(),
            ViewMode::ThirdPerson => self.third_person.position(),
        }
    }

    /// The current render-camera pose.
    #[must_use]
    pub fn camera_pose(&self) -> CameraPose {
        self.pose
    }

    /// The current view mode. Unchanged until a transition completes.
    #[must_use]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Whether a mode transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Seconds elapsed in the in-flight transition, if any.
    #[must_use]
    pub fn transition_elapsed(&self) -> Option<f32> {
        self.transition.as_ref().map(ModeTransition::elapsed)
    }

    /// The in-flight transition's end pose, if any.
    #[must_use]
    pub fn transition_target(&self) -> Option<CameraPose> {
        self.transition.as_ref().map(ModeTransition::end_pose)
    }

    /// The shared actor position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.active_position()
    }

    /// Dispose both controllers. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.first_person.dispose();
        self.third_person.dispose();
    }
}
