//! Planet-surface locomotion controllers and the view-mode camera system.
//!
//! Two controllers move one avatar over a [`starfall_world::SphericalWorld`]:
//! a first-person controller whose camera is the actor, and a third-person
//! controller that orbits the actor with a collision-aware rig. The
//! [`CameraManager`] owns both, the render-camera pose, and the animated
//! first-person ⇄ third-person transition.

mod avatar;
mod first_person;
mod locomotion;
mod manager;
mod pose;
mod rig;
mod third_person;
mod transition;

pub use avatar::{AvatarPuppet, AvatarState, NullAvatar};
pub use first_person::FirstPersonController;
pub use locomotion::{LocomotionTuning, LookTuning};
pub use manager::{CameraManager, ViewMode};
pub use pose::CameraPose;
pub use rig::{CameraRig, RigParams};
pub use third_person::ThirdPersonController;
pub use transition::{Easing, ModeTransition};
