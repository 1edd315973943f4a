//! Third-person camera rig: smoothed orbit distance, obstruction clamp,
//! follow smoothing, and up-vector alignment.

use glam::Vec3;
use starfall_world::{ObstructionQuery, SphericalWorld};

use crate::pose::CameraPose;

/// Fixed rig geometry and smoothing rates.
#[derive(Clone, Copy, Debug)]
pub struct RigParams {
    /// Closest allowed orbit distance in meters.
    pub min_distance: f32,
    /// Farthest allowed orbit distance in meters.
    pub max_distance: f32,
    /// Meters of distance change per zoom input unit.
    pub zoom_sensitivity: f32,
    /// Exponential rate at which the live distance chases the target.
    pub zoom_rate: f32,
    /// Exponential rate at which the camera position chases its candidate.
    pub follow_rate: f32,
    /// Exponential rate for up-vector alignment across large jumps.
    pub up_rate: f32,
    /// Pivot height above the actor position, along local up.
    pub rig_height: f32,
    /// Look-at point height above the actor position, along local up.
    pub look_at_height: f32,
    /// Dot product above which the camera up snaps to the actor up
    /// instead of interpolating.
    pub up_snap_threshold: f32,
    /// Margin kept between the camera and an obstructing surface.
    pub collision_padding: f32,
}

impl Default for RigParams {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 20.0,
            zoom_sensitivity: 1.0,
            zoom_rate: 8.0,
            follow_rate: 12.0,
            up_rate: 5.0,
            rig_height: 1.5,
            look_at_height: 1.2,
            up_snap_threshold: 0.999,
            collision_padding: 0.2,
        }
    }
}

/// Owns the smoothed camera placement state for the third-person view.
///
/// The rig is updated after the actor integrates each frame; it converges
/// toward its targets at fixed rates rather than snapping, so terrain
/// bumps and zoom input never jolt the camera.
#[derive(Clone, Debug)]
pub struct CameraRig {
    params: RigParams,
    distance: f32,
    target_distance: f32,
    camera_position: Vec3,
    camera_up: Vec3,
    primed: bool,
}

impl CameraRig {
    /// Create a rig starting at `initial_distance` (clamped to the
    /// configured range).
    #[must_use]
    pub fn new(params: RigParams, initial_distance: f32) -> Self {
        let clamped = initial_distance.clamp(params.min_distance, params.max_distance);
        Self {
            params,
            distance: clamped,
            target_distance: clamped,
            camera_position: Vec3::ZERO,
            camera_up: Vec3::Y,
            primed: false,
        }
    }

    /// Apply zoom input. Positive zooms in. The target distance is
    /// clamped; the live distance follows it smoothly in `update`.
    pub fn zoom(&mut self, delta: f32) {
        self.target_distance = (self.target_distance - delta * self.params.zoom_sensitivity)
            .clamp(self.params.min_distance, self.params.max_distance);
    }

    /// Current smoothed orbit distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Distance the rig is converging toward.
    #[must_use]
    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }

    /// Forget smoothed placement so the next update snaps into place
    /// (used when the actor teleports).
    pub fn reset(&mut self) {
        self.primed = false;
    }

    /// One rig tick: distance smoothing, candidate placement, obstruction
    /// clamp, follow smoothing, up alignment, and the final look-at pose.
    ///
    /// `view_forward` is the pitch-and-yaw camera direction; the camera
    /// sits behind the actor along its negation.
    pub fn update(
        &mut self,
        dt: f32,
        world: &SphericalWorld,
        actor: Vec3,
        view_forward: Vec3,
        obstruction: &dyn ObstructionQuery,
    ) -> CameraPose {
        // Frame-independent exponential convergence, never overshooting.
        self.distance +=
            (self.target_distance - self.distance) * (self.params.zoom_rate * dt).min(1.0);

        let up = world.up_at(actor);
        let pivot = actor + up * self.params.rig_height;
        let Some(back) = (-view_forward).try_normalize() else {
            // Degenerate view direction; hold the previous placement.
            let look_at = actor + up * self.params.look_at_height;
            return CameraPose::look_at(self.camera_position, look_at, self.camera_up);
        };

        // The effective distance never exceeds the first obstruction
        // along the probe from the pivot toward the candidate position.
        let mut effective = self.distance;
        if let Some(hit) = obstruction.first_obstruction(pivot, back, self.distance) {
            effective = (hit - self.params.collision_padding).clamp(0.0, self.distance);
        }
        let candidate = pivot + back * effective;

        if self.primed {
            self.camera_position +=
                (candidate - self.camera_position) * (self.params.follow_rate * dt).min(1.0);

            if self.camera_up.dot(up) >= self.params.up_snap_threshold {
                self.camera_up = up;
            } else {
                self.camera_up = self
                    .camera_up
                    .lerp(up, (self.params.up_rate * dt).min(1.0))
                    .try_normalize()
                    .unwrap_or(up);
            }
        } else {
            self.camera_position = candidate;
            self.camera_up = up;
            self.primed = true;
        }

        let look_at = actor + up * self.params.look_at_height;
        CameraPose::look_at(self.camera_position, look_at, self.camera_up)
    }
}
