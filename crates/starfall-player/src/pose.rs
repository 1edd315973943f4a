//! Render-camera pose boundary type.

use glam::{Mat3, Quat, Vec3};

/// Position and orientation written to the render camera each frame.
///
/// Projection parameters (FOV, near/far planes) belong to the renderer,
/// not here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Camera position in world space.
    pub position: Vec3,
    /// Camera orientation; local `-Z` is the view direction, `+Y` is up.
    pub rotation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraPose {
    /// Build a pose from an orthonormal view basis.
    #[must_use]
    pub fn from_basis(position: Vec3, right: Vec3, up: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize(),
        }
    }

    /// Build a pose at `eye` looking at `target` with the given up hint.
    ///
    /// Falls back to an identity orientation if `eye` and `target`
    /// coincide or the up hint is parallel to the view direction.
    #[must_use]
    pub fn look_at(eye: Vec3, target: Vec3, up_hint: Vec3) -> Self {
        let Some(forward) = (target - eye).try_normalize() else {
            return Self {
                position: eye,
                rotation: Quat::IDENTITY,
            };
        };
        let Some(right) = forward.cross(up_hint).try_normalize() else {
            return Self {
                position: eye,
                rotation: Quat::IDENTITY,
            };
        };
        let up = right.cross(forward);
        Self::from_basis(eye, right, up, forward)
    }

    /// The view direction (local `-Z`).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The camera up vector (local `+Y`).
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Interpolate toward `other`: linear for position, shortest-arc
    /// spherical for orientation. `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn interpolate(&self, other: &CameraPose, t: f32) -> CameraPose {
        let t = t.clamp(0.0, 1.0);
        CameraPose {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t),
        }
    }
}
