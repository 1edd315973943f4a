//! Local reference frame: the orthonormal basis at a point on the sphere.

use glam::Vec3;

/// The `(up, forward, right)` orthonormal basis at a surface point.
///
/// `up` is the surface normal, `forward` points toward the projected world
/// north axis, and `right` completes a right-handed basis
/// (`forward × up = right`). Derived, never stored between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    /// Surface normal: direction from the planet center through the point.
    pub up: Vec3,
    /// Tangent direction toward the projected north axis.
    pub forward: Vec3,
    /// Tangent direction completing the right-handed basis.
    pub right: Vec3,
}

impl LocalFrame {
    /// Largest absolute deviation from orthonormality across the basis.
    ///
    /// Zero for a perfect frame. Used by tests and debug assertions.
    #[must_use]
    pub fn orthonormality_error(&self) -> f32 {
        let dot_uf = self.up.dot(self.forward).abs();
        let dot_ur = self.up.dot(self.right).abs();
        let dot_fr = self.forward.dot(self.right).abs();
        let len_err = [(self.up), (self.forward), (self.right)]
            .iter()
            .map(|v| (v.length() - 1.0).abs())
            .fold(0.0_f32, f32::max);
        dot_uf.max(dot_ur).max(dot_fr).max(len_err)
    }
}
