//! Terrain obstruction boundary for third-person camera collision.

use glam::Vec3;

/// Answers "what is the first obstruction distance along this ray, if any".
///
/// The camera rig treats terrain as an opaque collaborator: it casts a
/// visibility probe from the actor toward the candidate camera position and
/// clamps the effective distance to the first hit. Implementations own the
/// terrain representation; the rig never inspects it.
pub trait ObstructionQuery {
    /// Distance to the first obstruction along `direction` (unit vector)
    /// from `origin`, limited to `max_distance`. `None` means the ray is
    /// clear for the whole probe length.
    fn first_obstruction(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32>;
}

/// An obstruction query over a world with no occluders.
///
/// Used for headless runs and worlds whose terrain never rises above the
/// camera rig.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenSky;

impl ObstructionQuery for OpenSky {
    fn first_obstruction(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<f32> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_sky_never_obstructs() {
        let sky = OpenSky;
        assert!(
            sky.first_obstruction(Vec3::ZERO, Vec3::X, 1000.0).is_none()
        );
    }
}
