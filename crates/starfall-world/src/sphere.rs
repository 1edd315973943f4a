//! The spherical world: constants and pure geometric queries.

use glam::Vec3;

use crate::frame::LocalFrame;

/// A position expressed relative to the planet: latitude and longitude in
/// radians, altitude in meters above the sphere surface.
///
/// Altitude is the distance from the planet center minus the radius. It is
/// the sole ground-collision signal; there is no flat-world Y plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalCoord {
    /// Latitude in radians, range `[-π/2, π/2]`. Positive = toward +Y pole.
    pub lat: f32,
    /// Longitude in radians, range `(-π, π]`.
    pub lon: f32,
    /// Meters above the sphere surface. Negative means below it.
    pub altitude: f32,
}

impl SphericalCoord {
    /// Create a coordinate from latitude, longitude (radians) and altitude.
    #[must_use]
    pub fn new(lat: f32, lon: f32, altitude: f32) -> Self {
        Self { lat, lon, altitude }
    }
}

/// Immutable per-session planet geometry.
///
/// Centered at the world origin. Shared across controllers by reference
/// (`Arc`), constructed once from configuration. All query methods are pure
/// functions of the input position; nothing here is mutated per frame.
#[derive(Clone, Debug)]
pub struct SphericalWorld {
    radius: f32,
    gravity: f32,
    chunk_size: f32,
}

/// Below this squared distance from the center a position has no defined
/// surface normal. Reaching it is a programming error, not a runtime state:
/// gravity pulls actors toward the surface, never through it.
const CENTER_EPSILON_SQ: f32 = 1e-12;

/// `|up · Y|` above which the Y axis no longer yields a usable tangent
/// reference and the frame falls back to the X axis (polar degeneracy).
const POLE_THRESHOLD: f32 = 0.9999;

impl SphericalWorld {
    /// Create a planet with the given surface radius, gravity magnitude,
    /// and terrain chunk size (all in meters / m·s⁻²).
    #[must_use]
    pub fn new(radius: f32, gravity: f32, chunk_size: f32) -> Self {
        assert!(radius > 0.0, "planet radius must be positive");
        Self {
            radius,
            gravity,
            chunk_size,
        }
    }

    /// Surface radius in meters.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Gravity magnitude in m/s². The direction is always `-up` at the
    /// queried position, never a fixed global vector.
    #[must_use]
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Terrain partition size consumed by streaming collaborators.
    #[must_use]
    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    /// Unit surface normal at `position`: the direction from the planet
    /// center through the point.
    ///
    /// # Panics
    /// Panics if `position` coincides with the planet center.
    #[must_use]
    pub fn up_at(&self, position: Vec3) -> Vec3 {
        assert!(
            position.length_squared() > CENTER_EPSILON_SQ,
            "no surface normal at the planet center"
        );
        position.normalize()
    }

    /// Tangent "forward" direction at `position`: the world north axis
    /// projected onto the tangent plane. Continuous everywhere except the
    /// poles, where the reference switches to the X axis.
    #[must_use]
    pub fn forward_at(&self, position: Vec3) -> Vec3 {
        self.frame_at(position).forward
    }

    /// Tangent "right" direction at `position`, completing the
    /// right-handed basis with `up` and `forward`.
    #[must_use]
    pub fn right_at(&self, position: Vec3) -> Vec3 {
        self.frame_at(position).right
    }

    /// The full `(up, forward, right)` basis at `position`.
    ///
    /// `forward` is the projection of +Y onto the tangent plane (or +X at
    /// the poles), so frames at nearby points vary continuously away from
    /// the polar degeneracy.
    #[must_use]
    pub fn frame_at(&self, position: Vec3) -> LocalFrame {
        let up = self.up_at(position);

        let reference = if up.y.abs() > POLE_THRESHOLD {
            Vec3::X
        } else {
            Vec3::Y
        };

        let forward = (reference - up * reference.dot(up)).normalize();
        let right = forward.cross(up);

        LocalFrame { up, forward, right }
    }

    /// Convert a Cartesian position to planet-relative spherical
    /// coordinates. Inverse of [`to_cartesian`](Self::to_cartesian).
    ///
    /// # Panics
    /// Panics if `position` coincides with the planet center.
    #[must_use]
    pub fn to_spherical(&self, position: Vec3) -> SphericalCoord {
        let distance = position.length();
        assert!(
            distance * distance > CENTER_EPSILON_SQ,
            "no spherical coordinate at the planet center"
        );

        let dir = position / distance;
        SphericalCoord {
            lat: dir.y.clamp(-1.0, 1.0).asin(),
            lon: dir.z.atan2(dir.x),
            altitude: distance - self.radius,
        }
    }

    /// Convert planet-relative spherical coordinates back to a Cartesian
    /// position. Round-trips [`to_spherical`](Self::to_spherical) within
    /// floating-point tolerance.
    #[must_use]
    pub fn to_cartesian(&self, coord: SphericalCoord) -> Vec3 {
        let (sin_lat, cos_lat) = coord.lat.sin_cos();
        let (sin_lon, cos_lon) = coord.lon.sin_cos();
        let dir = Vec3::new(cos_lat * cos_lon, sin_lat, cos_lat * sin_lon);
        dir * (self.radius + coord.altitude)
    }

    /// A point on the surface at the given latitude/longitude, offset by
    /// `altitude` meters. Convenience for spawning actors.
    #[must_use]
    pub fn surface_point(&self, lat: f32, lon: f32, altitude: f32) -> Vec3 {
        self.to_cartesian(SphericalCoord::new(lat, lon, altitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn world() -> SphericalWorld {
        SphericalWorld::new(100.0, 9.8, 16.0)
    }

    /// Sample positions spread over the sphere, away from the poles.
    fn sample_positions() -> Vec<Vec3> {
        let w = world();
        let mut out = Vec::new();
        for lat_step in -3..=3 {
            for lon_step in 0..8 {
                let lat = lat_step as f32 * 0.4;
                let lon = lon_step as f32 * (PI / 4.0) - PI + 0.1;
                out.push(w.surface_point(lat, lon, 2.0));
            }
        }
        out
    }

    #[test]
    fn test_up_points_away_from_center() {
        let w = world();
        let up = w.up_at(Vec3::new(0.0, 120.0, 0.0));
        assert!((up - Vec3::Y).length() < 1e-6);

        let up = w.up_at(Vec3::new(-50.0, 0.0, 0.0));
        assert!((up - Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "planet center")]
    fn test_up_at_center_is_a_programming_error() {
        let w = world();
        let _ = w.up_at(Vec3::ZERO);
    }

    #[test]
    fn test_frame_is_orthonormal_everywhere_sampled() {
        let w = world();
        for pos in sample_positions() {
            let frame = w.frame_at(pos);
            assert!(
                frame.orthonormality_error() < 1e-4,
                "frame at {pos:?} not orthonormal: err = {}",
                frame.orthonormality_error()
            );
        }
    }

    #[test]
    fn test_frame_is_right_handed() {
        let w = world();
        for pos in sample_positions() {
            let frame = w.frame_at(pos);
            let rebuilt_right = frame.forward.cross(frame.up);
            assert!(
                (rebuilt_right - frame.right).length() < 1e-4,
                "handedness broken at {pos:?}"
            );
        }
    }

    #[test]
    fn test_frame_varies_continuously_for_small_steps() {
        let w = world();
        let start = w.surface_point(0.3, 1.0, 0.0);
        let mut prev = w.frame_at(start);
        // Walk a short arc along the surface; each step should barely
        // rotate the frame.
        for i in 1..=100 {
            let lon = 1.0 + i as f32 * 0.001;
            let frame = w.frame_at(w.surface_point(0.3, lon, 0.0));
            assert!(
                (frame.forward - prev.forward).length() < 0.01,
                "forward jumped at step {i}"
            );
            assert!(
                (frame.right - prev.right).length() < 0.01,
                "right jumped at step {i}"
            );
            prev = frame;
        }
    }

    #[test]
    fn test_frame_defined_at_poles() {
        let w = world();
        let north = w.frame_at(Vec3::new(0.0, 100.0, 0.0));
        assert!(north.orthonormality_error() < 1e-4);
        let south = w.frame_at(Vec3::new(0.0, -100.0, 0.0));
        assert!(south.orthonormality_error() < 1e-4);
    }

    #[test]
    fn test_spherical_round_trip() {
        let w = world();
        let samples = [
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -101.5),
            Vec3::new(30.0, 40.0, 50.0),
            Vec3::new(-70.0, 10.0, 68.0),
            Vec3::new(1.0, 150.0, -2.0),
        ];
        for p in samples {
            let back = w.to_cartesian(w.to_spherical(p));
            assert!(
                (back - p).length() < 1e-3,
                "round trip failed for {p:?}: got {back:?}"
            );
        }
    }

    #[test]
    fn test_altitude_is_distance_minus_radius() {
        let w = world();
        let coord = w.to_spherical(Vec3::new(0.0, 0.0, 104.5));
        assert!((coord.altitude - 4.5).abs() < 1e-4);

        let below = w.to_spherical(Vec3::new(90.0, 0.0, 0.0));
        assert!((below.altitude + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_known_coordinates() {
        let w = world();
        // +Y pole: latitude π/2.
        let coord = w.to_spherical(Vec3::new(0.0, 100.0, 0.0));
        assert!((coord.lat - FRAC_PI_2).abs() < 1e-4);

        // 45° north along +X.
        let p = w.surface_point(FRAC_PI_4, 0.0, 0.0);
        let expected = Vec3::new(
            100.0 * FRAC_PI_4.cos(),
            100.0 * FRAC_PI_4.sin(),
            0.0,
        );
        assert!((p - expected).length() < 1e-3);
    }

    #[test]
    fn test_constants_are_exposed() {
        let w = world();
        assert_eq!(w.radius(), 100.0);
        assert_eq!(w.gravity(), 9.8);
        assert_eq!(w.chunk_size(), 16.0);
    }
}
