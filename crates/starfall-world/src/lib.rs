//! Sphere geometry provider for planet-surface locomotion.
//!
//! [`SphericalWorld`] answers every geometric question the locomotion and
//! camera systems ask: the local reference frame at a point, conversions
//! between Cartesian positions and planet-relative spherical coordinates,
//! and the world constants (gravity magnitude, chunk size). It holds no
//! per-actor state; every query is a pure function of the input position.

mod frame;
mod sphere;
mod terrain;

pub use frame::LocalFrame;
pub use sphere::{SphericalCoord, SphericalWorld};
pub use terrain::{ObstructionQuery, OpenSky};
