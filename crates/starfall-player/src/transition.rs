//! Animated view-mode transition between camera poses.

use crate::manager::ViewMode;
use crate::pose::CameraPose;

/// Easing curves for camera transitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow start, fast end.
    EaseIn,
    /// Fast start, slow end.
    EaseOut,
    /// Symmetric acceleration and deceleration.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map a linear progress value in `[0, 1]` to an eased value.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// An in-flight transition from one camera pose to another.
///
/// Carries its own elapsed-time accumulator and is advanced by the same
/// external frame clock as everything else, so it is testable with
/// synthetic timesteps. It always runs to completion; re-triggering the
/// view toggle while one is active is ignored by the manager.
#[derive(Clone, Debug)]
pub struct ModeTransition {
    from: CameraPose,
    to: CameraPose,
    target_mode: ViewMode,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl ModeTransition {
    /// Create a transition toward `target_mode` over `duration` seconds
    /// (clamped to a minimum so a zero duration still completes cleanly).
    #[must_use]
    pub fn new(from: CameraPose, to: CameraPose, target_mode: ViewMode, duration: f32) -> Self {
        Self {
            from,
            to,
            target_mode,
            duration: duration.max(1e-3),
            elapsed: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    /// Advance by `dt` seconds and return the interpolated pose:
    /// eased-linear for position, shortest-arc spherical for orientation.
    pub fn advance(&mut self, dt: f32) -> CameraPose {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let t = self.easing.apply(self.elapsed / self.duration);
        self.from.interpolate(&self.to, t)
    }

    /// Whether the transition has reached its end pose.
    #[must_use]
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// The mode entered when this transition completes.
    #[must_use]
    pub fn target_mode(&self) -> ViewMode {
        self.target_mode
    }

    /// Seconds elapsed so far.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The end pose.
    #[must_use]
    pub fn end_pose(&self) -> CameraPose {
        self.to
    }
}
