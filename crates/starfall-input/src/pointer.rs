//! Frame-coherent pointer state: deltas, buttons, wheel, and capture.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Exclusive-capture state of the pointer.
///
/// First-person look requires exclusive capture. The OS or windowing layer
/// can refuse the grab; that is surfaced as [`CaptureState::Denied`] so the
/// UI can show a "click to recapture" hint. Look input stops flowing until
/// capture is regained; nothing crashes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Pointer is free; deltas feed orbit drags, not look.
    #[default]
    Released,
    /// Exclusive grab held; raw deltas feed first-person look.
    Captured,
    /// A grab attempt was refused. Queryable for a retry hint.
    Denied,
}

/// Accumulates pointer input for one frame.
///
/// Forward winit events via the `on_*` methods, query the accumulated
/// state, then call [`clear_transients`](Self::clear_transients) at end of
/// frame.
#[derive(Clone, Debug, Default)]
pub struct PointerState {
    delta: Vec2,
    scroll: f32,
    orbit_held: bool,
    capture: CaptureState,
}

impl PointerState {
    /// Create a pointer state with no input accumulated and no capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate a raw motion delta (device units).
    pub fn on_motion(&mut self, dx: f64, dy: f64) {
        self.delta += Vec2::new(dx as f32, dy as f32);
    }

    /// Track the orbit trigger button (right button by convention).
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Right {
            self.orbit_held = state == ElementState::Pressed;
        }
    }

    /// Accumulate wheel input, normalizing pixel deltas to lines.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => self.scroll += y,
            MouseScrollDelta::PixelDelta(pos) => self.scroll += (pos.y / 40.0) as f32,
        }
    }

    /// Attempt an exclusive pointer grab on `window`.
    ///
    /// Tries a locked grab first, falls back to confined; on refusal the
    /// state becomes [`CaptureState::Denied`].
    pub fn attempt_capture(&mut self, window: &winit::window::Window) {
        use winit::window::CursorGrabMode;
        let grabbed = window.set_cursor_grab(CursorGrabMode::Locked).is_ok()
            || window.set_cursor_grab(CursorGrabMode::Confined).is_ok();
        if grabbed {
            window.set_cursor_visible(false);
            self.capture = CaptureState::Captured;
        } else {
            self.capture = CaptureState::Denied;
            tracing::warn!("pointer capture refused; look input suspended");
        }
    }

    /// Release an exclusive grab.
    pub fn release_capture(&mut self, window: &winit::window::Window) {
        let _ = window.set_cursor_grab(winit::window::CursorGrabMode::None);
        window.set_cursor_visible(true);
        self.capture = CaptureState::Released;
    }

    /// Set the capture state directly (headless runs and tests).
    pub fn force_capture_state(&mut self, state: CaptureState) {
        self.capture = state;
    }

    /// Current capture state.
    #[must_use]
    pub fn capture(&self) -> CaptureState {
        self.capture
    }

    /// Motion delta accumulated since the last clear.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Wheel delta accumulated since the last clear (positive = up).
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Whether the orbit trigger button is currently held.
    #[must_use]
    pub fn orbit_held(&self) -> bool {
        self.orbit_held
    }

    /// Clear per-frame accumulators. Held buttons and capture persist.
    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
    }
}
