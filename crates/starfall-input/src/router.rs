//! Translates raw input primitives into the typed event stream.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::bindings::KeyBindings;
use crate::events::{InputEvent, MoveAction};
use crate::pointer::{CaptureState, PointerState};
use crate::touch::{TouchGesture, TouchTracker};

/// Scales a pinch distance (pixels) into wheel-line zoom units.
const PINCH_TO_ZOOM: f32 = 0.02;

/// Owns the trackers and bindings and produces [`InputEvent`]s.
///
/// Key events are translated edge-wise as they arrive; pointer deltas and
/// wheel input are accumulated and folded into at most one `Look`/`Orbit`
/// and one `Zoom` event when [`drain`](Self::drain) is called at frame end.
/// Whether a motion delta becomes look or orbit input depends on the
/// capture state: captured pointers drive first-person look, free pointers
/// drive third-person orbit while the trigger button is held.
#[derive(Debug, Default)]
pub struct InputRouter {
    bindings: KeyBindings,
    pointer: PointerState,
    touch: TouchTracker,
    queue: Vec<InputEvent>,
}

impl InputRouter {
    /// Create a router with the given bindings.
    #[must_use]
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pointer: PointerState::new(),
            touch: TouchTracker::new(),
            queue: Vec::new(),
        }
    }

    /// Ingest a keyboard event. Repeat events are ignored; bound movement
    /// keys become `Move` edges and the toggle key becomes `ToggleView`.
    pub fn on_key(&mut self, key: PhysicalKey, state: ElementState, repeat: bool) {
        if repeat {
            return;
        }
        let PhysicalKey::Code(code) = key else {
            return;
        };
        self.on_key_code(code, state);
    }

    /// Ingest a key event by code (test- and script-friendly).
    pub fn on_key_code(&mut self, code: KeyCode, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        if self.bindings.is_toggle_view(code) {
            if pressed {
                self.queue.push(InputEvent::ToggleView);
            }
            return;
        }
        if let Some(action) = self.bindings.action_for(code) {
            self.queue.push(InputEvent::Move { action, pressed });
        }
    }

    /// Ingest a raw pointer motion delta.
    pub fn on_pointer_motion(&mut self, dx: f64, dy: f64) {
        self.pointer.on_motion(dx, dy);
    }

    /// Ingest a pointer button event.
    pub fn on_pointer_button(&mut self, button: MouseButton, state: ElementState) {
        self.pointer.on_button(button, state);
    }

    /// Ingest a wheel event.
    pub fn on_wheel(&mut self, delta: MouseScrollDelta) {
        self.pointer.on_scroll(delta);
    }

    /// Ingest a touch-down.
    pub fn on_touch_start(&mut self, id: u64, position: Vec2) {
        self.touch.on_start(id, position);
    }

    /// Ingest a touch movement; drags queue orbit deltas, pinches queue zoom.
    pub fn on_touch_move(&mut self, id: u64, position: Vec2) {
        match self.touch.on_move(id, position) {
            Some(TouchGesture::Drag(delta)) => self.queue.push(InputEvent::Orbit {
                dx: delta.x,
                dy: delta.y,
            }),
            Some(TouchGesture::Pinch(delta)) => self.queue.push(InputEvent::Zoom {
                delta: delta * PINCH_TO_ZOOM,
            }),
            None => {}
        }
    }

    /// Ingest a touch-up.
    pub fn on_touch_end(&mut self, id: u64) {
        self.touch.on_end(id);
    }

    /// Attempt an exclusive pointer grab (first-person look).
    pub fn attempt_capture(&mut self, window: &winit::window::Window) {
        self.pointer.attempt_capture(window);
    }

    /// Release the exclusive pointer grab.
    pub fn release_capture(&mut self, window: &winit::window::Window) {
        self.pointer.release_capture(window);
    }

    /// Set the capture state directly (headless runs and tests).
    pub fn force_capture_state(&mut self, state: CaptureState) {
        self.pointer.force_capture_state(state);
    }

    /// Current pointer capture state, for "click to recapture" UI hints.
    #[must_use]
    pub fn capture_state(&self) -> CaptureState {
        self.pointer.capture()
    }

    /// Fold accumulated pointer state into events and return everything
    /// queued this frame. Call once per frame.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        let delta = self.pointer.delta();
        if delta != Vec2::ZERO {
            match self.pointer.capture() {
                CaptureState::Captured => self.queue.push(InputEvent::Look {
                    dx: delta.x,
                    dy: delta.y,
                }),
                CaptureState::Released if self.pointer.orbit_held() => {
                    self.queue.push(InputEvent::Orbit {
                        dx: delta.x,
                        dy: delta.y,
                    });
                }
                // Denied or released without the trigger held: the delta
                // is dropped, not misrouted.
                _ => {}
            }
        }

        let scroll = self.pointer.scroll();
        if scroll != 0.0 {
            self.queue.push(InputEvent::Zoom { delta: scroll });
        }

        self.pointer.clear_transients();
        std::mem::take(&mut self.queue)
    }
}
