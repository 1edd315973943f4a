//! Touch gesture recognition: one-finger orbit drag, two-finger pinch zoom.

use std::collections::HashMap;

use glam::Vec2;

/// A recognized gesture produced by a touch movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchGesture {
    /// Single-finger drag delta (orbit input).
    Drag(Vec2),
    /// Pinch distance change; positive = fingers spreading (zoom in).
    Pinch(f32),
}

/// Tracks active touch points and recognizes orbit/pinch gestures.
///
/// Feed `on_start` / `on_move` / `on_end` from the touch backend; `on_move`
/// returns a gesture when one is recognized. Gesture interpretation resets
/// whenever the finger count changes so a pinch never bleeds into a drag.
#[derive(Clone, Debug, Default)]
pub struct TouchTracker {
    touches: HashMap<u64, Vec2>,
    last_pinch_distance: Option<f32>,
}

impl TouchTracker {
    /// Create a tracker with no active touches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fingers currently down.
    #[must_use]
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    /// Register a touch-down at `position`.
    pub fn on_start(&mut self, id: u64, position: Vec2) {
        self.touches.insert(id, position);
        self.last_pinch_distance = None;
    }

    /// Register a touch movement; returns the recognized gesture, if any.
    /// Movement for a pointer that never touched down is ignored.
    pub fn on_move(&mut self, id: u64, position: Vec2) -> Option<TouchGesture> {
        if !self.touches.contains_key(&id) {
            return None;
        }
        let previous = self.touches.insert(id, position)?;

        match self.touches.len() {
            1 => Some(TouchGesture::Drag(position - previous)),
            2 => {
                let mut points = self.touches.values();
                let a = *points.next()?;
                let b = *points.next()?;
                let distance = (a - b).length();
                let gesture = self
                    .last_pinch_distance
                    .map(|prev| TouchGesture::Pinch(distance - prev));
                self.last_pinch_distance = Some(distance);
                gesture
            }
            _ => None,
        }
    }

    /// Register a touch-up.
    pub fn on_end(&mut self, id: u64) {
        self.touches.remove(&id);
        self.last_pinch_distance = None;
    }
}
