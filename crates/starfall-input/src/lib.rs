//! Input translation layer for the locomotion core.
//!
//! The controllers consume one typed event stream ([`InputEvent`]); this
//! crate produces it. Raw winit primitives (key codes, buttons, wheel and
//! touch deltas) flow into the [`InputRouter`], which applies key bindings,
//! the pointer-capture state machine, and touch gesture recognition, and
//! drains a clean event list once per frame.

mod bindings;
mod events;
mod pointer;
mod router;
mod touch;

pub use bindings::KeyBindings;
pub use events::{InputEvent, MoveAction};
pub use pointer::{CaptureState, PointerState};
pub use router::InputRouter;
pub use touch::{TouchGesture, TouchTracker};
