//! Gesture input: winit touch conversion and pan recognition.

mod pan;
mod touch;

pub use pan::{
    DEFAULT_MINIMUM_TOUCHES, DEFAULT_PAN_SLOP, GestureState, PanConfig, PanGestureEvent,
    PanGestureRecognizer,
};
pub use touch::{TouchEvent, TouchInputHandler, TouchPhase, TouchPoint, from_winit_touch_phase};
