//! Touch input conversion from winit.
//!
//! [`TouchInputHandler`] turns winit's per-finger `Touch` events into
//! [`TouchEvent`]s stamped with a monotonic timestamp, which the pan
//! recognizer needs for velocity.

use std::collections::HashMap;
use std::time::Instant;

use swipetab_core::Point;
use winit::event::{Touch, TouchPhase as WinitTouchPhase};

/// Phase of a single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Converts a winit touch phase.
pub fn from_winit_touch_phase(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Started,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Ended,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

/// One finger's state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    /// Position in container coordinates.
    pub position: Point,
    pub phase: TouchPhase,
}

impl TouchPoint {
    pub fn new(id: u64, position: Point, phase: TouchPhase) -> Self {
        Self {
            id,
            position,
            phase,
        }
    }
}

/// A batch of touch point changes that happened at the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub points: Vec<TouchPoint>,
    pub timestamp: Instant,
}

impl TouchEvent {
    pub fn new(point: TouchPoint, timestamp: Instant) -> Self {
        Self {
            points: vec![point],
            timestamp,
        }
    }

    pub fn with_points(points: Vec<TouchPoint>, timestamp: Instant) -> Self {
        Self { points, timestamp }
    }
}

/// Tracks active touches and converts winit events.
#[derive(Debug, Default)]
pub struct TouchInputHandler {
    /// Current position of each active touch.
    active_touches: HashMap<u64, Point>,
}

impl TouchInputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_touch_count(&self) -> usize {
        self.active_touches.len()
    }

    pub fn touch_position(&self, id: u64) -> Option<Point> {
        self.active_touches.get(&id).copied()
    }

    /// Convert a winit touch, stamping it with the current time.
    pub fn handle_touch(&mut self, touch: Touch) -> TouchEvent {
        self.handle_touch_at(touch, Instant::now())
    }

    /// Convert a winit touch that happened at `timestamp`.
    pub fn handle_touch_at(&mut self, touch: Touch, timestamp: Instant) -> TouchEvent {
        let position = Point::new(touch.location.x as f32, touch.location.y as f32);
        self.record(touch.id, from_winit_touch_phase(touch.phase), position, timestamp)
    }

    /// Record a touch change and build the event for it.
    pub fn record(
        &mut self,
        id: u64,
        phase: TouchPhase,
        position: Point,
        timestamp: Instant,
    ) -> TouchEvent {
        match phase {
            TouchPhase::Started => {
                self.active_touches.insert(id, position);
            }
            TouchPhase::Moved => {
                if let Some(current) = self.active_touches.get_mut(&id) {
                    *current = position;
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.active_touches.remove(&id);
            }
        }
        TouchEvent::new(TouchPoint::new(id, position, phase), timestamp)
    }

    /// Forget all active touches.
    pub fn reset(&mut self) {
        self.active_touches.clear();
    }
}
