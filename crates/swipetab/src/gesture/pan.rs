//! Pan gesture recognition.
//!
//! The recognizer follows the centroid of the active touches. A pan is
//! recognized once the centroid moves past the slop distance while the touch
//! count is inside the configured range; from then on every move reports the
//! translation from where the touches went down and a velocity computed from
//! event timestamps.

use std::collections::HashMap;
use std::time::Instant;

use swipetab_core::Point;
use swipetab_core::logging::targets;

use super::touch::{TouchEvent, TouchPhase};

/// Default distance the touches must travel before a pan is recognized.
pub const DEFAULT_PAN_SLOP: f32 = 10.0;

/// Default minimum number of touches for a pan.
pub const DEFAULT_MINIMUM_TOUCHES: usize = 1;

/// Lifecycle stage reported with each pan event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Started,
    Updated,
    Ended,
    Cancelled,
}

/// A recognized pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanGestureEvent {
    pub state: GestureState,
    /// Centroid of the touches.
    pub position: Point,
    /// Offset from where the touches went down.
    pub translation: Point,
    /// Points per second.
    pub velocity: Point,
    /// Touches down when the event was produced.
    pub touch_count: usize,
}

impl PanGestureEvent {
    /// Single-touch event at `translation` from the origin.
    pub fn new(state: GestureState, translation: Point, velocity: Point) -> Self {
        Self {
            state,
            position: translation,
            translation,
            velocity,
            touch_count: 1,
        }
    }
}

/// Recognition parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanConfig {
    pub minimum_touches: usize,
    /// `None` means unbounded.
    pub maximum_touches: Option<usize>,
    pub slop: f32,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            minimum_touches: DEFAULT_MINIMUM_TOUCHES,
            maximum_touches: None,
            slop: DEFAULT_PAN_SLOP,
        }
    }
}

impl PanConfig {
    /// Whether `count` touches may drive a pan.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.minimum_touches && self.maximum_touches.is_none_or(|max| count <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for the touches to pass the slop.
    Possible,
    /// A pan is in progress.
    Recognized,
    /// No pan until every touch lifts.
    Failed,
}

/// Turns touch events into [`PanGestureEvent`]s.
#[derive(Debug)]
pub struct PanGestureRecognizer {
    config: PanConfig,
    enabled: bool,
    touches: HashMap<u64, Point>,
    phase: Phase,
    /// Centroid the translation is measured from.
    anchor: Point,
    translation: Point,
    velocity: Point,
    last_centroid: Point,
    last_timestamp: Option<Instant>,
}

impl Default for PanGestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PanGestureRecognizer {
    pub fn new() -> Self {
        Self::with_config(PanConfig::default())
    }

    pub fn with_config(config: PanConfig) -> Self {
        Self {
            config,
            enabled: true,
            touches: HashMap::new(),
            phase: Phase::Possible,
            anchor: Point::ZERO,
            translation: Point::ZERO,
            velocity: Point::ZERO,
            last_centroid: Point::ZERO,
            last_timestamp: None,
        }
    }

    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    /// Replace the recognition parameters. Takes effect on the next event.
    pub fn set_config(&mut self, config: PanConfig) {
        self.config = config;
    }

    pub fn set_touch_range(&mut self, minimum: usize, maximum: Option<usize>) {
        self.config.minimum_touches = minimum;
        self.config.maximum_touches = maximum;
    }

    pub fn set_slop(&mut self, slop: f32) {
        self.config.slop = slop;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable recognition.
    ///
    /// Disabling during a pan cancels it; the returned event must be
    /// delivered like any other.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<PanGestureEvent> {
        if self.enabled == enabled {
            return None;
        }
        self.enabled = enabled;
        if enabled {
            return None;
        }

        let cancelled =
            (self.phase == Phase::Recognized).then(|| self.event(GestureState::Cancelled));
        self.block_until_lift();
        cancelled
    }

    /// Whether a pan is in progress.
    pub fn is_panning(&self) -> bool {
        self.phase == Phase::Recognized
    }

    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    pub fn translation(&self) -> Point {
        self.translation
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Drop the current pan without reporting it. No new pan starts until
    /// every touch has lifted.
    pub fn reset(&mut self) {
        tracing::debug!(target: targets::GESTURE, touches = self.touches.len(), "pan reset");
        self.block_until_lift();
    }

    /// Feed a touch event, returning the pan events it produced.
    pub fn process_touch(&mut self, event: &TouchEvent) -> Vec<PanGestureEvent> {
        let mut events = Vec::new();
        for point in &event.points {
            match point.phase {
                TouchPhase::Started => {
                    let before = self.centroid();
                    self.touches.insert(point.id, point.position);
                    self.touches_added(before, &mut events);
                }
                TouchPhase::Moved => {
                    let Some(position) = self.touches.get_mut(&point.id) else {
                        continue;
                    };
                    *position = point.position;
                    self.touches_moved(event.timestamp, &mut events);
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    let before = self.centroid();
                    if self.touches.remove(&point.id).is_none() {
                        continue;
                    }
                    let cancelled = point.phase == TouchPhase::Cancelled;
                    self.touches_lifted(before, cancelled, &mut events);
                }
            }
        }
        events
    }

    fn touches_added(&mut self, before: Option<Point>, events: &mut Vec<PanGestureEvent>) {
        let Some(centroid) = self.centroid() else {
            return;
        };
        match self.phase {
            Phase::Failed => {}
            Phase::Possible => {
                self.anchor = centroid;
                self.last_centroid = centroid;
            }
            Phase::Recognized => {
                if self.config.accepts(self.touches.len()) {
                    self.rebase(before, centroid);
                } else {
                    tracing::debug!(
                        target: targets::GESTURE,
                        touches = self.touches.len(),
                        "too many touches, cancelling pan"
                    );
                    events.push(self.event(GestureState::Cancelled));
                    self.phase = Phase::Failed;
                }
            }
        }
    }

    fn touches_moved(&mut self, timestamp: Instant, events: &mut Vec<PanGestureEvent>) {
        let Some(centroid) = self.centroid() else {
            return;
        };
        let ready = self.enabled && self.config.accepts(self.touches.len());
        match self.phase {
            Phase::Possible if ready => {
                self.update_velocity(centroid, timestamp);
                let translation = centroid - self.anchor;
                if translation.length() > self.config.slop {
                    self.phase = Phase::Recognized;
                    self.translation = translation;
                    tracing::trace!(
                        target: targets::GESTURE,
                        x = translation.x,
                        y = translation.y,
                        "pan recognized"
                    );
                    events.push(self.event(GestureState::Started));
                }
            }
            Phase::Recognized => {
                self.update_velocity(centroid, timestamp);
                self.translation = centroid - self.anchor;
                events.push(self.event(GestureState::Updated));
            }
            Phase::Possible | Phase::Failed => {
                self.last_centroid = centroid;
                self.last_timestamp = Some(timestamp);
            }
        }
    }

    fn touches_lifted(
        &mut self,
        before: Option<Point>,
        cancelled: bool,
        events: &mut Vec<PanGestureEvent>,
    ) {
        let Some(centroid) = self.centroid() else {
            if self.phase == Phase::Recognized {
                let state = if cancelled {
                    GestureState::Cancelled
                } else {
                    GestureState::Ended
                };
                events.push(self.event(state));
            }
            self.clear_tracking();
            self.phase = Phase::Possible;
            return;
        };

        match self.phase {
            Phase::Failed => {}
            Phase::Possible => {
                self.anchor = centroid;
                self.last_centroid = centroid;
            }
            Phase::Recognized if cancelled => {
                events.push(self.event(GestureState::Cancelled));
                self.phase = Phase::Failed;
            }
            Phase::Recognized if !self.config.accepts(self.touches.len()) => {
                events.push(self.event(GestureState::Ended));
                self.phase = Phase::Failed;
            }
            Phase::Recognized => self.rebase(before, centroid),
        }
    }

    /// Keep the translation continuous when the touch set changes.
    fn rebase(&mut self, before: Option<Point>, after: Point) {
        if let Some(before) = before {
            self.anchor = self.anchor + (after - before);
        }
        self.last_centroid = after;
    }

    fn update_velocity(&mut self, centroid: Point, timestamp: Instant) {
        if let Some(last) = self.last_timestamp {
            let dt = timestamp.saturating_duration_since(last).as_secs_f32();
            if dt > 0.0 {
                let delta = centroid - self.last_centroid;
                self.velocity = Point::new(delta.x / dt, delta.y / dt);
            }
        }
        self.last_centroid = centroid;
        self.last_timestamp = Some(timestamp);
    }

    fn block_until_lift(&mut self) {
        self.phase = if self.touches.is_empty() {
            Phase::Possible
        } else {
            Phase::Failed
        };
        self.clear_tracking();
    }

    fn clear_tracking(&mut self) {
        self.translation = Point::ZERO;
        self.velocity = Point::ZERO;
        self.last_timestamp = None;
    }

    fn centroid(&self) -> Option<Point> {
        if self.touches.is_empty() {
            return None;
        }
        let sum = self
            .touches
            .values()
            .fold(glam::Vec2::ZERO, |sum, point| sum + point.to_vec2());
        Some(Point::from_vec2(sum / self.touches.len() as f32))
    }

    fn event(&self, state: GestureState) -> PanGestureEvent {
        PanGestureEvent {
            state,
            position: self.centroid().unwrap_or(self.last_centroid),
            translation: self.translation,
            velocity: self.velocity,
            touch_count: self.touches.len(),
        }
    }
}
