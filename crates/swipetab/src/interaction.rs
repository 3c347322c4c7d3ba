//! Gesture-driven transition control.
//!
//! [`GestureInteractionController`] turns a stream of pan events into
//! transition commands: when to begin, how far along the transition is, and
//! whether the release completes or cancels it. It holds no reference to the
//! animator; the coordinator applies each [`InteractionCommand`].
//!
//! ```text
//! Idle ──begin──▶ Tracking ──release──▶ Finishing ──settle──▶ Idle
//!                    │
//!                    └──release/cancel──▶ Cancelling ──settle──▶ Idle
//! ```

use swipetab_core::logging::targets;
use swipetab_core::{Point, Signal};

use crate::animation::{Direction, TransitionOutcome};
use crate::config::InteractionConfig;
use crate::gesture::{GestureState, PanGestureEvent};

/// Stage of the interactive transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A drag is driving the transition.
    Tracking,
    /// Released past the completion thresholds; playing to the end.
    Finishing,
    /// Released short of the thresholds or interrupted; playing back.
    Cancelling,
}

/// Normalized transition progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct TransitionProgress(f32);

impl TransitionProgress {
    pub const ZERO: Self = Self(0.0);

    /// Clamps `value` into `[0, 1]`. NaN becomes 0.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }
}

/// What the coordinator should do in response to a pan event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionCommand {
    /// Nothing to do.
    Ignored,
    /// Start an interactive transition toward this edge, then call
    /// [`commit`](GestureInteractionController::commit) or
    /// [`decline`](GestureInteractionController::decline).
    Begin(Direction),
    /// Scrub the transition to this fraction.
    Update(f32),
    /// Play the transition to the end.
    Finish,
    /// Play the transition back and cancel it.
    Cancel,
}

/// Converts drag gestures into interactive transition progress.
#[derive(Debug)]
pub struct GestureInteractionController {
    config: InteractionConfig,
    suppress_diagonal: bool,
    state: InteractionState,
    progress: TransitionProgress,
    direction: Option<Direction>,
    initial_position: Point,
    initial_translation: Point,
    /// A pan started without horizontal movement; begin on the next update.
    awaiting_direction: bool,

    /// Emitted when a gesture-driven transition has been committed to begin.
    pub interaction_started: Signal<()>,
    /// Emitted when a gesture-driven transition has completed and settled.
    pub interaction_finished: Signal<()>,
}

impl Default for GestureInteractionController {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl GestureInteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            suppress_diagonal: true,
            state: InteractionState::Idle,
            progress: TransitionProgress::ZERO,
            direction: None,
            initial_position: Point::ZERO,
            initial_translation: Point::ZERO,
            awaiting_direction: false,
            interaction_started: Signal::new(),
            interaction_finished: Signal::new(),
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
    }

    pub fn set_diagonal_swipe_suppression(&mut self, enabled: bool) {
        self.suppress_diagonal = enabled;
    }

    pub fn diagonal_swipe_suppression(&self) -> bool {
        self.suppress_diagonal
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Whether a gesture currently owns a transition.
    pub fn is_active(&self) -> bool {
        self.state != InteractionState::Idle
    }

    pub fn progress(&self) -> TransitionProgress {
        self.progress
    }

    /// Edge of the tracked drag.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Touch position and translation when tracking began.
    pub fn initial_drag(&self) -> (Point, Point) {
        (self.initial_position, self.initial_translation)
    }

    /// Feed a pan event. `container_width` scales translation to progress.
    #[tracing::instrument(skip_all, target = "swipetab::interaction", level = "trace")]
    pub fn handle_pan(
        &mut self,
        event: &PanGestureEvent,
        container_width: f32,
    ) -> InteractionCommand {
        use GestureState::*;
        use InteractionState::*;

        match (self.state, event.state) {
            (Idle, Started) => self.begin(event),
            (Idle, Updated) if self.awaiting_direction => self.begin(event),
            (Idle, Ended | Cancelled) => {
                self.awaiting_direction = false;
                InteractionCommand::Ignored
            }
            (Idle, Updated) => InteractionCommand::Ignored,
            (Tracking, Started | Updated) => {
                InteractionCommand::Update(self.update(event, container_width))
            }
            (Tracking, Ended) => self.release(event, container_width, false),
            (Tracking, Cancelled) => self.release(event, container_width, true),
            (Finishing | Cancelling, _) => {
                tracing::trace!(
                    target: targets::INTERACTION,
                    state = ?self.state,
                    "input disabled until the transition settles"
                );
                InteractionCommand::Ignored
            }
        }
    }

    /// Confirm that the transition requested by `Begin` has started.
    pub fn commit(&mut self) {
        if self.state == InteractionState::Tracking {
            tracing::debug!(
                target: targets::INTERACTION,
                direction = ?self.direction,
                "interaction started"
            );
            self.interaction_started.emit(());
        }
    }

    /// Abandon a `Begin` that could not be honored.
    pub fn decline(&mut self) {
        tracing::debug!(
            target: targets::INTERACTION,
            direction = ?self.direction,
            "interaction declined"
        );
        self.reset();
    }

    /// Keep an idle drag eligible to begin on its next update, for a pan
    /// that could not begin yet. No-op unless idle.
    pub fn defer_begin(&mut self) {
        if self.state == InteractionState::Idle {
            self.awaiting_direction = true;
        }
    }

    /// Interrupt a tracking interaction. Returns `true` if the transition
    /// should now be played back; no-op in any other state.
    pub fn cancel(&mut self) -> bool {
        if self.state != InteractionState::Tracking {
            return false;
        }
        tracing::debug!(target: targets::INTERACTION, "interaction cancelled");
        self.state = InteractionState::Cancelling;
        true
    }

    /// The transition reached its outcome; return to idle.
    pub fn settle(&mut self, outcome: TransitionOutcome) {
        let finished = self.state == InteractionState::Finishing && outcome.is_completed();
        self.reset();
        if finished {
            tracing::debug!(target: targets::INTERACTION, "interaction finished");
            self.interaction_finished.emit(());
        }
    }

    /// Return to idle without emitting anything.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.progress = TransitionProgress::ZERO;
        self.direction = None;
        self.awaiting_direction = false;
    }

    fn begin(&mut self, event: &PanGestureEvent) -> InteractionCommand {
        if self.is_diagonal(event) {
            tracing::debug!(
                target: targets::INTERACTION,
                translation_y = event.translation.y,
                velocity_y = event.velocity.y,
                "vertical movement, not tracking"
            );
            self.awaiting_direction = false;
            return InteractionCommand::Ignored;
        }

        let direction = Direction::from_horizontal(event.velocity.x)
            .or_else(|| Direction::from_horizontal(event.translation.x));
        let Some(direction) = direction else {
            self.awaiting_direction = true;
            return InteractionCommand::Ignored;
        };

        self.state = InteractionState::Tracking;
        self.direction = Some(direction);
        self.progress = TransitionProgress::ZERO;
        self.initial_position = event.position;
        self.initial_translation = event.translation;
        self.awaiting_direction = false;
        InteractionCommand::Begin(direction)
    }

    fn is_diagonal(&self, event: &PanGestureEvent) -> bool {
        self.suppress_diagonal
            && (event.translation.y.abs() > self.config.suspend_translation_y
                || event.velocity.y.abs() > self.config.suspend_velocity_y)
    }

    fn update(&mut self, event: &PanGestureEvent, container_width: f32) -> f32 {
        let raw = if container_width > 0.0 {
            event.translation.x / container_width
        } else {
            0.0
        };
        let reversed = match self.direction {
            Some(Direction::Left) => raw > 0.0,
            Some(Direction::Right) => raw < 0.0,
            None => true,
        };
        let fraction = if reversed {
            0.0
        } else {
            raw.abs().clamp(0.0, self.config.maximum_fraction)
        };
        self.progress = TransitionProgress::new(fraction);
        self.progress.value()
    }

    fn release(
        &mut self,
        event: &PanGestureEvent,
        container_width: f32,
        system_cancelled: bool,
    ) -> InteractionCommand {
        let fraction = self.update(event, container_width);
        let travel_velocity = self
            .direction
            .map_or(0.0, |direction| event.velocity.x * direction.sign());
        let complete = !system_cancelled
            && (fraction > self.config.completion_fraction
                || travel_velocity > self.config.completion_velocity);

        tracing::debug!(
            target: targets::INTERACTION,
            fraction,
            travel_velocity,
            system_cancelled,
            complete,
            "drag released"
        );

        if complete {
            self.state = InteractionState::Finishing;
            InteractionCommand::Finish
        } else {
            self.state = InteractionState::Cancelling;
            InteractionCommand::Cancel
        }
    }
}

static_assertions::assert_impl_all!(GestureInteractionController: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const WIDTH: f32 = 400.0;

    fn pan(state: GestureState, dx: f32, dy: f32, vx: f32, vy: f32) -> PanGestureEvent {
        PanGestureEvent::new(state, Point::new(dx, dy), Point::new(vx, vy))
    }

    fn tracking_left() -> GestureInteractionController {
        let mut controller = GestureInteractionController::default();
        let command = controller.handle_pan(&pan(GestureState::Started, -12.0, 0.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Begin(Direction::Left));
        controller
    }

    #[test]
    fn test_begin_uses_velocity_sign() {
        let mut controller = GestureInteractionController::default();
        let command = controller.handle_pan(&pan(GestureState::Started, -12.0, 0.0, 50.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Begin(Direction::Right));
        assert_eq!(controller.state(), InteractionState::Tracking);
    }

    #[test]
    fn test_begin_deferred_without_horizontal_movement() {
        let mut controller = GestureInteractionController::default();
        let command = controller.handle_pan(&pan(GestureState::Started, 0.0, 0.0, 0.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Ignored);
        assert_eq!(controller.state(), InteractionState::Idle);

        let command = controller.handle_pan(&pan(GestureState::Updated, 15.0, 0.0, 0.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Begin(Direction::Right));
    }

    #[test]
    fn test_diagonal_suppression() {
        let mut controller = GestureInteractionController::default();
        let command = controller.handle_pan(&pan(GestureState::Started, -20.0, 6.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Ignored);
        let command = controller.handle_pan(&pan(GestureState::Updated, -80.0, 6.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Ignored);
        assert_eq!(controller.state(), InteractionState::Idle);

        let command = controller.handle_pan(&pan(GestureState::Started, -20.0, 0.0, -300.0, 150.0), WIDTH);
        assert_eq!(command, InteractionCommand::Ignored);

        controller.set_diagonal_swipe_suppression(false);
        let command = controller.handle_pan(&pan(GestureState::Started, -20.0, 6.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Begin(Direction::Left));
    }

    #[test]
    fn test_fraction_tracks_translation() {
        let mut controller = tracking_left();
        let command = controller.handle_pan(&pan(GestureState::Updated, -100.0, 0.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Update(0.25));
        assert_eq!(controller.progress().value(), 0.25);

        let command = controller.handle_pan(&pan(GestureState::Updated, -800.0, 0.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Update(0.99));
    }

    #[test]
    fn test_reversal_reports_zero() {
        let mut controller = GestureInteractionController::default();
        controller.handle_pan(&pan(GestureState::Started, 30.0, 0.0, 200.0, 0.0), WIDTH);
        let command = controller.handle_pan(&pan(GestureState::Updated, -10.0, 0.0, -200.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Update(0.0));
        assert_eq!(controller.progress(), TransitionProgress::ZERO);
    }

    #[test]
    fn test_non_finite_translation_reports_zero() {
        let mut controller = tracking_left();
        let command = controller.handle_pan(&pan(GestureState::Updated, f32::NAN, 0.0, -300.0, 0.0), WIDTH);
        assert!(matches!(command, InteractionCommand::Update(f) if f == 0.0));
        assert_eq!(controller.progress(), TransitionProgress::ZERO);
    }

    #[test]
    fn test_deferred_pan_begins_on_next_update() {
        let mut controller = GestureInteractionController::default();
        controller.defer_begin();
        let command = controller.handle_pan(&pan(GestureState::Updated, -100.0, 0.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Begin(Direction::Left));
        assert_eq!(controller.state(), InteractionState::Tracking);

        let mut tracking = tracking_left();
        tracking.defer_begin();
        tracking.handle_pan(&pan(GestureState::Ended, -300.0, 0.0, 0.0, 0.0), WIDTH);
        tracking.settle(TransitionOutcome::Completed);
        let command = tracking.handle_pan(&pan(GestureState::Updated, -100.0, 0.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Ignored);
    }

    #[test]
    fn test_release_past_half_finishes() {
        let mut controller = tracking_left();
        let command = controller.handle_pan(&pan(GestureState::Ended, -240.0, 0.0, 0.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Finish);
        assert_eq!(controller.state(), InteractionState::Finishing);
    }

    #[test]
    fn test_release_velocity_override() {
        let mut controller = tracking_left();
        let command = controller.handle_pan(&pan(GestureState::Ended, -120.0, 0.0, -250.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Finish);

        let mut controller = tracking_left();
        let command = controller.handle_pan(&pan(GestureState::Ended, -120.0, 0.0, 250.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Cancel);
    }

    #[test]
    fn test_slow_short_release_cancels() {
        let mut controller = tracking_left();
        let command = controller.handle_pan(&pan(GestureState::Ended, -20.0, 0.0, -40.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Cancel);
        assert_eq!(controller.state(), InteractionState::Cancelling);
    }

    #[test]
    fn test_system_cancel_always_cancels() {
        let mut controller = tracking_left();
        let command =
            controller.handle_pan(&pan(GestureState::Cancelled, -380.0, 0.0, -900.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Cancel);
    }

    #[test]
    fn test_input_ignored_until_settled() {
        let mut controller = tracking_left();
        controller.handle_pan(&pan(GestureState::Ended, -300.0, 0.0, 0.0, 0.0), WIDTH);
        let command = controller.handle_pan(&pan(GestureState::Started, -30.0, 0.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Ignored);

        controller.settle(TransitionOutcome::Completed);
        assert_eq!(controller.state(), InteractionState::Idle);
        let command = controller.handle_pan(&pan(GestureState::Started, -30.0, 0.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Begin(Direction::Left));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut controller = tracking_left();
        assert!(controller.cancel());
        assert!(!controller.cancel());
        assert_eq!(controller.state(), InteractionState::Cancelling);

        let mut idle = GestureInteractionController::default();
        assert!(!idle.cancel());
        assert_eq!(idle.state(), InteractionState::Idle);
    }

    #[test]
    fn test_signals() {
        let started = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicUsize::new(0));

        let mut controller = tracking_left();
        let counter = started.clone();
        controller.interaction_started.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = finished.clone();
        controller.interaction_finished.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        controller.commit();
        controller.handle_pan(&pan(GestureState::Ended, -40.0, 0.0, 0.0, 0.0), WIDTH);
        controller.settle(TransitionOutcome::Cancelled);
        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert_eq!(finished.load(Ordering::SeqCst), 0);

        controller.handle_pan(&pan(GestureState::Started, -30.0, 0.0, -300.0, 0.0), WIDTH);
        controller.commit();
        controller.handle_pan(&pan(GestureState::Ended, -300.0, 0.0, 0.0, 0.0), WIDTH);
        controller.settle(TransitionOutcome::Completed);
        assert_eq!(started.load(Ordering::SeqCst), 2);
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_decline_returns_to_idle() {
        let mut controller = tracking_left();
        controller.decline();
        assert_eq!(controller.state(), InteractionState::Idle);
        let command = controller.handle_pan(&pan(GestureState::Updated, -100.0, 0.0, -300.0, 0.0), WIDTH);
        assert_eq!(command, InteractionCommand::Ignored);
    }
}
