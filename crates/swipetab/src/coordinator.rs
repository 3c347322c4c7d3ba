//! Tab selection and transition coordination.
//!
//! [`TabSwitchCoordinator`] owns the selected index, the container's view
//! stack and the pan recognizer. It turns drags, tab-bar taps and
//! programmatic selection into transitions, picks the animator and edge for
//! each one, and keeps at most one transition in flight.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use swipetab::TabSwitchCoordinator;
//! use swipetab_core::{Rect, Size};
//!
//! let mut tabs = TabSwitchCoordinator::new(Rect::from_size(Size::new(320.0, 480.0)));
//! tabs.set_tab_count(3);
//! assert_eq!(tabs.selected_index(), Some(0));
//!
//! tabs.select_tab(2).unwrap();
//! while tabs.is_transition_in_flight() {
//!     tabs.advance(Duration::from_millis(16));
//! }
//! assert_eq!(tabs.selected_index(), Some(2));
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use swipetab_core::logging::{PerfSpan, span_names, targets};
use swipetab_core::{Rect, Signal, ThreadAffinity};
use winit::event::Touch;

use crate::animation::{
    Direction, SwipeAnimation, SwipeTransitionAnimator, TabView, TransitionAnimator,
    TransitionContext, TransitionOutcome, TransitionRequest, ViewStack,
};
use crate::config::{AllowedSwipeDirection, SwipeConfig};
use crate::error::{ConfigResult, SelectionError, SelectionResult};
use crate::gesture::{GestureState, PanGestureEvent, PanGestureRecognizer, TouchEvent, TouchInputHandler};
use crate::interaction::{GestureInteractionController, InteractionCommand, InteractionState};

/// Predicate vetoing tabs during swipe navigation.
pub type ShouldSelectInteractively = dyn Fn(usize) -> bool + Send + Sync;

/// Owned transition animator.
pub type BoxedAnimator = Box<dyn TransitionAnimator>;

/// What started a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOrigin {
    /// A drag gesture; uses the swipe animator.
    Gesture,
    /// A tab-bar tap; uses the tap animator.
    Tap,
    /// [`TabSwitchCoordinator::set_selected_index`]; uses the tap animator.
    Programmatic,
}

#[derive(Debug)]
struct ActiveTransition {
    context: TransitionContext,
    origin: TransitionOrigin,
}

/// Coordinates tab selection, gestures and transitions for a tab container.
///
/// All methods must be called on the thread that created the coordinator.
pub struct TabSwitchCoordinator {
    affinity: ThreadAffinity,
    config: SwipeConfig,
    tab_count: usize,
    selected: Option<usize>,
    bounds: Rect,
    /// Views at rest. Moved into the transition context while one runs.
    stack: ViewStack,
    touch_input: TouchInputHandler,
    recognizer: PanGestureRecognizer,
    interaction: GestureInteractionController,
    swipe_animator: BoxedAnimator,
    tap_animator: Option<BoxedAnimator>,
    swipe_animation: SwipeAnimation,
    tap_animation: SwipeAnimation,
    active: Option<ActiveTransition>,
    should_select_interactively: Option<Arc<ShouldSelectInteractively>>,

    /// Emitted with the new index once a selection change has settled.
    pub current_changed: Signal<usize>,
    /// Emitted when a transition is requested, before it animates.
    pub transition_started: Signal<TransitionRequest>,
    /// Emitted when a transition has completed or been cancelled.
    pub transition_finished: Signal<TransitionOutcome>,
}

impl fmt::Debug for TabSwitchCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabSwitchCoordinator")
            .field("tab_count", &self.tab_count)
            .field("selected", &self.selected)
            .field("bounds", &self.bounds)
            .field("interaction", &self.interaction.state())
            .field("active", &self.active)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TabSwitchCoordinator {
    /// Create a coordinator with the default configuration and no tabs.
    pub fn new(bounds: Rect) -> Self {
        Self::build(bounds, SwipeConfig::default())
    }

    /// Create a coordinator from a validated configuration.
    pub fn with_config(bounds: Rect, config: SwipeConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(bounds, config))
    }

    fn build(bounds: Rect, config: SwipeConfig) -> Self {
        let animator = || -> BoxedAnimator {
            Box::new(
                SwipeTransitionAnimator::new()
                    .with_duration(config.animation_duration)
                    .with_easing(config.easing),
            )
        };
        let mut recognizer = PanGestureRecognizer::with_config(config.pan_config());
        recognizer.set_enabled(config.swipe_enabled);
        let mut interaction = GestureInteractionController::new(config.interaction);
        interaction.set_diagonal_swipe_suppression(config.diagonal_swipe_suppression);

        Self {
            affinity: ThreadAffinity::current(),
            tab_count: 0,
            selected: None,
            bounds,
            stack: ViewStack::new(),
            touch_input: TouchInputHandler::new(),
            recognizer,
            interaction,
            swipe_animator: animator(),
            tap_animator: Some(animator()),
            swipe_animation: config.swipe_animation.into(),
            tap_animation: config.tap_animation.into(),
            active: None,
            should_select_interactively: None,
            current_changed: Signal::new(),
            transition_started: Signal::new(),
            transition_finished: Signal::new(),
            config,
        }
    }

    // =========================================================================
    // Tabs and layout
    // =========================================================================

    pub fn tab_count(&self) -> usize {
        self.tab_count
    }

    /// Set the number of tabs.
    ///
    /// Finishes any in-flight transition. The first tab is selected when the
    /// container gains its first tabs; the selection is clamped when tabs
    /// are removed.
    pub fn set_tab_count(&mut self, count: usize) {
        self.affinity.debug_assert_same_thread();
        self.finish_in_flight();
        self.tab_count = count;

        let reselect = match self.selected {
            _ if count == 0 => {
                self.selected = None;
                self.stack.clear();
                None
            }
            None => Some(0),
            Some(selected) if selected >= count => Some(count - 1),
            Some(_) => None,
        };
        if let Some(index) = reselect {
            self.selected = Some(index);
            self.stack = ViewStack::with_view(TabView::new(index, self.bounds));
            tracing::debug!(target: targets::COORDINATOR, count, index, "tab count changed");
            self.current_changed.emit(index);
        }
    }

    /// The container's content area.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize the content area. A drag still being tracked is cancelled;
    /// any other in-flight transition is finished.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.affinity.debug_assert_same_thread();
        if self.interaction.cancel()
            && let Some(active) = self.active.as_mut()
        {
            active.context.mark_cancelled();
        }
        self.finish_in_flight();
        self.bounds = bounds;
        for tab in self.stack.tabs() {
            self.stack.set_frame(tab, bounds);
        }
    }

    /// The container's views, bottom to top, including views mid-transition.
    pub fn view_stack(&self) -> &ViewStack {
        match &self.active {
            Some(active) => active.context.stack(),
            None => &self.stack,
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The settled selection, `None` when there are no tabs.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select a tab from code.
    ///
    /// A transition already in flight is force-finished first. Selecting the
    /// current tab does nothing.
    #[tracing::instrument(skip(self), target = "swipetab::coordinator", level = "debug")]
    pub fn set_selected_index(&mut self, index: usize) -> SelectionResult<()> {
        self.affinity.debug_assert_same_thread();
        self.check_index(index)?;
        self.finish_in_flight();

        let from = self.selected.ok_or(SelectionError::NoTabs)?;
        if from == index {
            return Ok(());
        }
        let direction = self.resolve_direction(from, index);
        self.begin_transition(index, direction, TransitionOrigin::Programmatic)
    }

    /// Select a tab in response to a tab-bar tap.
    ///
    /// Refused with [`SelectionError::TransitionInFlight`] while
    /// [`should_select`](Self::should_select) says no.
    #[tracing::instrument(skip(self), target = "swipetab::coordinator", level = "debug")]
    pub fn select_tab(&mut self, index: usize) -> SelectionResult<()> {
        self.affinity.debug_assert_same_thread();
        self.check_index(index)?;
        if !self.should_select(index) {
            tracing::debug!(target: targets::COORDINATOR, index, "tap refused, transition in flight");
            return Err(SelectionError::TransitionInFlight);
        }

        let from = self.selected.ok_or(SelectionError::NoTabs)?;
        if from == index {
            return Ok(());
        }
        let direction = self.resolve_direction(from, index);
        self.begin_transition(index, direction, TransitionOrigin::Tap)
    }

    /// Whether a tap may select `candidate` now.
    pub fn should_select(&self, candidate: usize) -> bool {
        candidate < self.tab_count && self.active.is_none() && !self.interaction.is_active()
    }

    pub fn is_transition_in_flight(&self) -> bool {
        self.active.is_some()
    }

    /// The request of the in-flight transition.
    pub fn active_request(&self) -> Option<&TransitionRequest> {
        self.active.as_ref().map(|active| active.context.request())
    }

    /// What started the in-flight transition.
    pub fn active_origin(&self) -> Option<TransitionOrigin> {
        self.active.as_ref().map(|active| active.origin)
    }

    /// The tab a swipe toward `direction` would select, if any.
    ///
    /// Steps one tab at a time (wrapping when cycling is enabled) past tabs
    /// vetoed by the should-select-interactively predicate.
    pub fn next_index(&self, direction: Direction) -> Option<usize> {
        let current = self.selected?;
        let count = self.tab_count;
        let cycling = self.config.cycling_enabled;
        let mut candidate = current;
        loop {
            candidate = match direction {
                Direction::Left if candidate + 1 < count => candidate + 1,
                Direction::Left if cycling => 0,
                Direction::Right if candidate > 0 => candidate - 1,
                Direction::Right if cycling => count.checked_sub(1)?,
                _ => return None,
            };
            if candidate == current {
                return None;
            }
            let allowed = self
                .should_select_interactively
                .as_ref()
                .is_none_or(|predicate| predicate(candidate));
            if allowed {
                return Some(candidate);
            }
        }
    }

    /// Edge for a tap or programmatic move from `from` to `to`.
    ///
    /// With cycling enabled and more than two tabs, last to first is `Left`
    /// and first to last is `Right`.
    pub fn resolve_direction(&self, from: usize, to: usize) -> Direction {
        if self.config.cycling_enabled && self.tab_count > 2 {
            let last = self.tab_count - 1;
            if from == last && to == 0 {
                return Direction::Left;
            }
            if from == 0 && to == last {
                return Direction::Right;
            }
        }
        Direction::between(from, to)
    }

    fn check_index(&self, index: usize) -> SelectionResult<()> {
        if self.tab_count == 0 {
            return Err(SelectionError::NoTabs);
        }
        if index >= self.tab_count {
            return Err(SelectionError::OutOfBounds {
                index,
                count: self.tab_count,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Gesture input
    // =========================================================================

    /// The interactive transition controller and its signals.
    pub fn interaction(&self) -> &GestureInteractionController {
        &self.interaction
    }

    pub fn recognizer(&self) -> &PanGestureRecognizer {
        &self.recognizer
    }

    /// Feed a winit touch event.
    pub fn process_touch(&mut self, touch: Touch) {
        let event = self.touch_input.handle_touch(touch);
        self.process_touch_event(&event);
    }

    /// Feed a touch event through the pan recognizer.
    pub fn process_touch_event(&mut self, event: &TouchEvent) {
        self.affinity.debug_assert_same_thread();
        for pan in self.recognizer.process_touch(event) {
            self.handle_pan(&pan);
        }
    }

    /// Handle a recognized pan.
    pub fn handle_pan(&mut self, event: &PanGestureEvent) {
        self.affinity.debug_assert_same_thread();
        let _span = PerfSpan::new(span_names::PAN);

        let continuing = matches!(event.state, GestureState::Started | GestureState::Updated);
        if continuing && !self.config.swipe_enabled {
            return;
        }
        if continuing && self.interaction.state() == InteractionState::Idle && self.active.is_some() {
            tracing::trace!(target: targets::COORDINATOR, "transition in flight, deferring pan");
            self.interaction.defer_begin();
            return;
        }

        let width = self.bounds.width();
        match self.interaction.handle_pan(event, width) {
            InteractionCommand::Ignored => {}
            InteractionCommand::Begin(direction) => self.begin_interactive(direction, event),
            InteractionCommand::Update(fraction) => {
                self.drive(|animator, context| animator.update_interactive(context, fraction));
            }
            InteractionCommand::Finish => {
                self.set_recognizer_enabled(false);
                self.drive(|animator, context| animator.finish_interactive(context));
            }
            InteractionCommand::Cancel => {
                self.drive(|animator, context| animator.cancel_interactive(context));
            }
        }
    }

    /// Interrupt the drag-driven transition, playing it back.
    ///
    /// Returns `false` (and does nothing) unless a drag is being tracked.
    pub fn cancel_interaction(&mut self) -> bool {
        self.affinity.debug_assert_same_thread();
        if !self.interaction.cancel() {
            return false;
        }
        self.recognizer.reset();
        self.drive(|animator, context| animator.cancel_interactive(context));
        true
    }

    fn begin_interactive(&mut self, direction: Direction, event: &PanGestureEvent) {
        if !self.config.allowed_swipe_direction.permits(direction) {
            tracing::debug!(target: targets::COORDINATOR, %direction, "swipe direction not allowed");
            self.decline_gesture();
            return;
        }
        let Some(to) = self.next_index(direction) else {
            tracing::debug!(target: targets::COORDINATOR, %direction, "no tab to swipe to");
            self.decline_gesture();
            return;
        };
        if let Err(err) = self.begin_transition(to, direction, TransitionOrigin::Gesture) {
            tracing::warn!(target: targets::COORDINATOR, %err, "interactive transition refused");
            self.decline_gesture();
            return;
        }

        self.interaction.commit();
        // Apply the distance already covered by the drag.
        if let InteractionCommand::Update(fraction) =
            self.interaction.handle_pan(event, self.bounds.width())
        {
            self.drive(|animator, context| animator.update_interactive(context, fraction));
        }
    }

    fn decline_gesture(&mut self) {
        self.interaction.decline();
        self.recognizer.reset();
    }

    fn set_recognizer_enabled(&mut self, enabled: bool) {
        if let Some(event) = self.recognizer.set_enabled(enabled) {
            self.handle_pan(&event);
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Advance the in-flight transition by one frame of `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.affinity.debug_assert_same_thread();
        let _span = PerfSpan::new(span_names::ADVANCE);
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if let Some(animator) =
            animator_for(&mut self.swipe_animator, &mut self.tap_animator, active.origin)
        {
            animator.tick(&mut active.context, delta);
        }
        self.settle_if_complete();
    }

    fn begin_transition(
        &mut self,
        to: usize,
        direction: Direction,
        origin: TransitionOrigin,
    ) -> SelectionResult<()> {
        let from = self.selected.ok_or(SelectionError::NoTabs)?;
        let style = match origin {
            TransitionOrigin::Gesture => self.swipe_animation.clone(),
            TransitionOrigin::Tap | TransitionOrigin::Programmatic => self.tap_animation.clone(),
        };
        let request = TransitionRequest::new(from, to, direction, style);
        let mut context =
            TransitionContext::new(request.clone(), self.bounds, std::mem::take(&mut self.stack))
                .with_animated(self.config.animations_enabled)
                .with_interactive(origin == TransitionOrigin::Gesture);

        tracing::debug!(
            target: targets::COORDINATOR,
            from,
            to,
            %direction,
            ?origin,
            "beginning transition"
        );
        self.transition_started.emit(request);

        let started = match animator_for(&mut self.swipe_animator, &mut self.tap_animator, origin) {
            Some(animator) => animator.start(&mut context),
            None => {
                context.complete_transition(true);
                Ok(())
            }
        };

        let active = ActiveTransition { context, origin };
        if let Err(err) = started {
            self.settle(active);
            return Err(err.into());
        }
        if active.context.is_complete() {
            self.settle(active);
        } else {
            self.active = Some(active);
        }
        Ok(())
    }

    /// Run `step` against the in-flight gesture transition and settle it if
    /// that completed it.
    fn drive(&mut self, step: impl FnOnce(&mut dyn TransitionAnimator, &mut TransitionContext)) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if active.origin != TransitionOrigin::Gesture {
            return;
        }
        if let Some(animator) =
            animator_for(&mut self.swipe_animator, &mut self.tap_animator, active.origin)
        {
            step(animator, &mut active.context);
        }
        self.settle_if_complete();
    }

    /// Snap the in-flight transition to its end state.
    fn finish_in_flight(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        tracing::debug!(
            target: targets::COORDINATOR,
            origin = ?active.origin,
            "force-finishing in-flight transition"
        );
        let animators = [Some(self.swipe_animator.as_mut()), self.tap_animator.as_deref_mut()];
        for animator in animators.into_iter().flatten() {
            animator.force_finish(&mut active.context);
        }
        if !active.context.is_complete() {
            let completed = !active.context.transition_was_cancelled();
            active.context.complete_transition(completed);
        }
        if active.origin == TransitionOrigin::Gesture {
            self.recognizer.reset();
        }
        self.settle(active);
    }

    fn settle_if_complete(&mut self) {
        let complete = self
            .active
            .as_ref()
            .is_some_and(|active| active.context.is_complete());
        if complete && let Some(active) = self.active.take() {
            self.settle(active);
        }
    }

    fn settle(&mut self, active: ActiveTransition) {
        let ActiveTransition { context, origin } = active;
        let outcome = context.outcome().unwrap_or(TransitionOutcome::Cancelled);
        let to = context.request().to_index;
        self.stack = context.into_stack();

        if origin == TransitionOrigin::Gesture {
            self.interaction.settle(outcome);
            self.set_recognizer_enabled(self.config.swipe_enabled);
        }
        if outcome.is_completed() {
            self.selected = Some(to);
        }

        tracing::debug!(
            target: targets::COORDINATOR,
            ?outcome,
            selected = ?self.selected,
            stack = %self.stack,
            "transition settled"
        );
        if outcome.is_completed() {
            self.current_changed.emit(to);
        }
        self.transition_finished.emit(outcome);
    }

    // =========================================================================
    // Swap-in points
    // =========================================================================

    /// Replace the animator used for drag-driven transitions.
    pub fn set_swipe_animator(&mut self, animator: BoxedAnimator) {
        self.affinity.debug_assert_same_thread();
        self.finish_in_flight();
        self.swipe_animator = animator;
    }

    /// Replace the animator used for taps and programmatic selection.
    /// `None` switches tabs instantly.
    pub fn set_tap_animator(&mut self, animator: Option<BoxedAnimator>) {
        self.affinity.debug_assert_same_thread();
        self.finish_in_flight();
        self.tap_animator = animator;
    }

    /// Strategy for drag-driven transitions.
    pub fn set_swipe_animation(&mut self, animation: impl Into<SwipeAnimation>) {
        self.swipe_animation = animation.into();
    }

    /// Strategy for tap and programmatic transitions.
    pub fn set_tap_animation(&mut self, animation: impl Into<SwipeAnimation>) {
        self.tap_animation = animation.into();
    }

    /// Veto tabs during swipe navigation; vetoed tabs are skipped over.
    pub fn set_should_select_interactively<F>(&mut self, predicate: F)
    where
        F: Fn(usize) -> bool + Send + Sync + 'static,
    {
        self.should_select_interactively = Some(Arc::new(predicate));
    }

    pub fn clear_should_select_interactively(&mut self) {
        self.should_select_interactively = None;
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Validate and apply a whole configuration.
    ///
    /// Styles replace any custom strategies; the duration is pushed to both
    /// animators.
    pub fn set_config(&mut self, config: SwipeConfig) -> ConfigResult<()> {
        self.affinity.debug_assert_same_thread();
        config.validate()?;
        self.recognizer.set_config(config.pan_config());
        self.interaction.set_config(config.interaction);
        self.interaction
            .set_diagonal_swipe_suppression(config.diagonal_swipe_suppression);
        self.swipe_animation = config.swipe_animation.into();
        self.tap_animation = config.tap_animation.into();
        self.apply_duration(config.animation_duration);
        let swipe_enabled = config.swipe_enabled;
        self.config = config;
        self.set_swipe_enabled(swipe_enabled);
        Ok(())
    }

    /// Enable or disable swiping. Disabling mid-drag cancels the drag.
    pub fn set_swipe_enabled(&mut self, enabled: bool) {
        self.affinity.debug_assert_same_thread();
        self.config.swipe_enabled = enabled;
        let finishing = self.interaction.state() == InteractionState::Finishing;
        self.set_recognizer_enabled(enabled && !finishing);
    }

    pub fn set_cycling_enabled(&mut self, enabled: bool) {
        self.config.cycling_enabled = enabled;
    }

    pub fn set_allowed_swipe_direction(&mut self, allowed: AllowedSwipeDirection) {
        self.config.allowed_swipe_direction = allowed;
    }

    pub fn set_diagonal_swipe_suppression(&mut self, enabled: bool) {
        self.config.diagonal_swipe_suppression = enabled;
        self.interaction.set_diagonal_swipe_suppression(enabled);
    }

    /// Set how many touches may drive a swipe. `None` means unbounded.
    pub fn set_touch_range(&mut self, minimum: usize, maximum: Option<usize>) -> ConfigResult<()> {
        let candidate = SwipeConfig {
            minimum_touches: minimum,
            maximum_touches: maximum,
            ..self.config.clone()
        };
        candidate.validate()?;
        self.config = candidate;
        self.recognizer.set_touch_range(minimum, maximum);
        Ok(())
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.config.animations_enabled = enabled;
    }

    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.config.animation_duration = duration;
        self.apply_duration(duration);
    }

    fn apply_duration(&mut self, duration: Duration) {
        self.swipe_animator.set_duration(duration);
        if let Some(animator) = self.tap_animator.as_deref_mut() {
            animator.set_duration(duration);
        }
    }
}

/// The animator serving transitions of `origin`.
fn animator_for<'a>(
    swipe: &'a mut BoxedAnimator,
    tap: &'a mut Option<BoxedAnimator>,
    origin: TransitionOrigin,
) -> Option<&'a mut (dyn TransitionAnimator + 'static)> {
    match origin {
        TransitionOrigin::Gesture => Some(swipe.as_mut()),
        TransitionOrigin::Tap | TransitionOrigin::Programmatic => tap.as_deref_mut(),
    }
}

static_assertions::assert_impl_all!(TabSwitchCoordinator: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use swipetab_core::Size;

    const WIDTH: f32 = 320.0;

    fn coordinator(tabs: usize) -> TabSwitchCoordinator {
        let mut coordinator = TabSwitchCoordinator::new(Rect::from_size(Size::new(WIDTH, 480.0)));
        coordinator.set_tab_count(tabs);
        coordinator
    }

    fn settle(coordinator: &mut TabSwitchCoordinator) {
        for _ in 0..100 {
            if !coordinator.is_transition_in_flight() {
                return;
            }
            coordinator.advance(Duration::from_millis(16));
        }
        panic!("transition did not settle");
    }

    fn pan(state: GestureState, dx: f32, vx: f32) -> PanGestureEvent {
        PanGestureEvent::new(state, swipetab_core::Point::new(dx, 0.0), swipetab_core::Point::new(vx, 0.0))
    }

    #[test]
    fn test_tab_count_selects_first_tab() {
        let mut tabs = coordinator(0);
        assert_eq!(tabs.selected_index(), None);
        assert_eq!(tabs.select_tab(0), Err(SelectionError::NoTabs));

        tabs.set_tab_count(4);
        assert_eq!(tabs.selected_index(), Some(0));
        assert_eq!(tabs.view_stack().tabs(), vec![0]);

        tabs.set_selected_index(3).unwrap();
        settle(&mut tabs);
        tabs.set_tab_count(2);
        assert_eq!(tabs.selected_index(), Some(1));
        assert_eq!(tabs.view_stack().tabs(), vec![1]);

        tabs.set_tab_count(0);
        assert_eq!(tabs.selected_index(), None);
        assert!(tabs.view_stack().is_empty());
    }

    #[test]
    fn test_bounds_checks() {
        let mut tabs = coordinator(3);
        assert_eq!(
            tabs.set_selected_index(3),
            Err(SelectionError::OutOfBounds { index: 3, count: 3 })
        );
        assert_eq!(
            tabs.select_tab(7),
            Err(SelectionError::OutOfBounds { index: 7, count: 3 })
        );
        assert!(!tabs.should_select(3));
    }

    #[test]
    fn test_resolve_direction() {
        let mut tabs = coordinator(4);
        assert_eq!(tabs.resolve_direction(0, 2), Direction::Left);
        assert_eq!(tabs.resolve_direction(3, 0), Direction::Right);
        assert_eq!(tabs.resolve_direction(0, 3), Direction::Left);

        tabs.set_cycling_enabled(true);
        assert_eq!(tabs.resolve_direction(3, 0), Direction::Left);
        assert_eq!(tabs.resolve_direction(0, 3), Direction::Right);
        assert_eq!(tabs.resolve_direction(2, 0), Direction::Right);
    }

    #[test]
    fn test_next_index() {
        let mut tabs = coordinator(3);
        assert_eq!(tabs.next_index(Direction::Left), Some(1));
        assert_eq!(tabs.next_index(Direction::Right), None);

        tabs.set_cycling_enabled(true);
        assert_eq!(tabs.next_index(Direction::Right), Some(2));

        tabs.set_should_select_interactively(|index| index != 1);
        assert_eq!(tabs.next_index(Direction::Left), Some(2));

        tabs.set_should_select_interactively(|_| false);
        assert_eq!(tabs.next_index(Direction::Left), None);

        tabs.clear_should_select_interactively();
        tabs.set_cycling_enabled(false);
        tabs.set_should_select_interactively(|index| index != 1);
        assert_eq!(tabs.next_index(Direction::Left), Some(2));
    }

    #[test]
    fn test_tap_refused_while_in_flight() {
        let mut tabs = coordinator(3);
        tabs.select_tab(1).unwrap();
        assert!(tabs.is_transition_in_flight());
        assert_eq!(tabs.active_origin(), Some(TransitionOrigin::Tap));
        assert!(!tabs.should_select(2));
        assert_eq!(tabs.select_tab(2), Err(SelectionError::TransitionInFlight));

        settle(&mut tabs);
        assert_eq!(tabs.selected_index(), Some(1));
        assert!(tabs.should_select(2));
    }

    #[test]
    fn test_programmatic_selection_preempts() {
        let mut tabs = coordinator(3);
        let finished = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = finished.clone();
        tabs.transition_finished.connect(move |outcome| sink.lock().push(*outcome));

        tabs.select_tab(1).unwrap();
        tabs.advance(Duration::from_millis(16));
        tabs.set_selected_index(2).unwrap();
        assert_eq!(*finished.lock(), vec![TransitionOutcome::Completed]);
        assert_eq!(tabs.active_request().map(|r| r.from_index), Some(1));

        settle(&mut tabs);
        assert_eq!(tabs.selected_index(), Some(2));
        assert_eq!(tabs.view_stack().tabs(), vec![2]);
    }

    #[test]
    fn test_instant_switch_without_tap_animator() {
        let mut tabs = coordinator(3);
        tabs.set_tap_animator(None);
        tabs.select_tab(2).unwrap();
        assert!(!tabs.is_transition_in_flight());
        assert_eq!(tabs.selected_index(), Some(2));
        assert_eq!(tabs.view_stack().tabs(), vec![2]);
    }

    #[test]
    fn test_animations_disabled_switches_immediately() {
        let mut tabs = coordinator(2);
        tabs.set_animations_enabled(false);
        tabs.set_selected_index(1).unwrap();
        assert!(!tabs.is_transition_in_flight());
        assert_eq!(tabs.selected_index(), Some(1));
    }

    #[test]
    fn test_gesture_drives_swipe_animator() {
        let mut tabs = coordinator(3);
        tabs.handle_pan(&pan(GestureState::Started, -16.0, -300.0));
        assert_eq!(tabs.active_origin(), Some(TransitionOrigin::Gesture));
        assert_eq!(tabs.interaction().state(), InteractionState::Tracking);
        let left = tabs.view_stack().frame(1).map_or(0.0, |f| f.left());
        assert!((left - (WIDTH - 16.0)).abs() < 0.01);

        tabs.handle_pan(&pan(GestureState::Updated, -160.0, -300.0));
        assert_eq!(tabs.view_stack().frame(1).map(|f| f.left()), Some(160.0));

        assert!(!tabs.should_select(2));
        tabs.handle_pan(&pan(GestureState::Ended, -200.0, -300.0));
        assert!(!tabs.recognizer().is_enabled());
        settle(&mut tabs);
        assert_eq!(tabs.selected_index(), Some(1));
        assert!(tabs.recognizer().is_enabled());
    }

    #[test]
    fn test_gesture_at_boundary_is_declined() {
        let mut tabs = coordinator(3);
        tabs.handle_pan(&pan(GestureState::Started, 20.0, 300.0));
        assert!(!tabs.is_transition_in_flight());
        assert_eq!(tabs.interaction().state(), InteractionState::Idle);
    }

    #[test]
    fn test_disallowed_direction_is_declined() {
        let mut tabs = coordinator(3);
        tabs.set_allowed_swipe_direction(AllowedSwipeDirection::Left);
        tabs.handle_pan(&pan(GestureState::Started, -20.0, -300.0));
        assert!(!tabs.is_transition_in_flight());

        tabs.set_selected_index(2).unwrap();
        settle(&mut tabs);
        tabs.handle_pan(&pan(GestureState::Started, 20.0, 300.0));
        assert_eq!(tabs.active_request().map(|r| r.to_index), Some(1));
    }

    #[test]
    fn test_pan_deferred_during_tap_transition() {
        let mut tabs = coordinator(3);
        tabs.select_tab(1).unwrap();
        tabs.handle_pan(&pan(GestureState::Started, -20.0, -300.0));
        assert_eq!(tabs.active_origin(), Some(TransitionOrigin::Tap));
        assert_eq!(tabs.interaction().state(), InteractionState::Idle);

        settle(&mut tabs);
        assert_eq!(tabs.selected_index(), Some(1));
        tabs.handle_pan(&pan(GestureState::Updated, -100.0, -300.0));
        assert_eq!(tabs.interaction().state(), InteractionState::Tracking);
        assert_eq!(tabs.active_origin(), Some(TransitionOrigin::Gesture));

        tabs.handle_pan(&pan(GestureState::Updated, -250.0, -300.0));
        tabs.handle_pan(&pan(GestureState::Ended, -250.0, -300.0));
        settle(&mut tabs);
        assert_eq!(tabs.selected_index(), Some(2));
    }

    #[test]
    fn test_resize_cancels_tracked_drag() {
        let mut tabs = coordinator(3);
        let finished = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = finished.clone();
        tabs.transition_finished.connect(move |outcome| sink.lock().push(*outcome));

        tabs.handle_pan(&pan(GestureState::Started, -20.0, -300.0));
        tabs.handle_pan(&pan(GestureState::Updated, -250.0, -300.0));
        assert_eq!(tabs.interaction().state(), InteractionState::Tracking);

        tabs.set_bounds(Rect::from_size(Size::new(480.0, 320.0)));
        assert!(!tabs.is_transition_in_flight());
        assert_eq!(tabs.interaction().state(), InteractionState::Idle);
        assert_eq!(tabs.selected_index(), Some(0));
        assert_eq!(tabs.view_stack().tabs(), vec![0]);
        assert_eq!(*finished.lock(), vec![TransitionOutcome::Cancelled]);
    }

    #[test]
    fn test_resize_finishes_tap_transition() {
        let mut tabs = coordinator(3);
        tabs.select_tab(1).unwrap();
        tabs.set_bounds(Rect::from_size(Size::new(480.0, 320.0)));
        assert!(!tabs.is_transition_in_flight());
        assert_eq!(tabs.selected_index(), Some(1));
        assert_eq!(tabs.view_stack().tabs(), vec![1]);
    }

    #[test]
    fn test_swipe_disabled() {
        let mut tabs = coordinator(3);
        tabs.set_swipe_enabled(false);
        assert!(!tabs.recognizer().is_enabled());
        tabs.handle_pan(&pan(GestureState::Started, -20.0, -300.0));
        assert!(!tabs.is_transition_in_flight());
    }

    #[test]
    fn test_cancel_interaction() {
        let mut tabs = coordinator(3);
        assert!(!tabs.cancel_interaction());

        tabs.handle_pan(&pan(GestureState::Started, -100.0, -300.0));
        assert!(tabs.cancel_interaction());
        assert!(!tabs.cancel_interaction());
        settle(&mut tabs);
        assert_eq!(tabs.selected_index(), Some(0));
        assert_eq!(tabs.view_stack().tabs(), vec![0]);
    }

    #[test]
    fn test_set_config_rejects_invalid() {
        let mut tabs = coordinator(2);
        let bad = SwipeConfig {
            minimum_touches: 0,
            ..SwipeConfig::default()
        };
        assert!(tabs.set_config(bad).is_err());
        assert!(tabs.set_touch_range(3, Some(2)).is_err());
        assert_eq!(tabs.config().minimum_touches, 1);

        tabs.set_touch_range(2, Some(2)).unwrap();
        assert_eq!(tabs.recognizer().config().minimum_touches, 2);
    }
}
