//! Transition animators.
//!
//! An animator owns at most one in-flight [`PropertyAnimation`]. It asks the
//! request's strategy for start and end frames, then drives the views between
//! them either on its own clock ([`tick`]) or under gesture control
//! ([`update_interactive`]). When the animation reaches an end point the
//! animator reports the outcome to the [`TransitionContext`].
//!
//! [`tick`]: TransitionAnimator::tick
//! [`update_interactive`]: TransitionAnimator::update_interactive

use std::fmt;
use std::time::Duration;

use swipetab_core::logging::targets;

use super::context::{TransitionContext, TransitionOutcome, ViewRole};
use super::easing::Easing;
use super::property_animation::{AnimationPosition, FrameTrack, PropertyAnimation};
use super::strategy::{AnimationStrategy, Direction};
use crate::error::TransitionError;

/// Default transition duration in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 330;

/// Drives one transition at a time.
///
/// Implementors provide [`start`](Self::start) and storage for the in-flight
/// animation; interactive scrubbing, ticking and forced finishing are
/// provided on top of that storage.
pub trait TransitionAnimator: fmt::Debug + Send + Sync {
    /// Configured duration when `is_animated`, zero otherwise.
    fn duration(&self, is_animated: bool) -> Duration;

    /// Change the configured duration. Ignored by default.
    fn set_duration(&mut self, _duration: Duration) {}

    /// Begin animating `context`.
    ///
    /// On error the context has already been completed as cancelled.
    fn start(&mut self, context: &mut TransitionContext) -> Result<(), TransitionError>;

    /// The in-flight animation.
    fn animation(&self) -> Option<&PropertyAnimation>;

    /// Storage for the in-flight animation.
    fn animation_mut(&mut self) -> &mut Option<PropertyAnimation>;

    /// Whether an animation is in flight.
    fn is_in_flight(&self) -> bool {
        self.animation().is_some()
    }

    /// Scrub the paused animation to `fraction`.
    fn update_interactive(&mut self, context: &mut TransitionContext, fraction: f32) {
        if let Some(animation) = self.animation_mut().as_mut() {
            animation.set_fraction_complete(fraction);
            animation.apply(context.stack_mut());
            tracing::trace!(
                target: targets::ANIMATION,
                fraction = animation.fraction_complete(),
                "interactive update"
            );
        }
    }

    /// Let the animation play forward from where the gesture left it.
    fn finish_interactive(&mut self, _context: &mut TransitionContext) {
        if let Some(animation) = self.animation_mut().as_mut() {
            animation.continue_animation(false);
        }
    }

    /// Mark the transition cancelled and play it back to the start.
    fn cancel_interactive(&mut self, context: &mut TransitionContext) {
        if let Some(animation) = self.animation_mut().as_mut() {
            context.mark_cancelled();
            animation.continue_animation(true);
        }
    }

    /// Advance a running animation by `delta`.
    ///
    /// Returns the outcome when this tick completed the transition.
    fn tick(
        &mut self,
        context: &mut TransitionContext,
        delta: Duration,
    ) -> Option<TransitionOutcome> {
        let reached = {
            let animation = self.animation_mut().as_mut()?;
            let reached = animation.tick(delta);
            animation.apply(context.stack_mut());
            reached
        };
        reached?;
        *self.animation_mut() = None;
        Some(context.complete_transition(!context.transition_was_cancelled()))
    }

    /// Stop the in-flight animation and snap it to the end point it was
    /// heading for, completing the context. No-op when idle.
    fn force_finish(&mut self, context: &mut TransitionContext) -> Option<TransitionOutcome> {
        let mut animation = self.animation_mut().take()?;
        let cancelled = context.transition_was_cancelled();
        animation.finish_at(if cancelled {
            AnimationPosition::Start
        } else {
            AnimationPosition::End
        });
        animation.apply(context.stack_mut());
        tracing::debug!(target: targets::ANIMATION, cancelled, "forced transition to finish");
        Some(context.complete_transition(!cancelled))
    }
}

/// The default animator: runs the request's strategy with a fixed duration
/// and timing curve.
#[derive(Debug, Clone)]
pub struct SwipeTransitionAnimator {
    duration: Duration,
    easing: Easing,
    animation: Option<PropertyAnimation>,
}

impl Default for SwipeTransitionAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeTransitionAnimator {
    /// Create an animator with the default duration and a linear curve.
    pub fn new() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS),
            easing: Easing::Linear,
            animation: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }
}

impl TransitionAnimator for SwipeTransitionAnimator {
    fn duration(&self, is_animated: bool) -> Duration {
        if is_animated { self.duration } else { Duration::ZERO }
    }

    fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    #[tracing::instrument(skip_all, target = "swipetab::animation", level = "debug")]
    fn start(&mut self, context: &mut TransitionContext) -> Result<(), TransitionError> {
        if self.animation.is_some() {
            tracing::warn!(
                target: targets::ANIMATION,
                from = context.request().from_index,
                to = context.request().to_index,
                "animator busy, rejecting transition"
            );
            context.complete_transition(false);
            return Err(TransitionError::AnimatorBusy);
        }
        if context.is_complete() {
            return Err(TransitionError::AlreadyCompleted);
        }

        let style = context.request().style.clone();
        let direction = context.direction();
        let tracks = match capture_tracks(style.strategy(), context, direction) {
            Ok(tracks) => tracks,
            Err(err) => {
                tracing::debug!(target: targets::ANIMATION, %err, "strategy failed, cancelling");
                context.complete_transition(false);
                return Err(err);
            }
        };

        let duration = self.duration(context.is_animated());
        let mut animation = PropertyAnimation::new(duration, self.easing, tracks);
        tracing::debug!(
            target: targets::ANIMATION,
            from = context.request().from_index,
            to = context.request().to_index,
            %direction,
            ?duration,
            interactive = context.is_interactive(),
            "starting transition"
        );

        if context.is_interactive() {
            animation.apply(context.stack_mut());
            self.animation = Some(animation);
        } else if duration.is_zero() {
            animation.finish_at(AnimationPosition::End);
            animation.apply(context.stack_mut());
            context.complete_transition(true);
        } else {
            animation.start();
            self.animation = Some(animation);
        }
        Ok(())
    }

    fn animation(&self) -> Option<&PropertyAnimation> {
        self.animation.as_ref()
    }

    fn animation_mut(&mut self) -> &mut Option<PropertyAnimation> {
        &mut self.animation
    }
}

/// Run `prepare` and `animate`, record both views' start and end frames,
/// and leave the views at their start frames.
fn capture_tracks(
    strategy: &dyn AnimationStrategy,
    context: &mut TransitionContext,
    direction: Direction,
) -> Result<Vec<FrameTrack>, TransitionError> {
    const ROLES: [ViewRole; 2] = [ViewRole::From, ViewRole::To];

    strategy.prepare(context, direction)?;
    if !context.is_incoming_inserted() {
        return Err(TransitionError::MissingView {
            tab: context.tab(ViewRole::To),
        });
    }
    let mut starts = Vec::with_capacity(ROLES.len());
    for role in ROLES {
        let frame = context
            .view_frame(role)
            .ok_or(TransitionError::MissingView { tab: context.tab(role) })?;
        starts.push((role, frame));
    }

    strategy.animate(context, direction)?;

    let mut tracks = Vec::with_capacity(ROLES.len());
    for (role, start) in starts {
        let end = context
            .view_frame(role)
            .ok_or(TransitionError::MissingView { tab: context.tab(role) })?;
        context.set_frame(role, start)?;
        tracks.push(FrameTrack::new(context.tab(role), start, end));
    }
    Ok(tracks)
}

static_assertions::assert_impl_all!(SwipeTransitionAnimator: Send, Sync);
