//! Transition animation: strategies, timing curves and animators.
//!
//! The pieces fit together like this:
//!
//! - [`AnimationStrategy`] decides where the outgoing and incoming tab views
//!   start and end ([`AnimationStyle`] provides the built-in styles).
//! - [`PropertyAnimation`] interpolates view frames between those positions.
//! - [`TransitionAnimator`] owns the in-flight animation for one
//!   [`TransitionContext`] and reports its outcome.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use swipetab::animation::{
//!     AnimationStyle, Direction, SwipeTransitionAnimator, TabView, TransitionAnimator,
//!     TransitionContext, TransitionOutcome, TransitionRequest, ViewStack,
//! };
//! use swipetab_core::{Rect, Size};
//!
//! let bounds = Rect::from_size(Size::new(320.0, 480.0));
//! let request = TransitionRequest::new(0, 1, Direction::Left, AnimationStyle::Push);
//! let mut context =
//!     TransitionContext::new(request, bounds, ViewStack::with_view(TabView::new(0, bounds)));
//!
//! let mut animator = SwipeTransitionAnimator::new();
//! animator.start(&mut context).unwrap();
//! while context.outcome().is_none() {
//!     animator.tick(&mut context, Duration::from_millis(16));
//! }
//! assert_eq!(context.outcome(), Some(TransitionOutcome::Completed));
//! assert_eq!(context.stack().tabs(), vec![1]);
//! ```

mod animator;
mod context;
mod easing;
mod property_animation;
mod strategy;

pub use animator::{DEFAULT_ANIMATION_DURATION_MS, SwipeTransitionAnimator, TransitionAnimator};
pub use context::{TabView, TransitionContext, TransitionOutcome, ViewOrder, ViewRole, ViewStack};
pub use easing::Easing;
pub use property_animation::{AnimationPosition, FrameTrack, PropertyAnimation};
pub use strategy::{
    AnimationStrategy, AnimationStyle, Direction, PUSH_PARALLAX_DIVISOR, SwipeAnimation,
    TransitionRequest,
};
