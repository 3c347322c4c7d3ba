//! Swipetab - swipe navigation and interactive transitions for tab containers.
//!
//! A [`TabSwitchCoordinator`] sits between a tab-bar container and its
//! content area. Horizontal drags become interactive transitions that follow
//! the finger and either complete or play back on release; taps and
//! programmatic selection run the same transitions non-interactively.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use swipetab::{AnimationStyle, SwipeConfig, TabSwitchCoordinator};
//! use swipetab_core::{Rect, Size};
//!
//! let config = SwipeConfig {
//!     cycling_enabled: true,
//!     swipe_animation: AnimationStyle::Push,
//!     ..SwipeConfig::default()
//! };
//! let mut tabs =
//!     TabSwitchCoordinator::with_config(Rect::from_size(Size::new(320.0, 480.0)), config)?;
//! tabs.set_tab_count(4);
//!
//! tabs.set_selected_index(3)?;
//! while tabs.is_transition_in_flight() {
//!     tabs.advance(Duration::from_millis(16));
//! }
//! assert_eq!(tabs.selected_index(), Some(3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod animation;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod gesture;
pub mod interaction;

pub use swipetab_core;

pub use animation::{
    AnimationStrategy, AnimationStyle, Direction, Easing, SwipeAnimation, SwipeTransitionAnimator,
    TransitionAnimator, TransitionContext, TransitionOutcome, TransitionRequest,
};
pub use config::{AllowedSwipeDirection, InteractionConfig, SwipeConfig};
pub use coordinator::{TabSwitchCoordinator, TransitionOrigin};
pub use error::{ConfigError, SelectionError, TransitionError};
pub use interaction::{GestureInteractionController, InteractionState, TransitionProgress};
